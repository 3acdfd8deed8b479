//! Array-literal body tokenizer
//!
//! Turns `'x',5,'',,'y'` into scalar fields. Only the literal forms the
//! feed actually emits are understood: single-quoted strings, numbers and
//! empty slots.

use crate::config::Tokenizer;
use crate::model::{Row, Scalar};

/// Strip enclosing brackets, terminators and padding from the right-hand
/// side of an assignment
pub fn array_body(rhs: &str) -> &str {
    rhs.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '[' | ']' | ';'))
}

/// Splits a literal body into a row of scalars
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralParser {
    tokenizer: Tokenizer,
}

impl LiteralParser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Parse one body. The error is a message; the caller attaches the line.
    pub fn parse(&self, body: &str) -> Result<Row, String> {
        match self.tokenizer {
            Tokenizer::Naive => body.split(',').map(|t| classify(t, false)).collect(),
            Tokenizer::QuoteAware => split_quote_aware(body)?
                .iter()
                .map(|t| classify(t, true))
                .collect(),
        }
    }
}

/// Turn one raw token into a scalar
fn classify(token: &str, unescape: bool) -> Result<Scalar, String> {
    let t = token.trim();
    if t.is_empty() {
        return Ok(Scalar::Absent);
    }

    let opens = t.starts_with('\'');
    let closes = t.len() >= 2 && t.ends_with('\'');
    if opens && closes {
        let inner = &t[1..t.len() - 1];
        return Ok(Scalar::Str(if unescape {
            unescape_js(inner)
        } else {
            inner.to_string()
        }));
    }
    if opens || t.ends_with('\'') {
        return Err(format!("unterminated string literal: {}", t));
    }

    if looks_numeric(t) {
        if let Ok(i) = t.parse::<i64>() {
            return Ok(Scalar::Int(i));
        }
        if let Ok(f) = t.parse::<f64>() {
            return Ok(Scalar::Float(f));
        }
    }

    // Bare words (identifiers, `true`) pass through as text
    Ok(Scalar::Str(t.to_string()))
}

// f64 parsing also accepts "inf" and "nan"
fn looks_numeric(t: &str) -> bool {
    t.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

/// Split on commas outside single-quoted strings
fn split_quote_aware(body: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quote => {
                current.push(ch);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '\'' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            ',' if !in_quote => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if in_quote {
        return Err(format!("unterminated string literal: {}", current.trim()));
    }
    tokens.push(current);
    Ok(tokens)
}

fn unescape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
