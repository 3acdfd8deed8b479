//! Line-level recognition of table declarations and indexed assignments

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier of the table addressed by explicit key instead of position
pub const KEYED_TABLE: char = 'C';

/// Upper bound on a declared size, so a corrupt feed cannot demand an absurd allocation
pub const MAX_TABLE_SIZE: usize = 1_000_000;

// A[2]=['$$',62,'',,'',4,2,1,,'','',''];
static ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([ABC])\s*\[\s*(\d+)\s*\]\s*=\s*(.*)$").expect("assignment pattern is valid")
});

// var A=Array(146);  (anything may precede `var`)
static DECLARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\s*([AB])\s*=\s*Array\s*\(\s*(\d+)\s*\)").expect("declaration pattern is valid")
});

/// A data-bearing statement found on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `var <table>=Array(<size>)`
    Declare { table: char, size: usize },
    /// `<table>[<index>]=<rhs>`; `rhs` still carries brackets and terminator
    Assign {
        table: char,
        index: usize,
        rhs: &'a str,
    },
}

/// Match one line against both statement shapes.
///
/// `Ok(None)` means the line carries no data. `Err` holds a message for
/// a recognised statement whose number does not fit.
pub fn recognize(line: &str) -> Result<Option<Statement<'_>>, String> {
    if let Some(caps) = ASSIGN.captures(line) {
        let table = first_char(&caps[1]);
        let index = caps[2]
            .parse::<usize>()
            .map_err(|_| format!("index {} is out of range", &caps[2]))?;
        let rhs = caps.get(3).map_or("", |m| m.as_str());
        return Ok(Some(Statement::Assign { table, index, rhs }));
    }

    if let Some(caps) = DECLARE.captures(line) {
        let table = first_char(&caps[1]);
        let size = caps[2]
            .parse::<usize>()
            .ok()
            .filter(|&s| s <= MAX_TABLE_SIZE)
            .ok_or_else(|| format!("declared size {} is too large", &caps[2]))?;
        return Ok(Some(Statement::Declare { table, size }));
    }

    Ok(None)
}

// Captures come from single-letter character classes
fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or(KEYED_TABLE)
}
