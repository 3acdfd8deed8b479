//! Scalar field values parsed out of array literals

use std::borrow::Cow;

use serde::Serialize;

/// One field of a parsed row.
///
/// `Absent` is an omitted slot (`,,`) and stays distinct from `Str("")`,
/// which is the empty string literal `''`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Absent,
    Int(i64),
    Float(f64),
    Str(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Absent, Scalar::Absent) => true,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Int(a), Scalar::Float(b)) => (*a as f64) == *b,
            (Scalar::Float(a), Scalar::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Scalar {
    /// Check if the slot was omitted
    pub fn is_absent(&self) -> bool {
        matches!(self, Scalar::Absent)
    }

    /// Integer view of the value. Strings holding an integer count too,
    /// since the feed is loose about quoting numbers.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Scalar::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Convert to the text written into an output field
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Scalar::Absent => Cow::Borrowed(""),
            Scalar::Int(i) => Cow::Owned(i.to_string()),
            Scalar::Float(f) => Cow::Owned(f.to_string()),
            Scalar::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}
