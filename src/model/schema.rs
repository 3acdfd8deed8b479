//! Positional column layouts for declared tables

use rustc_hash::FxHashSet;

use crate::error::{ExportError, Result};

/// Names for the fields of one table, aligned by position with its rows.
///
/// `None` marks a field whose purpose is unknown; it is never copied into
/// a joined record.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    /// Table identifier this layout applies to
    pub table: char,
    columns: Vec<Option<String>>,
}

impl ColumnSchema {
    /// Build a layout, rejecting repeated names
    pub fn new<I, S>(table: char, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let columns: Vec<Option<String>> = columns.into_iter().map(|c| c.map(Into::into)).collect();
        ensure_unique(columns.iter().flatten().map(String::as_str))?;
        Ok(Self { table, columns })
    }

    /// Number of positional slots, named or not
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Named slots as (position, name)
    pub fn named(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|name| (i, name)))
    }

    /// Named columns in positional order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named().map(|(_, name)| name)
    }

    /// Get slot position by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.named().find(|(_, n)| *n == name).map(|(i, _)| i)
    }
}

/// Fail with `DuplicateColumn` on the first name seen twice
pub fn ensure_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for name in names {
        if !seen.insert(name) {
            return Err(ExportError::DuplicateColumn {
                column: name.to_string(),
            });
        }
    }
    Ok(())
}
