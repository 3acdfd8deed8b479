//! In-memory tables rebuilt from one feed response

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::{ExportError, Result};

use super::value::Scalar;

/// Fields of one assigned row, in source order
pub type Row = Vec<Scalar>;

/// A positionally indexed table with a fixed number of slots
#[derive(Debug, Clone, Default)]
pub struct Table {
    slots: Vec<Option<Row>>,
}

impl Table {
    /// Create a table of `size` empty slots
    pub fn with_size(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Declared number of slots
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a row
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Row at `index`, or `None` if unset or out of range
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

/// Display strings addressed by an explicit integer key
#[derive(Debug, Clone, Default)]
pub struct KeyedTable {
    entries: IndexMap<i64, String>,
}

impl KeyedTable {
    /// Insert or overwrite one entry
    pub fn insert(&mut self, key: i64, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: i64) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All tables recovered from one response.
///
/// Built once per run and only through [`TableStore::declare`],
/// [`TableStore::assign`] and [`TableStore::insert_keyed`].
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables: FxHashMap<char, Table>,
    keyed: KeyedTable,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)declare `name` with `size` empty slots, dropping earlier contents
    pub fn declare(&mut self, name: char, size: usize) {
        self.tables.insert(name, Table::with_size(size));
    }

    /// Store `row` at `index` of a declared table. `line` is only used for errors.
    pub fn assign(&mut self, name: char, index: usize, row: Row, line: usize) -> Result<()> {
        let table = self
            .tables
            .get_mut(&name)
            .ok_or(ExportError::UndeclaredTable { line, table: name })?;

        let size = table.size();
        match table.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(row);
                Ok(())
            }
            None => Err(ExportError::IndexOutOfBounds {
                line,
                table: name,
                index,
                size,
            }),
        }
    }

    /// Insert one keyed-table entry
    pub fn insert_keyed(&mut self, key: i64, value: impl Into<String>) {
        self.keyed.insert(key, value);
    }

    /// Get a declared table
    pub fn table(&self, name: char) -> Option<&Table> {
        self.tables.get(&name)
    }

    /// Row lookup that treats undeclared tables, unset slots and
    /// out-of-range indices alike as absent
    pub fn row(&self, name: char, index: usize) -> Option<&Row> {
        self.table(name).and_then(|t| t.get(index))
    }

    /// Keyed-table lookup; a missing key is a hard error
    pub fn lookup_key(&self, key: i64) -> Result<&str> {
        self.keyed.get(key).ok_or(ExportError::KeyNotFound { key })
    }

    pub fn keyed(&self) -> &KeyedTable {
        &self.keyed
    }
}
