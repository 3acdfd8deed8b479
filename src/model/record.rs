//! Flattened records produced by the join

use indexmap::IndexMap;

use super::value::Scalar;

/// Column name to value, in the order columns were added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedRecord {
    fields: IndexMap<String, Scalar>,
}

impl JoinedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, overwriting any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: Scalar) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Scalar)> for JoinedRecord {
    fn from_iter<T: IntoIterator<Item = (S, Scalar)>>(iter: T) -> Self {
        let mut record = JoinedRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
