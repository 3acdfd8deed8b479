//! Error types for the export pipeline

use thiserror::Error;

/// Every failure the fetch -> parse -> join -> project -> write pipeline can raise.
///
/// None of these are retried. The binary reports them and exits non-zero.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Network or transport failure while fetching the data blob
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A recognised statement carried malformed literal content
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Row assigned into a table that was never declared
    #[error("line {line}: assignment to undeclared table {table}")]
    UndeclaredTable { line: usize, table: char },

    /// Row assigned past the declared size of its table
    #[error("line {line}: index {index} out of bounds for table {table} (size {size})")]
    IndexOutOfBounds {
        line: usize,
        table: char,
        index: usize,
        size: usize,
    },

    /// Foreign key field is missing or not an integer
    #[error("column {column} is not a usable key ({value:?})")]
    InvalidForeignKey { column: String, value: String },

    /// Keyed-table lookup found no entry
    #[error("key {key} not found in keyed table")]
    KeyNotFound { key: i64 },

    /// Building the record for one primary row failed
    #[error("join failed at row {row}: {source}")]
    Join {
        row: usize,
        #[source]
        source: Box<ExportError>,
    },

    /// Export list names a column the record does not carry
    #[error("missing field: {column}")]
    MissingField { column: String },

    /// Two schema entries share a name
    #[error("duplicate column name: {column}")]
    DuplicateColumn { column: String },

    /// Computed column could not be derived from its source value
    #[error("cannot compute column {column}: {message}")]
    Transform { column: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ExportError {
    fn from(e: reqwest::Error) -> Self {
        ExportError::Fetch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
