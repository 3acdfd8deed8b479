//! Data model for tables recovered from the feed

mod record;
mod schema;
mod store;
mod value;

pub use record::JoinedRecord;
pub use schema::{ensure_unique, ColumnSchema};
pub use store::{KeyedTable, Row, Table, TableStore};
pub use value::Scalar;
