//! Parser layer: JavaScript feed text to a [`TableStore`]

mod literal;
mod statement;

use log::{debug, info};

use crate::config::Tokenizer;
use crate::error::{ExportError, Result};
use crate::model::TableStore;

pub use self::literal::{array_body, LiteralParser};
pub use self::statement::{recognize, Statement, KEYED_TABLE, MAX_TABLE_SIZE};

/// Parser for the array-literal feed format
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedParser {
    literals: LiteralParser,
}

impl FeedParser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            literals: LiteralParser::new(tokenizer),
        }
    }

    /// Apply every recognised statement in text order.
    ///
    /// Lines are split on both `\n` and `\r`; reported line numbers count `\n`.
    pub fn parse(&self, text: &str) -> Result<TableStore> {
        let mut store = TableStore::new();
        let mut ignored = 0usize;

        for (i, raw) in text.split('\n').enumerate() {
            let line_no = i + 1;
            for line in raw.split('\r').filter(|l| !l.is_empty()) {
                let statement = recognize(line).map_err(|message| ExportError::Parse {
                    line: line_no,
                    message,
                })?;

                match statement {
                    Some(Statement::Declare { table, size }) => {
                        debug!("line {}: declare {} with {} slots", line_no, table, size);
                        store.declare(table, size);
                    }
                    Some(Statement::Assign { table, index, rhs }) => {
                        self.apply_assignment(&mut store, table, index, rhs, line_no)?;
                    }
                    None => ignored += 1,
                }
            }
        }

        info!(
            "parsed feed: {} keyed entries, {} lines ignored",
            store.keyed().len(),
            ignored
        );
        Ok(store)
    }

    fn apply_assignment(
        &self,
        store: &mut TableStore,
        table: char,
        index: usize,
        rhs: &str,
        line: usize,
    ) -> Result<()> {
        let fields = self
            .literals
            .parse(array_body(rhs))
            .map_err(|message| ExportError::Parse { line, message })?;

        if table != KEYED_TABLE {
            return store.assign(table, index, fields, line);
        }

        // Keyed rows are (key, display value); the statement index is ignored
        let key = fields
            .first()
            .and_then(|f| f.as_int())
            .ok_or_else(|| ExportError::Parse {
                line,
                message: "keyed row needs an integer key in its first field".to_string(),
            })?;
        let value = fields.get(1).ok_or_else(|| ExportError::Parse {
            line,
            message: format!("keyed row {} has no display value", key),
        })?;
        store.insert_keyed(key, value.display().into_owned());
        Ok(())
    }
}

/// Parse with the baseline tokenizer
pub fn parse_feed(text: &str) -> Result<TableStore> {
    FeedParser::default().parse(text)
}
