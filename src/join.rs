//! Joins primary rows with their secondary row and keyed-table value

use log::warn;

use crate::config::MissingKeyPolicy;
use crate::error::{ExportError, Result};
use crate::model::{ensure_unique, ColumnSchema, JoinedRecord, Row, Scalar, TableStore};

/// Which tables are joined and through which columns
#[derive(Debug, Clone)]
pub struct JoinPlan {
    /// Layout of the primary table; one record per present row
    pub primary: ColumnSchema,
    /// Layout of the positional lookup table
    pub secondary: ColumnSchema,
    /// Primary column holding the secondary row index
    pub secondary_key: String,
    /// Primary column holding the keyed-table key
    pub keyed_key: String,
    /// Record field receiving the keyed-table value
    pub keyed_column: String,
}

impl JoinPlan {
    /// Build a plan, checking that both key columns exist on the primary
    /// layout and that no two output columns share a name
    pub fn new(
        primary: ColumnSchema,
        secondary: ColumnSchema,
        secondary_key: impl Into<String>,
        keyed_key: impl Into<String>,
        keyed_column: impl Into<String>,
    ) -> Result<Self> {
        let plan = Self {
            primary,
            secondary,
            secondary_key: secondary_key.into(),
            keyed_key: keyed_key.into(),
            keyed_column: keyed_column.into(),
        };

        for key in [&plan.secondary_key, &plan.keyed_key] {
            if plan.primary.position(key).is_none() {
                return Err(ExportError::MissingField {
                    column: key.clone(),
                });
            }
        }
        ensure_unique(plan.output_columns())?;
        Ok(plan)
    }

    /// Every column a joined record can carry, in insertion order
    pub fn output_columns(&self) -> impl Iterator<Item = &str> {
        self.primary
            .names()
            .chain(self.secondary.names())
            .chain(std::iter::once(self.keyed_column.as_str()))
    }

    /// Iterate joined records over `store`
    pub fn join<'a>(&'a self, store: &'a TableStore, policy: MissingKeyPolicy) -> RowJoiner<'a> {
        self.join_with(store, policy, Ok as PassThrough)
    }

    /// Iterate joined records passed through `finish`. A failure in
    /// `finish` is reported against its primary row and handled by
    /// `policy` exactly like a failed join.
    pub fn join_with<'a, T, F>(
        &'a self,
        store: &'a TableStore,
        policy: MissingKeyPolicy,
        finish: F,
    ) -> RowJoiner<'a, F>
    where
        F: FnMut(JoinedRecord) -> Result<T>,
    {
        RowJoiner {
            plan: self,
            store,
            policy,
            finish,
            position: 0,
            skipped: 0,
        }
    }

    fn join_row(&self, store: &TableStore, row: &Row) -> Result<JoinedRecord> {
        let mut record = JoinedRecord::new();
        copy_named(&mut record, &self.primary, row);

        if let Some(index) = self.foreign_key(&record, &self.secondary_key)? {
            match usize::try_from(index).ok().and_then(|i| store.row(self.secondary.table, i)) {
                Some(secondary) => copy_named(&mut record, &self.secondary, secondary),
                None => warn!("{} {} has no {} row", self.secondary_key, index, self.secondary.table),
            }
        }

        let key = self
            .foreign_key(&record, &self.keyed_key)?
            .ok_or_else(|| invalid_key(&self.keyed_key, &Scalar::Absent))?;
        let value = store.lookup_key(key)?;
        record.insert(self.keyed_column.as_str(), Scalar::from(value));

        Ok(record)
    }

    // Absent means "no key"; anything else must be an integer
    fn foreign_key(&self, record: &JoinedRecord, column: &str) -> Result<Option<i64>> {
        match record.get(column) {
            None | Some(Scalar::Absent) => Ok(None),
            Some(value) => value.as_int().map(Some).ok_or_else(|| invalid_key(column, value)),
        }
    }
}

fn invalid_key(column: &str, value: &Scalar) -> ExportError {
    ExportError::InvalidForeignKey {
        column: column.to_string(),
        value: value.display().into_owned(),
    }
}

/// Copy named fields; short rows are padded with absent values
fn copy_named(record: &mut JoinedRecord, schema: &ColumnSchema, row: &Row) {
    for (pos, name) in schema.named() {
        let value = row.get(pos).cloned().unwrap_or(Scalar::Absent);
        record.insert(name, value);
    }
}

/// Finishing step of a plain [`JoinPlan::join`]
pub type PassThrough = fn(JoinedRecord) -> Result<JoinedRecord>;

/// Lazy sequence of joined records, one per present primary row.
///
/// Does not mutate the store; call [`JoinPlan::join`] again to restart.
pub struct RowJoiner<'a, F = PassThrough> {
    plan: &'a JoinPlan,
    store: &'a TableStore,
    policy: MissingKeyPolicy,
    finish: F,
    position: usize,
    skipped: usize,
}

impl<F> RowJoiner<'_, F> {
    /// Rows dropped so far under [`MissingKeyPolicy::Skip`]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<T, F> Iterator for RowJoiner<'_, F>
where
    F: FnMut(JoinedRecord) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let table = store.table(self.plan.primary.table)?;

        while self.position < table.size() {
            let index = self.position;
            self.position += 1;

            let Some(row) = table.get(index) else {
                continue;
            };

            match self.plan.join_row(store, row).and_then(&mut self.finish) {
                Ok(item) => return Some(Ok(item)),
                Err(source) => {
                    let err = ExportError::Join {
                        row: index,
                        source: Box::new(source),
                    };
                    match self.policy {
                        MissingKeyPolicy::Abort => {
                            self.position = table.size();
                            return Some(Err(err));
                        }
                        MissingKeyPolicy::Skip => {
                            warn!("skipping: {}", err);
                            self.skipped += 1;
                        }
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_feed;

    fn plan() -> JoinPlan {
        JoinPlan::new(
            ColumnSchema::new('A', [None, Some("B_KEY"), Some("Home"), Some("C_KEY")]).unwrap(),
            ColumnSchema::new('B', [Some("sclassid"), Some("League_Short"), None]).unwrap(),
            "B_KEY",
            "C_KEY",
            "Leauge_Country",
        )
        .unwrap()
    }

    #[test]
    fn test_join_single_row() {
        let store = parse_feed(
            "var A=Array(2);\nvar B=Array(1);\nC[0]=[7,'Testland'];\nB[0]=['SC','Short','x'];\nA[1]=[99,0,'Home FC',7];",
        )
        .unwrap();
        let plan = plan();
        let records: Vec<_> = plan
            .join(&store, MissingKeyPolicy::Abort)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        let expected: JoinedRecord = [
            ("B_KEY", Scalar::Int(0)),
            ("Home", Scalar::from("Home FC")),
            ("C_KEY", Scalar::Int(7)),
            ("sclassid", Scalar::from("SC")),
            ("League_Short", Scalar::from("Short")),
            ("Leauge_Country", Scalar::from("Testland")),
        ]
        .into_iter()
        .collect();
        assert_eq!(records[0], expected);
    }

    #[test]
    fn test_missing_secondary_row_skips_overlay() {
        let store = parse_feed("var A=Array(1);\nC[0]=[7,'T'];\nA[0]=[0,5,'H',7];").unwrap();
        let plan = plan();
        let record = plan.join(&store, MissingKeyPolicy::Abort).next().unwrap().unwrap();
        assert!(!record.contains("League_Short"));
        assert_eq!(record.get("Leauge_Country"), Some(&Scalar::from("T")));
    }

    #[test]
    fn test_short_primary_row_is_padded() {
        let store = parse_feed("var A=Array(1);\nC[0]=[7,'T'];\nA[0]=[0];").unwrap();
        let plan = plan();
        let err = plan.join(&store, MissingKeyPolicy::Abort).next().unwrap().unwrap_err();
        // C_KEY padded as absent, so the keyed lookup has nothing to use
        assert!(matches!(err, ExportError::Join { row: 0, .. }));
    }

    #[test]
    fn test_unresolved_key_aborts() {
        let store = parse_feed(
            "var A=Array(2);\nC[0]=[7,'T'];\nA[0]=[0,,'H',8];\nA[1]=[0,,'H',7];",
        )
        .unwrap();
        let plan = plan();
        let mut joiner = plan.join(&store, MissingKeyPolicy::Abort);

        match joiner.next() {
            Some(Err(ExportError::Join { row, source })) => {
                assert_eq!(row, 0);
                assert!(matches!(*source, ExportError::KeyNotFound { key: 8 }));
            }
            other => panic!("expected join error, got {:?}", other),
        }
        assert!(joiner.next().is_none());
    }

    #[test]
    fn test_unresolved_key_skipped() {
        let store = parse_feed(
            "var A=Array(2);\nC[0]=[7,'T'];\nA[0]=[0,,'H',8];\nA[1]=[0,,'Kept',7];",
        )
        .unwrap();
        let plan = plan();
        let mut joiner = plan.join(&store, MissingKeyPolicy::Skip);
        let records: Vec<_> = joiner.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Home"), Some(&Scalar::from("Kept")));
        assert_eq!(joiner.skipped(), 1);
    }

    #[test]
    fn test_finish_failure_follows_policy() {
        let store = parse_feed(
            "var A=Array(2);\nvar B=Array(1);\nC[0]=[7,'T'];\nB[0]=['SC','Short','x'];\nA[0]=[0,5,'H',7];\nA[1]=[0,0,'Kept',7];",
        )
        .unwrap();
        let plan = plan();
        let needs_league = |record: JoinedRecord| {
            if record.contains("League_Short") {
                Ok(record)
            } else {
                Err(ExportError::MissingField {
                    column: "League_Short".into(),
                })
            }
        };

        let err = plan
            .join_with(&store, MissingKeyPolicy::Abort, needs_league)
            .next()
            .unwrap()
            .unwrap_err();
        match err {
            ExportError::Join { row, source } => {
                assert_eq!(row, 0);
                assert!(matches!(*source, ExportError::MissingField { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut joiner = plan.join_with(&store, MissingKeyPolicy::Skip, needs_league);
        let records: Vec<_> = joiner.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Home"), Some(&Scalar::from("Kept")));
        assert_eq!(joiner.skipped(), 1);
    }

    #[test]
    fn test_non_integer_key() {
        let store = parse_feed("var A=Array(1);\nA[0]=[0,'x','H',7];").unwrap();
        let plan = plan();
        let err = plan.join(&store, MissingKeyPolicy::Abort).next().unwrap().unwrap_err();
        match err {
            ExportError::Join { source, .. } => {
                assert!(matches!(*source, ExportError::InvalidForeignKey { .. }))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plan_rejects_colliding_names() {
        let err = JoinPlan::new(
            ColumnSchema::new('A', [Some("B_KEY"), Some("C_KEY"), Some("Name")]).unwrap(),
            ColumnSchema::new('B', [Some("Name")]).unwrap(),
            "B_KEY",
            "C_KEY",
            "Country",
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::DuplicateColumn { column } if column == "Name"));
    }

    #[test]
    fn test_plan_requires_key_columns() {
        let err = JoinPlan::new(
            ColumnSchema::new('A', [Some("B_KEY")]).unwrap(),
            ColumnSchema::new('B', [Some("Name")]).unwrap(),
            "B_KEY",
            "C_KEY",
            "Country",
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::MissingField { column } if column == "C_KEY"));
    }

    #[test]
    fn test_undeclared_primary_table_yields_nothing() {
        let store = TableStore::new();
        let plan = plan();
        assert_eq!(plan.join(&store, MissingKeyPolicy::Abort).count(), 0);
    }
}
