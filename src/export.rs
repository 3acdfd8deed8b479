//! End-to-end export: feed text -> tables -> joined records -> sink

use log::info;

use crate::config::{Config, MissingKeyPolicy, Tokenizer};
use crate::error::Result;
use crate::join::JoinPlan;
use crate::model::TableStore;
use crate::output::{ColumnProjector, ExportSpec, Projection, RowSink};
use crate::parser::FeedParser;
use crate::preset;

/// Counts from one export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Declared slots in the primary table
    pub primary_slots: usize,
    /// Records handed to the sink
    pub records_written: usize,
    /// Records dropped under [`MissingKeyPolicy::Skip`]
    pub records_skipped: usize,
}

/// Join plan and export list, validated against each other up front
#[derive(Debug, Clone)]
pub struct Exporter {
    plan: JoinPlan,
    spec: ExportSpec,
    tokenizer: Tokenizer,
    missing_key: MissingKeyPolicy,
}

impl Exporter {
    /// Pair a plan with an export list; fails with `MissingField` if the
    /// list reads a column the join never produces
    pub fn new(plan: JoinPlan, spec: ExportSpec) -> Result<Self> {
        spec.validate(plan.output_columns())?;
        Ok(Self {
            plan,
            spec,
            tokenizer: Tokenizer::default(),
            missing_key: MissingKeyPolicy::default(),
        })
    }

    /// The feed's own layout and default export list
    pub fn with_preset() -> Result<Self> {
        Self::new(preset::join_plan()?, preset::export_spec())
    }

    /// Take tokenizer and missing-key policy from `config`
    pub fn configured(mut self, config: &Config) -> Self {
        self.tokenizer = config.tokenizer;
        self.missing_key = config.missing_key;
        self
    }

    pub fn plan(&self) -> &JoinPlan {
        &self.plan
    }

    /// Build the tables from raw feed text
    pub fn parse(&self, text: &str) -> Result<TableStore> {
        FeedParser::new(self.tokenizer).parse(text)
    }

    /// Join and project everything. Nothing is returned unless every
    /// record succeeds (or is skipped by policy). Projection failures are
    /// reported against their primary row like join failures.
    pub fn project(&self, store: &TableStore) -> Result<(Projection, ExportStats)> {
        let projector = ColumnProjector::new(&self.spec);
        let mut rows = self
            .plan
            .join_with(store, self.missing_key, |record| projector.project(&record));
        let projection = projector.render(rows.by_ref())?;

        let stats = ExportStats {
            primary_slots: store.table(self.plan.primary.table).map_or(0, |t| t.size()),
            records_written: projection.rows.len(),
            records_skipped: rows.skipped(),
        };
        Ok((projection, stats))
    }

    /// Parse, join, project and write. `open` is only called once every
    /// record is ready, so a failed run never creates its output.
    pub fn export<S, O>(&self, text: &str, open: O) -> Result<ExportStats>
    where
        S: RowSink,
        O: FnOnce() -> Result<S>,
    {
        let store = self.parse(text)?;
        let (projection, stats) = self.project(&store)?;

        let mut sink = open()?;
        sink.write_projection(&projection)?;
        info!(
            "wrote {} records ({} skipped, {} primary slots)",
            stats.records_written, stats.records_skipped, stats.primary_slots
        );
        Ok(stats)
    }
}
