//! Output: projection of joined records and the sinks that serialize them

mod csv;
mod json;
mod project;

use std::io::Write;

use crate::config::{LineEnding, OutputFormat};
use crate::error::Result;
use crate::model::Scalar;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::project::{strip_tags, ColumnProjector, ExportColumn, ExportSpec, Projection, Transform};

/// Receives the header and then each data row, in order
pub trait RowSink {
    fn write_header(&mut self, header: &[String]) -> Result<()>;

    fn write_row(&mut self, row: &[Scalar]) -> Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> Result<()>;

    /// Write a whole projection and finish
    fn write_projection(&mut self, projection: &Projection) -> Result<()> {
        self.write_header(&projection.header)?;
        for row in &projection.rows {
            self.write_row(row)?;
        }
        self.finish()
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn write_header(&mut self, header: &[String]) -> Result<()> {
        (**self).write_header(header)
    }

    fn write_row(&mut self, row: &[Scalar]) -> Result<()> {
        (**self).write_row(row)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Factory for creating sinks
pub struct SinkFactory;

impl SinkFactory {
    /// Create a sink based on format type
    pub fn create<'w>(
        format: OutputFormat,
        line_ending: LineEnding,
        writer: Box<dyn Write + 'w>,
    ) -> Box<dyn RowSink + 'w> {
        match format {
            OutputFormat::Csv => Box::new(CsvSink::new(writer, line_ending)),
            OutputFormat::Json => Box::new(JsonSink::new(writer)),
        }
    }
}
