//! CSV sink: numbers bare, everything else quoted

use std::borrow::Cow;
use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::LineEnding;
use crate::error::Result;
use crate::model::Scalar;

use super::RowSink;

/// Comma-separated output with one line ending for every row.
///
/// Quoting is decided per field here; the csv writer itself never adds quotes.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, line_ending: LineEnding) -> Self {
        let terminator = match line_ending {
            LineEnding::Lf => Terminator::Any(b'\n'),
            LineEnding::CrLf => Terminator::CRLF,
        };
        let writer = WriterBuilder::new()
            .delimiter(b',')
            .quote_style(QuoteStyle::Never)
            .terminator(terminator)
            .from_writer(inner);
        Self { writer }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

impl<W: Write> CsvSink<W> {
    fn write_fields(&mut self, fields: &[Cow<'_, str>]) -> Result<()> {
        self.writer
            .write_record(fields.iter().map(|field| field.as_bytes()))?;
        Ok(())
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_header(&mut self, header: &[String]) -> Result<()> {
        let fields: Vec<Cow<'_, str>> = header.iter().map(|name| quote_field(name)).collect();
        self.write_fields(&fields)
    }

    fn write_row(&mut self, row: &[Scalar]) -> Result<()> {
        let fields: Vec<Cow<'_, str>> = row
            .iter()
            .map(|value| match value {
                Scalar::Int(_) | Scalar::Float(_) => value.display(),
                Scalar::Str(s) => quote_field(s),
                Scalar::Absent => Cow::Borrowed("\"\""),
            })
            .collect();
        self.write_fields(&fields)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Leave text that spells a finite number bare and double-quote the rest.
/// `NaN`, `inf` and `infinity` parse as `f64` but are quoted.
fn quote_field(text: &str) -> Cow<'_, str> {
    if text.parse::<f64>().map_or(false, f64::is_finite) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    }
}
