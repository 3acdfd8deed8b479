//! JSON sink: an array of objects keyed by header

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::Scalar;

use super::RowSink;

/// Buffers rows and writes them as one JSON array on finish
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
    header: Vec<String>,
    rows: Vec<IndexMap<String, Scalar>>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            header: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn compact(writer: W) -> Self {
        Self {
            pretty: false,
            ..Self::new(writer)
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for JsonSink<W> {
    fn write_header(&mut self, header: &[String]) -> Result<()> {
        self.header = header.to_vec();
        Ok(())
    }

    fn write_row(&mut self, row: &[Scalar]) -> Result<()> {
        let object = self
            .header
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();
        self.rows.push(object);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.rows)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
