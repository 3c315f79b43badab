//! CSV output sink.

use super::error::SinkError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Append-only CSV writer without a header row.
///
/// Rows are buffered; [`flush`](Self::flush) pushes them to the underlying
/// writer. Dropping the sink also flushes on a best-effort basis.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Create`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|e| SinkError::Create {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps any writer.
    pub fn from_writer(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        Self { writer, rows: 0 }
    }

    /// Appends one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn write_row(&mut self, row: &[String]) -> Result<(), SinkError> {
        self.writer.write_record(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Flush`] on I/O failure.
    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(SinkError::Flush)
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Flush`] if the final flush fails.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Flush(e.into_error()))
    }
}
