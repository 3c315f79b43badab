//! Extraction error types.

use crate::source::SourceError;
use thiserror::Error;

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The first search page could not be fetched.
    #[error("Failed to fetch the first search page: {0}")]
    FirstPage(#[source] SourceError),

    /// Writing to the CSV sink failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors raised by the CSV sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to create the output file.
    #[error("Failed to create output file '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or write a record.
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush buffered rows.
    #[error("Failed to flush CSV output: {0}")]
    Flush(#[source] std::io::Error),
}
