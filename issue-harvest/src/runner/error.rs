//! Runner error types.

use crate::migration::{BatchError, MigrationError};
use crate::summary::{RunMode, RunSummary};

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading and validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Extraction failed before completing.
    #[error(transparent)]
    Extraction(#[from] crate::extraction::ExtractionError),

    /// The output file could not be opened.
    #[error(transparent)]
    Sink(#[from] crate::extraction::SinkError),

    /// Migration stopped at a failed step. `summary` lists the issues
    /// copied before it.
    #[error("{source}")]
    Migration {
        summary: Box<RunSummary>,
        #[source]
        source: MigrationError,
    },

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// The host URL could not be parsed.
    #[error("invalid GitHub URL: {0}")]
    Url(#[from] url::ParseError),
}

impl RunnerError {
    /// Work completed before a migration failed, if any was attempted.
    #[must_use]
    pub fn partial_summary(&self) -> Option<&RunSummary> {
        match self {
            Self::Migration { summary, .. } => Some(&**summary),
            _ => None,
        }
    }
}

impl From<BatchError> for RunnerError {
    fn from(error: BatchError) -> Self {
        let mut summary = RunSummary::new(RunMode::Migrate);
        for issue in error.migrated {
            summary.record_migration(issue);
        }
        Self::Migration {
            summary: Box::new(summary),
            source: error.source,
        }
    }
}
