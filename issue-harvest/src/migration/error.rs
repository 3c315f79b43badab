//! Migration error types.

use super::MigratedIssue;
use crate::source::SourceError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort a migration. Nothing created before the failure is
/// rolled back.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The source issue could not be fetched.
    #[error("Failed to fetch source issue #{number}: {source}")]
    GetIssue {
        number: u64,
        #[source]
        source: SourceError,
    },

    /// The target issue could not be created.
    #[error("Failed to create target issue for #{number}: {source}")]
    CreateIssue {
        number: u64,
        #[source]
        source: SourceError,
    },

    /// The source comment thread could not be listed.
    #[error("Failed to list comments of #{number}: {source}")]
    ListComments {
        number: u64,
        #[source]
        source: SourceError,
    },

    /// A comment could not be posted on the target issue.
    ///
    /// `index` 0 is the provenance comment; copied comments follow from 1.
    #[error("Failed to post comment {index} on target issue #{target}: {source}")]
    CreateComment {
        target: u64,
        index: usize,
        #[source]
        source: SourceError,
    },

    /// A comment body could not be rendered.
    #[error(transparent)]
    Render(#[from] TemplateError),
}

/// A batch migration that stopped part way.
///
/// Issues in `migrated` were copied before the failure and stay in place.
#[derive(Debug, Error)]
#[error("Migration stopped after {} issue(s): {source}", .migrated.len())]
pub struct BatchError {
    /// Issues copied before the failure, in order.
    pub migrated: Vec<MigratedIssue>,

    /// The failure that stopped the batch.
    #[source]
    pub source: MigrationError,
}
