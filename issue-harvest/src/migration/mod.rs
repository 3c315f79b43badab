//! Cross-repository issue migration.
//!
//! Copies an issue to another repository, posts a provenance comment that
//! points back at the original, then replays the original comment thread in
//! order. Steps run strictly one after another and any failure stops the
//! migration where it is; there is no rollback or resume.

mod error;
mod notes;

pub use error::{BatchError, MigrationError};
pub use notes::MigrationNotes;

use crate::source::{Issue, IssueDraft, IssueSource, RepoRef};
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

/// An issue that was copied successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedIssue {
    /// URL of the original issue.
    pub source_url: String,

    /// Number of the new issue.
    pub target_number: u64,

    /// URL of the new issue.
    pub target_url: String,

    /// Number of original comments copied (excluding the provenance comment).
    pub comments_copied: usize,
}

/// Copies `issue` from `from` into `to`.
///
/// Creates the issue, lists the source comments, posts the provenance
/// comment, then re-posts each source comment in chronological order.
///
/// # Errors
///
/// Returns [`MigrationError`] naming the first step that failed.
pub async fn migrate_issue<S: IssueSource>(
    source: &S,
    from: &RepoRef,
    to: &RepoRef,
    issue: &Issue,
    notes: &MigrationNotes,
) -> Result<MigratedIssue, MigrationError> {
    let span = info_span!(
        "migrate_issue",
        from = %from,
        to = %to,
        number = issue.number
    );

    async {
        info!(title = %issue.title, "Migrating issue");

        let target = source
            .create_issue(to, &IssueDraft::from(issue))
            .await
            .map_err(|e| MigrationError::CreateIssue {
                number: issue.number,
                source: e,
            })?;
        info!(target_number = target.number, url = %target.html_url, "Created target issue");

        let comments = source
            .list_comments(from, issue.number)
            .await
            .map_err(|e| MigrationError::ListComments {
                number: issue.number,
                source: e,
            })?;

        let provenance = notes.provenance(issue, from)?;
        post_comment(source, to, target.number, 0, &provenance).await?;

        for (i, comment) in comments.iter().enumerate() {
            let body = notes.copied_comment(comment)?;
            post_comment(source, to, target.number, i + 1, &body).await?;
            debug!(comment_id = comment.id, author = %comment.author, "Copied comment");
        }

        info!(comments = comments.len(), "Issue migrated");
        Ok(MigratedIssue {
            source_url: issue.html_url.clone(),
            target_number: target.number,
            target_url: target.html_url,
            comments_copied: comments.len(),
        })
    }
    .instrument(span)
    .await
}

/// Fetches and migrates each issue number in order.
///
/// Stops at the first failure; issues migrated before it stay migrated.
///
/// # Errors
///
/// Returns a [`BatchError`] holding the issues already copied and either
/// [`MigrationError::GetIssue`] or the error from [`migrate_issue`].
pub async fn migrate_issues<S: IssueSource>(
    source: &S,
    from: &RepoRef,
    to: &RepoRef,
    numbers: &[u64],
    notes: &MigrationNotes,
) -> Result<Vec<MigratedIssue>, BatchError> {
    let mut migrated = Vec::with_capacity(numbers.len());

    for &number in numbers {
        match migrate_number(source, from, to, number, notes).await {
            Ok(issue) => migrated.push(issue),
            Err(error) => {
                warn!(
                    number,
                    migrated = migrated.len(),
                    error = %error,
                    "Batch migration stopped"
                );
                return Err(BatchError {
                    migrated,
                    source: error,
                });
            }
        }
    }

    Ok(migrated)
}

async fn migrate_number<S: IssueSource>(
    source: &S,
    from: &RepoRef,
    to: &RepoRef,
    number: u64,
    notes: &MigrationNotes,
) -> Result<MigratedIssue, MigrationError> {
    let issue = source
        .get_issue(from, number)
        .await
        .map_err(|e| MigrationError::GetIssue { number, source: e })?;
    migrate_issue(source, from, to, &issue, notes).await
}

async fn post_comment<S: IssueSource>(
    source: &S,
    repo: &RepoRef,
    target: u64,
    index: usize,
    body: &str,
) -> Result<(), MigrationError> {
    source
        .create_comment(repo, target, body)
        .await
        .map_err(|e| MigrationError::CreateComment {
            target,
            index,
            source: e,
        })?;
    Ok(())
}
