//! Access to the remote issue tracker.
//!
//! [`IssueSource`] is the capability the extraction pipeline and the
//! migration routine are written against. [`GitHubSource`] implements it on
//! top of octocrab; tests implement it in memory.

mod comment;
mod error;
mod github;
mod issue;
mod repo;

pub use comment::{Comment, ReactionSummary};
pub use error::SourceError;
pub use github::{api_base_url, GitHubSource};
pub use issue::{Issue, IssueDraft, IssueState, SearchPage};
pub use repo::{InvalidRepoRef, RepoRef};

use std::future::Future;

/// Operations consumed from the remote issue tracker.
pub trait IssueSource {
    /// Returns the issues matching `query` on the 1-based `page`, holding at
    /// most `per_page` issues, plus the total match count.
    fn search_issues(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> impl Future<Output = Result<SearchPage, SourceError>>;

    /// Fetches a single issue by number.
    fn get_issue(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> impl Future<Output = Result<Issue, SourceError>>;

    /// Creates an issue from `draft` and returns it with its new number and URL.
    fn create_issue(
        &self,
        repo: &RepoRef,
        draft: &IssueDraft,
    ) -> impl Future<Output = Result<Issue, SourceError>>;

    /// Returns every comment on an issue, oldest first.
    fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> impl Future<Output = Result<Vec<Comment>, SourceError>>;

    /// Appends a comment to an issue.
    fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> impl Future<Output = Result<Comment, SourceError>>;
}
