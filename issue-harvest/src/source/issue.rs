//! Issue and search page types.

use chrono::{DateTime, Utc};

/// Whether an issue is open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

/// An issue fetched from the remote tracker.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Issue number within its repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body, empty when the issue has none.
    pub body: String,

    /// Login of the issue author.
    pub author: String,

    /// Open or closed.
    pub state: IssueState,

    /// Browser URL of the issue.
    pub html_url: String,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Close time, if the issue is closed.
    pub closed_at: Option<DateTime<Utc>>,
}

/// The parts of an issue copied when it is re-created elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
    pub state: IssueState,
}

impl From<&Issue> for IssueDraft {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            body: issue.body.clone(),
            state: issue.state,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// 1-based page number this page was requested as.
    pub page: u32,

    /// Issues on this page, in the order returned.
    pub issues: Vec<Issue>,

    /// Total number of matches reported by the remote.
    pub total_count: u64,
}

impl From<octocrab::models::issues::Issue> for Issue {
    fn from(issue: octocrab::models::issues::Issue) -> Self {
        let state = match issue.state {
            octocrab::models::IssueState::Closed => IssueState::Closed,
            _ => IssueState::Open,
        };
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            author: issue.user.login,
            state,
            html_url: issue.html_url.to_string(),
            created_at: issue.created_at,
            closed_at: issue.closed_at,
        }
    }
}
