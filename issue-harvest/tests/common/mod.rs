#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use issue_harvest::source::{
    Comment, Issue, IssueDraft, IssueSource, IssueState, RepoRef, SearchPage, SourceError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory issue tracker that records every call made against it.
#[derive(Default)]
pub struct MockSource {
    /// Total reported with every search page.
    pub total_count: u64,
    /// Search results by page number. Missing pages come back empty.
    pub pages: HashMap<u32, Vec<Issue>>,
    /// Search pages that fail with a transport error.
    pub failing_pages: HashSet<u32>,
    /// Issues returned by `get_issue`.
    pub issues: HashMap<u64, Issue>,
    /// Comment threads by issue number.
    pub comments: HashMap<u64, Vec<Comment>>,
    /// Issue numbers whose comment listing fails.
    pub failing_comment_lists: HashSet<u64>,
    /// Whether every `create_issue` call fails.
    pub failing_creates: bool,
    /// 0-based `create_comment` call that fails; later calls succeed.
    pub failing_comment_at: Option<usize>,

    pub search_calls: Mutex<Vec<u32>>,
    pub created_issues: Mutex<Vec<(RepoRef, IssueDraft)>>,
    pub created_comments: Mutex<Vec<(RepoRef, u64, String)>>,
    pub comment_attempts: AtomicUsize,
}

impl MockSource {
    pub fn searched_pages(&self) -> Vec<u32> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn comment_bodies(&self) -> Vec<String> {
        self.created_comments
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, body)| body.clone())
            .collect()
    }
}

impl IssueSource for MockSource {
    async fn search_issues(
        &self,
        _query: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<SearchPage, SourceError> {
        self.search_calls.lock().unwrap().push(page);
        if self.failing_pages.contains(&page) {
            return Err(SourceError::Transport(format!("502: page {page} unavailable")));
        }
        Ok(SearchPage {
            page,
            issues: self.pages.get(&page).cloned().unwrap_or_default(),
            total_count: self.total_count,
        })
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue, SourceError> {
        self.issues
            .get(&number)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                what: format!("{repo}#{number}"),
            })
    }

    async fn create_issue(&self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue, SourceError> {
        if self.failing_creates {
            return Err(SourceError::Transport(format!("422: cannot create issue in {repo}")));
        }
        let mut created = self.created_issues.lock().unwrap();
        created.push((repo.clone(), draft.clone()));
        let number = 1000 + created.len() as u64;
        Ok(Issue {
            number,
            title: draft.title.clone(),
            body: draft.body.clone(),
            author: "migration-bot".to_string(),
            state: draft.state,
            html_url: format!("https://github.example.com/{repo}/issues/{number}"),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            closed_at: None,
        })
    }

    async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>, SourceError> {
        if self.failing_comment_lists.contains(&number) {
            return Err(SourceError::Transport(format!(
                "500: comments of {repo}#{number} unavailable"
            )));
        }
        Ok(self.comments.get(&number).cloned().unwrap_or_default())
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, SourceError> {
        let attempt = self.comment_attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing_comment_at == Some(attempt) {
            return Err(SourceError::Transport(format!(
                "502: comment on {repo}#{number} failed"
            )));
        }
        let mut created = self.created_comments.lock().unwrap();
        created.push((repo.clone(), number, body.to_string()));
        Ok(Comment {
            id: created.len() as u64,
            body: body.to_string(),
            author: "migration-bot".to_string(),
            author_association: "MEMBER".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
            reactions: None,
        })
    }
}

/// A closed issue in `mantle/ops`.
pub fn issue(number: u64, body: &str) -> Issue {
    Issue {
        number,
        title: format!("[Invoice Delivery] ticket {number}"),
        body: body.to_string(),
        author: "jdoe".to_string(),
        state: IssueState::Closed,
        html_url: format!("https://github.example.com/mantle/ops/issues/{number}"),
        created_at: Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap(),
        closed_at: Some(Utc.with_ymd_and_hms(2023, 5, 3, 16, 30, 0).unwrap()),
    }
}

/// `count` issues numbered from `first`.
pub fn issues(first: u64, count: u64) -> Vec<Issue> {
    (first..first + count)
        .map(|n| issue(n, &format!("User Name: user{n}\nID: {n}\nmail: user{n}@example.com")))
        .collect()
}

pub fn comment(id: u64, author: &str, body: &str) -> Comment {
    Comment {
        id,
        body: body.to_string(),
        author: author.to_string(),
        author_association: "CONTRIBUTOR".to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 5, 2, 9, 0, 0).unwrap(),
        updated_at: None,
        reactions: None,
    }
}
