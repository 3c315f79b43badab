//! [`IssueSource`] backed by the GitHub REST API.

use super::error::classify;
use super::{
    Comment, Issue, IssueDraft, IssueSource, IssueState, ReactionSummary, RepoRef, SearchPage,
    SourceError,
};
use crate::rate_limit::{ensure_rate_limit, with_backoff, Bucket, RetryPolicy};
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};
use url::Url;

/// Comments requested per page when listing a thread.
const COMMENTS_PER_PAGE: u8 = 100;

/// Public GitHub API host.
const PUBLIC_API_HOST: &str = "api.github.com";

/// GitHub (or GitHub Enterprise) issue tracker.
#[derive(Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
    retry: RetryPolicy,
}

impl GitHubSource {
    /// Wraps an authenticated client.
    pub fn new(octocrab: Octocrab, retry: RetryPolicy) -> Self {
        Self { octocrab, retry }
    }

    /// Builds a token-authenticated client, optionally against an enterprise host.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URI is rejected or the client cannot be built.
    pub fn connect(
        token: &str,
        api_base: Option<&Url>,
        retry: RetryPolicy,
    ) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(base) = api_base {
            builder = builder.base_uri(base.as_str())?;
        }
        Ok(Self::new(builder.build()?, retry))
    }

    async fn search_once(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage, SourceError> {
        if let Err(e) = ensure_rate_limit(&self.octocrab, Bucket::Search).await {
            debug!(error = %e, "Search rate limit check unavailable, proceeding");
        }
        let results = self
            .octocrab
            .search()
            .issues_and_pull_requests(query)
            .per_page(per_page)
            .page(page)
            .send()
            .await
            .map_err(|e| classify(e, format!("search page {page}")))?;

        Ok(SearchPage {
            page,
            total_count: results.total_count.unwrap_or_default(),
            issues: results.items.into_iter().map(Issue::from).collect(),
        })
    }

    async fn get_once(&self, repo: &RepoRef, number: u64) -> Result<Issue, SourceError> {
        self.ensure_core_budget().await;
        let issue = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .get(number)
            .await
            .map_err(|e| classify(e, format!("issue {repo}#{number}")))?;
        Ok(issue.into())
    }

    async fn create_once(&self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue, SourceError> {
        self.ensure_core_budget().await;
        let created = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .create(&draft.title)
            .body(&draft.body)
            .send()
            .await
            .map_err(|e| classify(e, format!("repository {repo}")))?;
        Ok(created.into())
    }

    async fn close_once(&self, repo: &RepoRef, number: u64) -> Result<Issue, SourceError> {
        self.ensure_core_budget().await;
        let closed = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .update(number)
            .state(octocrab::models::IssueState::Closed)
            .send()
            .await
            .map_err(|e| classify(e, format!("issue {repo}#{number}")))?;
        Ok(closed.into())
    }

    async fn list_comments_page(
        &self,
        route: &str,
        page: u32,
    ) -> Result<Vec<ApiComment>, SourceError> {
        self.ensure_core_budget().await;
        let params = PageParams {
            per_page: COMMENTS_PER_PAGE,
            page,
        };
        self.octocrab
            .get(route, Some(&params))
            .await
            .map_err(|e| classify(e, route.to_string()))
    }

    async fn comment_once(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, SourceError> {
        self.ensure_core_budget().await;
        let route = comments_route(repo, number);
        let created: ApiComment = self
            .octocrab
            .post(&route, Some(&CommentBody { body }))
            .await
            .map_err(|e| classify(e, format!("issue {repo}#{number}")))?;
        Ok(created.into())
    }

    async fn ensure_core_budget(&self) {
        if let Err(e) = ensure_rate_limit(&self.octocrab, Bucket::Core).await {
            debug!(error = %e, "Core rate limit check unavailable, proceeding");
        }
    }
}

impl IssueSource for GitHubSource {
    async fn search_issues(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage, SourceError> {
        with_backoff(&self.retry, || self.search_once(query, page, per_page)).await
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue, SourceError> {
        with_backoff(&self.retry, || self.get_once(repo, number)).await
    }

    async fn create_issue(&self, repo: &RepoRef, draft: &IssueDraft) -> Result<Issue, SourceError> {
        create_then_close(
            &self.retry,
            draft.state,
            || self.create_once(repo, draft),
            |number| self.close_once(repo, number),
        )
        .await
    }

    async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>, SourceError> {
        let route = comments_route(repo, number);
        let mut comments = Vec::new();
        let mut page = 1;

        loop {
            let batch =
                with_backoff(&self.retry, || self.list_comments_page(&route, page)).await?;
            let fetched = batch.len();
            comments.extend(batch.into_iter().map(Comment::from));

            if fetched < usize::from(COMMENTS_PER_PAGE) {
                break;
            }
            page += 1;
        }

        debug!(repo = %repo, number, count = comments.len(), "Listed comments");
        Ok(comments)
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, SourceError> {
        with_backoff(&self.retry, || self.comment_once(repo, number, body)).await
    }
}

/// Creates an issue, then closes it when `state` is closed.
///
/// GitHub ignores the state on create. Each step is retried on its own, so
/// a throttled close never re-posts the issue.
async fn create_then_close<C, CFut, U, UFut>(
    retry: &RetryPolicy,
    state: IssueState,
    create: C,
    mut close: U,
) -> Result<Issue, SourceError>
where
    C: FnMut() -> CFut,
    CFut: Future<Output = Result<Issue, SourceError>>,
    U: FnMut(u64) -> UFut,
    UFut: Future<Output = Result<Issue, SourceError>>,
{
    let created = with_backoff(retry, create).await?;
    if state != IssueState::Closed {
        return Ok(created);
    }

    let number = created.number;
    with_backoff(retry, || close(number)).await.inspect_err(|e| {
        warn!(number, error = %e, "Created issue could not be closed");
    })
}

/// Resolves the REST API base for a GitHub web or API URL.
///
/// `github.com` maps to the public API. Any other host is treated as
/// GitHub Enterprise, whose API lives under `/api/v3/`.
///
/// # Errors
///
/// Returns an error if `url` is not a valid absolute URL.
pub fn api_base_url(url: &str) -> Result<Url, url::ParseError> {
    let mut parsed = Url::parse(url.trim())?;
    match parsed.host_str() {
        Some("github.com") | Some(PUBLIC_API_HOST) => {
            return Url::parse(&format!("https://{PUBLIC_API_HOST}/"));
        }
        _ => {}
    }

    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    if parsed.path().ends_with("/api/v3/") {
        return Ok(parsed);
    }
    parsed.join("api/v3/")
}

fn comments_route(repo: &RepoRef, number: u64) -> String {
    format!("/repos/{}/{}/issues/{number}/comments", repo.owner, repo.name)
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Comment as returned by the REST API, including reaction counts.
#[derive(Deserialize)]
struct ApiComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    author_association: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    reactions: Option<ReactionSummary>,
}

#[derive(Deserialize)]
struct ApiUser {
    login: String,
}

impl From<ApiComment> for Comment {
    fn from(comment: ApiComment) -> Self {
        Self {
            id: comment.id,
            body: comment.body.unwrap_or_default(),
            author: comment.user.map(|u| u.login).unwrap_or_default(),
            author_association: comment.author_association,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            reactions: comment.reactions,
        }
    }
}
