//! Issue source error types.

use thiserror::Error;

/// Errors surfaced by an [`IssueSource`](super::IssueSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network, authentication or any other failure reported by the remote.
    #[error("GitHub API error: {0}")]
    Transport(String),

    /// The remote signalled throttling.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The requested issue or repository does not exist.
    #[error("Not found: {what}")]
    NotFound { what: String },
}

impl SourceError {
    /// Classifies an HTTP failure by status code and message.
    ///
    /// GitHub reports secondary rate limits as `403` with a message that
    /// mentions the rate limit, so the message is inspected as well.
    pub fn from_status(status: u16, message: &str, what: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound { what: what.into() },
            429 => Self::RateLimited,
            403 if message.to_lowercase().contains("rate limit") => Self::RateLimited,
            _ => Self::Transport(format!("{status}: {message}")),
        }
    }

    /// Returns true if this error is worth retrying after a delay.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Converts an octocrab error into a [`SourceError`].
pub(crate) fn classify(error: octocrab::Error, what: impl Into<String>) -> SourceError {
    match &error {
        octocrab::Error::GitHub { source, .. } => {
            SourceError::from_status(source.status_code.as_u16(), &source.message, what)
        }
        _ => SourceError::Transport(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found() {
        let error = SourceError::from_status(404, "Not Found", "issue acme/ops#7");
        assert!(matches!(error, SourceError::NotFound { ref what } if what == "issue acme/ops#7"));
    }

    #[test]
    fn classifies_rate_limits() {
        assert!(SourceError::from_status(429, "Too Many Requests", "search").is_rate_limited());
        assert!(SourceError::from_status(
            403,
            "You have exceeded a secondary rate limit",
            "search"
        )
        .is_rate_limited());
    }

    #[test]
    fn plain_forbidden_is_transport() {
        let error = SourceError::from_status(403, "Resource not accessible", "create issue");
        assert!(matches!(error, SourceError::Transport(_)));
        assert!(!error.is_rate_limited());
    }
}
