//! Runner configuration.

use crate::rate_limit::RetryPolicy;

/// Connection settings for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Token used for API calls.
    token: String,
    /// Web URL of a GitHub Enterprise host, if not github.com.
    github_url: Option<String>,
    /// Retry policy for throttled calls.
    retry: RetryPolicy,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(token: String, github_url: Option<String>) -> Self {
        Self {
            token,
            github_url: github_url.filter(|u| !u.trim().is_empty()),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets a custom retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the configured token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the configured host URL.
    pub fn github_url(&self) -> Option<&str> {
        self.github_url.as_deref()
    }

    /// Returns the retry policy.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}
