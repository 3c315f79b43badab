//! Rate limiting utilities for GitHub API.
//!
//! Calls are paced in two ways: a budget check against the `rate_limit`
//! endpoint before each call, and exponential backoff when the remote
//! throttles anyway.

mod backoff;
mod info;

pub use backoff::{with_backoff, RetryPolicy};
pub use info::RateLimitInfo;

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit bucket a call draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    /// Issue search.
    Search,
    /// Issues and comments.
    Core,
}

/// Reads the current budget of `bucket`.
pub(crate) async fn check_rate_limit(
    octocrab: &Octocrab,
    bucket: Bucket,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let rate = match bucket {
        Bucket::Search => &rate_limit.resources.search,
        Bucket::Core => &rate_limit.resources.core,
    };

    Ok(RateLimitInfo {
        remaining: u32::try_from(rate.remaining).unwrap_or(u32::MAX),
        reset: rate.reset,
        limit: u32::try_from(rate.limit).unwrap_or(u32::MAX),
    })
}

/// Sleeps until the window resets when the budget is nearly spent.
///
/// Returns true if it slept. The wait is capped at `MAX_WAIT_SECS`.
pub(crate) async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait_secs) = info.wait_secs(MIN_REMAINING_THRESHOLD, now) else {
        return false;
    };

    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit resets too far ahead, capping wait"
        );
    }

    let wait_secs = wait_secs.min(MAX_WAIT_SECS);
    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs,
        "Rate limit nearly spent, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    true
}

/// Checks `bucket` and waits out a nearly spent window before a call.
///
/// # Errors
///
/// Returns an error if the rate limit endpoint cannot be read.
pub(crate) async fn ensure_rate_limit(
    octocrab: &Octocrab,
    bucket: Bucket,
) -> Result<(), octocrab::Error> {
    let info = check_rate_limit(octocrab, bucket).await?;
    wait_if_needed(&info).await;
    Ok(())
}
