//! Rate limit information.

/// Rate limit information for a specific resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds until the window resets, or `None` if no wait is needed.
    ///
    /// A wait is needed only when fewer than `threshold` requests remain and
    /// the reset lies in the future relative to `now` (Unix seconds).
    #[must_use]
    pub fn wait_secs(&self, threshold: u32, now: u64) -> Option<u64> {
        if self.remaining >= threshold || self.reset <= now {
            return None;
        }
        Some(self.reset - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wait_with_budget_left() {
        let info = RateLimitInfo {
            remaining: 10,
            reset: 2_000,
            limit: 30,
        };
        assert_eq!(info.wait_secs(5, 1_000), None);
    }

    #[test]
    fn waits_until_reset_when_low() {
        let info = RateLimitInfo {
            remaining: 1,
            reset: 1_090,
            limit: 30,
        };
        assert_eq!(info.wait_secs(5, 1_000), Some(90));
        assert_eq!(info.wait_secs(5, 1_090), None);
    }
}
