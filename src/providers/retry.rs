//! Retry policy for inference requests.
//!
//! HuggingFace answers `503` while a cold model is being loaded. The
//! executor waits a fixed delay and tries again, bounded by
//! [`RetryPolicy::max_attempts`]. Which statuses count as "try again" is
//! part of the policy value rather than hard-coded in the request loop.

use std::time::Duration;

/// Status returned by HuggingFace while a model is warming up.
pub const MODEL_LOADING_STATUS: u16 = 503;

/// Retry behaviour for a single inference call.
///
/// ```rust
/// # use moodlog::RetryPolicy;
/// # use std::time::Duration;
/// let policy = RetryPolicy::new()
///     .max_attempts(3)
///     .delay(Duration::from_millis(200))
///     .retryable_statuses([502, 503]);
/// assert!(policy.should_retry(502, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 2.
    pub max_attempts: u32,
    /// Fixed wait before each retry. Default: 5s.
    pub delay: Duration,
    /// Response statuses that trigger a retry. Default: `[503]`.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_secs(5),
            retryable_statuses: vec![MODEL_LOADING_STATUS],
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default model-loading behaviour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the wait before each retry.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the set of retryable statuses.
    pub fn retryable_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_statuses = statuses.into_iter().collect();
        self
    }

    /// Whether `status` is retryable under this policy.
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Whether attempt number `attempt` (1-based) that ended in `status`
    /// should be followed by another one.
    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_attempts && self.is_retryable(status)
    }
}
