//! Exponential backoff retry policy.

use derive_getters::Getters;
use rand::Rng;
use std::time::Duration;

/// Retry schedule for transient failures.
///
/// The delay before retry attempt `k` (0-indexed) is
/// `min(max_delay, base_delay * 2^k)` plus uniform jitter in `[0.1, 1.0)`
/// seconds. A server-supplied `Retry-After` replaces the exponential term
/// but is still capped and jittered. Delays are non-decreasing in attempt
/// number (mod jitter); the jitter prevents synchronized retry storms
/// across concurrent clients.
///
/// # Examples
///
/// ```
/// use giotto_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries(), &5);
///
/// let delay = policy.backoff_delay(1, None);
/// assert!(delay >= Duration::from_secs(4));
/// assert!(delay < Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
pub struct RetryPolicy {
    /// Maximum retries after the initial attempt
    #[builder(default = "5")]
    max_retries: u32,
    /// First backoff delay; doubles each attempt
    #[builder(default = "Duration::from_secs(2)")]
    base_delay: Duration,
    /// Cap on any single backoff delay, before jitter
    #[builder(default = "Duration::from_secs(60)")]
    max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit limits.
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// True while another retry is permitted after `attempt` (0-indexed)
    /// failed.
    pub fn retries_remaining(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay before retrying attempt `attempt`, with fresh jitter.
    ///
    /// `retry_after` is the server-supplied hint from a 429, when present.
    pub fn backoff_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        self.backoff_delay_with_jitter(attempt, retry_after, Self::sample_jitter())
    }

    /// Delay before retrying attempt `attempt` with an explicit jitter term.
    ///
    /// Pure function of its inputs; [`backoff_delay`](Self::backoff_delay)
    /// supplies the random jitter.
    pub fn backoff_delay_with_jitter(
        &self,
        attempt: u32,
        retry_after: Option<Duration>,
        jitter: Duration,
    ) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        let base = retry_after.unwrap_or(exponential);
        base.min(self.max_delay) + jitter
    }

    /// Uniform jitter in `[0.1, 1.0)` seconds.
    pub fn sample_jitter() -> Duration {
        Duration::from_secs_f64(rand::thread_rng().gen_range(0.1..1.0))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2), Duration::from_secs(60))
    }
}
