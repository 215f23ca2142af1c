//! Sliding request windows.

use derive_getters::Getters;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// Span of the short window.
const MINUTE_WINDOW: Duration = Duration::from_secs(60);
/// Span of the long window.
const HOUR_WINDOW: Duration = Duration::from_secs(3600);
/// Small buffer added to the computed wait so the oldest instant has
/// actually left the window by the time we send.
const WAIT_BUFFER: Duration = Duration::from_millis(100);

/// Snapshot of the current rate-limit situation.
///
/// Derived, never stored: recomputed from the request windows on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RateLimitState {
    /// Minute ceiling reached
    minute_exceeded: bool,
    /// Hour ceiling reached
    hour_exceeded: bool,
    /// Advisory wait before the next request is permitted
    wait: Duration,
}

impl RateLimitState {
    /// True when either window is at its ceiling.
    pub fn any_exceeded(&self) -> bool {
        self.minute_exceeded || self.hour_exceeded
    }
}

/// Sliding 1-minute/1-hour request windows with configurable ceilings.
///
/// Request instants are recorded at send time, independent of outcome.
/// Entries older than the window boundary are evicted lazily on each check.
/// State is owned by one client instance, never global.
///
/// # Example
///
/// ```
/// use giotto_rate_limit::RateWindowTracker;
///
/// let mut tracker = RateWindowTracker::new(5, 100);
/// tracker.record();
/// let state = tracker.check_limits();
/// assert!(!state.minute_exceeded());
/// ```
#[derive(Debug, Clone)]
pub struct RateWindowTracker {
    minute: VecDeque<Instant>,
    hour: VecDeque<Instant>,
    minute_ceiling: usize,
    hour_ceiling: usize,
}

impl RateWindowTracker {
    /// Create a tracker with the given per-minute and per-hour ceilings.
    pub fn new(minute_ceiling: usize, hour_ceiling: usize) -> Self {
        Self {
            minute: VecDeque::new(),
            hour: VecDeque::new(),
            minute_ceiling,
            hour_ceiling,
        }
    }

    /// Record a request instant in both windows.
    pub fn record(&mut self) {
        self.record_at(Instant::now());
    }

    /// Record a request at an explicit instant.
    pub fn record_at(&mut self, at: Instant) {
        self.minute.push_back(at);
        self.hour.push_back(at);
    }

    /// Purge expired instants, then compare counts to the ceilings.
    ///
    /// The wait is computed from the oldest surviving instant in the minute
    /// window: time until it leaves the window, plus a small buffer. Zero
    /// when the minute ceiling has not been reached.
    pub fn check_limits(&mut self) -> RateLimitState {
        self.check_limits_at(Instant::now())
    }

    /// [`check_limits`](Self::check_limits) against an explicit now.
    pub fn check_limits_at(&mut self, now: Instant) -> RateLimitState {
        self.purge(now);

        let minute_exceeded = self.minute.len() >= self.minute_ceiling;
        let hour_exceeded = self.hour.len() >= self.hour_ceiling;
        let wait = if minute_exceeded {
            self.wait_until_slot(now)
        } else {
            Duration::ZERO
        };

        debug!(
            minute_count = self.minute.len(),
            hour_count = self.hour.len(),
            minute_exceeded,
            hour_exceeded,
            wait_ms = wait.as_millis() as u64,
            "Checked rate limit windows"
        );

        RateLimitState {
            minute_exceeded,
            hour_exceeded,
            wait,
        }
    }

    /// Requests currently inside the minute window.
    pub fn requests_in_last_minute(&mut self) -> usize {
        self.purge(Instant::now());
        self.minute.len()
    }

    /// Requests currently inside the hour window.
    pub fn requests_in_last_hour(&mut self) -> usize {
        self.purge(Instant::now());
        self.hour.len()
    }

    /// Minute ceiling currently in force.
    pub fn minute_ceiling(&self) -> usize {
        self.minute_ceiling
    }

    /// Hour ceiling currently in force.
    pub fn hour_ceiling(&self) -> usize {
        self.hour_ceiling
    }

    fn purge(&mut self, now: Instant) {
        Self::purge_window(&mut self.minute, now, MINUTE_WINDOW);
        Self::purge_window(&mut self.hour, now, HOUR_WINDOW);
    }

    fn purge_window(window: &mut VecDeque<Instant>, now: Instant, span: Duration) {
        while let Some(oldest) = window.front() {
            if now.saturating_duration_since(*oldest) > span {
                window.pop_front();
            } else {
                break;
            }
        }
    }

    fn wait_until_slot(&self, now: Instant) -> Duration {
        match self.minute.front() {
            Some(oldest) => {
                let leaves_at = *oldest + MINUTE_WINDOW;
                leaves_at.saturating_duration_since(now) + WAIT_BUFFER
            }
            None => Duration::ZERO,
        }
    }
}

impl Default for RateWindowTracker {
    fn default() -> Self {
        Self::new(5, 100)
    }
}
