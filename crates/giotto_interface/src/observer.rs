//! Wait observation for interactive progress reporting.

use std::time::Duration;

/// Why the executor is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum WaitKind {
    /// Proactive wait before sending, minute ceiling already reached
    RateLimit,
    /// Exponential backoff between retry attempts
    Backoff,
}

/// Observer notified once per tick while the executor waits.
///
/// Interactive countdowns are a presentation concern; the executor only
/// reports that it is waiting and for how much longer. Implementations must
/// be cheap and non-blocking.
pub trait WaitObserver: Send + Sync {
    /// Called roughly once per second during a wait, with time remaining.
    fn on_wait_tick(&self, kind: WaitKind, remaining: Duration);
}

/// Observer that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl WaitObserver for NoopObserver {
    fn on_wait_tick(&self, _kind: WaitKind, _remaining: Duration) {}
}
