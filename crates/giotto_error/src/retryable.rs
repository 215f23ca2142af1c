//! Retry classification for error types.

use crate::{AuthError, GiottoError, GiottoErrorKind, HttpError, TransportError};

/// Trait for errors that support retry logic.
///
/// Transient conditions like 429 (rate limit), 5xx (server trouble), or
/// connection timeouts should return true. Permanent conditions like a
/// malformed token response or an exhausted retry budget should return false.
///
/// # Examples
///
/// ```
/// use giotto_error::{HttpError, RetryableError};
///
/// let err = HttpError::new(503, "Service unavailable");
/// assert!(err.is_retryable());
///
/// let err = HttpError::new(400, "Bad request");
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for HttpError {
    fn is_retryable(&self) -> bool {
        matches!(self.status, 408 | 429 | 500 | 502 | 503 | 504)
    }
}

impl RetryableError for TransportError {
    fn is_retryable(&self) -> bool {
        true
    }
}

impl RetryableError for AuthError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl RetryableError for GiottoError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            GiottoErrorKind::Auth(e) => e.is_retryable(),
            GiottoErrorKind::Http(e) => e.is_retryable(),
            GiottoErrorKind::Transport(e) => e.is_retryable(),
            // Exhaustion and local conditions are terminal.
            GiottoErrorKind::RateLimit(_) => false,
            GiottoErrorKind::Config(_) => false,
            GiottoErrorKind::Cancelled(_) => false,
        }
    }
}
