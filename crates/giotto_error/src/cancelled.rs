//! Cancellation outcome types.

/// A caller-supplied cancellation signal fired at a suspension point.
///
/// Not a failure of the remote service: the pending wait or round trip was
/// aborted on request instead of continuing the retry loop.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cancelled: {} at line {} in {}", reason, line, file)]
pub struct CancelledError {
    /// Which suspension point observed the cancellation
    pub reason: String,
    /// Line number where the cancellation was observed
    pub line: u32,
    /// File where the cancellation was observed
    pub file: &'static str,
}

impl CancelledError {
    /// Create a new CancelledError at the current location.
    #[track_caller]
    pub fn new(reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
