//! Transport-level error types.

/// Connection or timeout failure before any HTTP status was received.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", message, line, file)]
pub struct TransportError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use giotto_error::TransportError;
    ///
    /// let err = TransportError::new("Connection reset by peer");
    /// assert!(err.message.contains("reset"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
