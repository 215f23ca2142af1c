//! HTTP error types.

/// Non-success API response with status code and extracted payload.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP {} error: {} at line {} in {}", status, message, line, file)]
pub struct HttpError {
    /// HTTP status code
    pub status: u16,
    /// Machine-readable error payload, or raw body when none was found
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use giotto_error::HttpError;
    ///
    /// let err = HttpError::new(503, "Service unavailable");
    /// assert_eq!(err.status, 503);
    /// ```
    #[track_caller]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
