//! Top-level error wrapper types.

use crate::{AuthError, CancelledError, ConfigError, HttpError, RateLimitError, TransportError};

/// This is the foundation error enum for the Giotto workspace.
///
/// Each variant carries a specific error type so callers can distinguish
/// rate limiting from genuine failure without string matching.
///
/// # Examples
///
/// ```
/// use giotto_error::{GiottoError, HttpError};
///
/// let http_err = HttpError::new(500, "Internal error");
/// let err: GiottoError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP 500"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GiottoErrorKind {
    /// Credential exchange failed or was malformed
    #[from(AuthError)]
    Auth(AuthError),
    /// Non-2xx API response, retries exhausted
    #[from(HttpError)]
    Http(HttpError),
    /// Connection or timeout failure, retries exhausted
    #[from(TransportError)]
    Transport(TransportError),
    /// Retries exhausted under 429
    #[from(RateLimitError)]
    RateLimit(RateLimitError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Caller-requested cancellation
    #[from(CancelledError)]
    Cancelled(CancelledError),
}

/// Giotto error with kind discrimination.
///
/// # Examples
///
/// ```
/// use giotto_error::{GiottoResult, ConfigError};
///
/// fn might_fail() -> GiottoResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Giotto Error: {}", _0)]
pub struct GiottoError(Box<GiottoErrorKind>);

impl GiottoError {
    /// Create a new error from a kind.
    pub fn new(kind: GiottoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GiottoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GiottoErrorKind
impl<T> From<T> for GiottoError
where
    T: Into<GiottoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Giotto operations.
///
/// # Examples
///
/// ```
/// use giotto_error::{GiottoResult, TransportError};
///
/// fn fetch_data() -> GiottoResult<String> {
///     Err(TransportError::new("Connection timed out"))?
/// }
/// ```
pub type GiottoResult<T> = std::result::Result<T, GiottoError>;
