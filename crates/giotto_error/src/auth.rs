//! Authentication error types.

/// Specific failure modes of the credential exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuthErrorKind {
    /// The token request never completed (connection error, timeout).
    #[display("Token request failed: {}", _0)]
    Exchange(String),
    /// The identity endpoint answered with a non-success status.
    #[display("Identity endpoint returned {}: {}", status, message)]
    Status {
        /// HTTP status code from the identity endpoint
        status: u16,
        /// Response body or error message
        message: String,
    },
    /// The token response was missing a required field.
    #[display("Malformed token response: {}", _0)]
    MalformedResponse(String),
    /// The service kept answering 401 after a forced refresh.
    #[display("Still unauthorized after token refresh")]
    RefreshExhausted,
}

impl AuthErrorKind {
    /// Check if this failure is worth retrying with a fresh attempt.
    ///
    /// Network-level exchange failures and server-side errors are transient;
    /// malformed responses and post-refresh 401s are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AuthErrorKind::Exchange(_) => true,
            AuthErrorKind::Status { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            AuthErrorKind::MalformedResponse(_) => false,
            AuthErrorKind::RefreshExhausted => false,
        }
    }
}

/// Authentication error with source location tracking.
///
/// # Examples
///
/// ```
/// use giotto_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::MalformedResponse(
///     "missing access_token".to_string(),
/// ));
/// assert!(format!("{}", err).contains("access_token"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
