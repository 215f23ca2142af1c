//! Error types for the Giotto library.
//!
//! This crate provides the foundation error types used throughout the Giotto
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use giotto_error::{GiottoResult, TransportError};
//!
//! fn fetch_data() -> GiottoResult<String> {
//!     Err(TransportError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod cancelled;
mod config;
mod error;
mod http;
mod rate_limit;
mod retryable;
mod transport;

pub use auth::{AuthError, AuthErrorKind};
pub use cancelled::CancelledError;
pub use config::ConfigError;
pub use error::{GiottoError, GiottoErrorKind, GiottoResult};
pub use http::HttpError;
pub use rate_limit::RateLimitError;
pub use retryable::RetryableError;
pub use transport::TransportError;
