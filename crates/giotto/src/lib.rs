//! Giotto - Resilient watsonx.ai Deployment Inference Client
//!
//! Giotto provides a resilient client for a remote, rate-limited,
//! token-authenticated inference API. It tolerates throttling, token
//! expiry, and transient failures, and normalizes both buffered and
//! incrementally-streamed responses into a single structured result.
//!
//! # Features
//!
//! - **Token management**: IAM credential exchange with safety-margined
//!   expiry and forced refresh on 401
//! - **Client-side throttling**: sliding minute/hour request windows with a
//!   proactive wait before sending
//! - **Retry with backoff**: exponential delays with jitter, driven by an
//!   explicit state machine with pure, testable transition decisions
//! - **Memoization**: non-streaming results cached by request fingerprint
//! - **Soft decoding**: parse failures degrade to a raw-content fallback,
//!   never to an error
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use giotto::{ChatMessage, WatsonxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     giotto::telemetry::init_console_telemetry()?;
//!
//!     let client = WatsonxClient::from_env()?;
//!     let messages = vec![ChatMessage::user("Summarize the abstract.")];
//!
//!     let result = client.chat_completion("my-deployment", &messages).await?;
//!     println!("Result: {:?}", result);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Giotto is organized as a workspace with focused crates:
//!
//! - `giotto_core` - Core data types (ChatMessage, CompletionResult, etc.)
//! - `giotto_interface` - Driver trait definitions and the wait observer
//! - `giotto_error` - Error types
//! - `giotto_rate_limit` - Sliding windows, retry policy, configuration
//! - `giotto_cache` - Response memoization
//! - `giotto_models` - The watsonx provider implementation
//!
//! This crate (`giotto`) re-exports everything for convenience.

#![warn(missing_docs)]

pub mod telemetry;

pub use giotto_cache::{CacheEntry, ResponseCache, ResponseCacheConfig};
pub use giotto_core::{ChatMessage, CompletionResult, Fingerprint, Role};
pub use giotto_error::{
    AuthError, AuthErrorKind, CancelledError, ConfigError, GiottoError, GiottoErrorKind,
    GiottoResult, HttpError, RateLimitError, RetryableError, TransportError,
};
pub use giotto_interface::{
    DeploymentDriver, FragmentStream, NoopObserver, Streaming, WaitKind, WaitObserver,
};
pub use giotto_models::{AccessToken, CompletionStream, TokenManager, WatsonxClient};
pub use giotto_rate_limit::{
    GiottoConfig, RateLimitState, RateWindowTracker, RetryConfig, RetryPolicy, WatsonxApiConfig,
    WindowConfig,
};
