//! Rate limiting and retry policy for the Giotto watsonx client library.
//!
//! This crate provides client-side throttling to comply with API quotas:
//! sliding request windows that compute how long to wait before the next
//! request is permitted, and the exponential-backoff-with-jitter schedule
//! the executor follows when the service pushes back anyway.

mod config;
mod policy;
mod window;

pub use config::{GiottoConfig, RetryConfig, WatsonxApiConfig, WindowConfig};
pub use policy::{RetryPolicy, RetryPolicyBuilder};
pub use window::{RateLimitState, RateWindowTracker};
