//! Response memoization for the Giotto watsonx client library.
//!
//! Non-streaming completions are expensive and rate-limited; this crate maps
//! a request fingerprint to its decoded result so a repeated prompt skips
//! the network entirely.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, ResponseCache, ResponseCacheConfig, ResponseCacheConfigBuilder};
