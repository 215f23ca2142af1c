//! Core data types for the Giotto watsonx client library.
//!
//! This crate provides the foundation data types shared across the Giotto
//! workspace: conversation messages, decoded completion results, and request
//! fingerprints for memoization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod fingerprint;
mod message;
mod role;

pub use completion::CompletionResult;
pub use fingerprint::Fingerprint;
pub use message::ChatMessage;
pub use role::Role;
