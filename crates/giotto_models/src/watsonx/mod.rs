//! IBM watsonx.ai deployment inference client.
//!
//! # Architecture
//!
//! The [`WatsonxClient`] composes four collaborators into one
//! `chat_completion` operation:
//!
//! - [`TokenManager`] owns the IAM access credential and refreshes on demand
//! - `RateWindowTracker` computes the proactive wait before each send
//! - `ResponseCache` memoizes decoded non-streaming results
//! - the [`executor`] drives the retry loop as an explicit state machine
//!
//! Buffered and streaming responses both normalize through [`decode`] into a
//! [`CompletionResult`](giotto_core::CompletionResult): a structured mapping
//! of named result fields when the payload parses, a raw-content fallback
//! when it does not.

pub mod auth;
pub mod client;
pub mod decode;
pub mod executor;
pub mod stream;

pub use auth::{AccessToken, TokenManager};
pub use client::WatsonxClient;
pub use stream::CompletionStream;
