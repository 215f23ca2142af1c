//! Provider integrations for Giotto.
//!
//! Currently one provider: the IBM watsonx.ai deployment inference API.
//! The [`watsonx`] module supplies a resilient client that tolerates
//! throttling, token expiry, transient failures, and both buffered and
//! incrementally-streamed responses.

pub mod watsonx;

pub use watsonx::{AccessToken, CompletionStream, TokenManager, WatsonxClient};
