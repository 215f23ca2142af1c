//! Trait definitions for deployment-backed inference clients.

use crate::FragmentStream;
use async_trait::async_trait;
use giotto_core::{ChatMessage, CompletionResult};
use giotto_error::GiottoResult;

/// Core trait for clients of deployment-backed inference endpoints.
///
/// This provides the minimal interface for buffered text generation against
/// a named deployment. Additional capabilities are exposed through optional
/// traits.
#[async_trait]
pub trait DeploymentDriver: Send + Sync {
    /// Send a conversation to a deployment and decode the buffered response.
    async fn chat_completion(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<CompletionResult>;

    /// Provider name (e.g., "watsonx").
    fn provider_name(&self) -> &'static str;
}

/// Trait for clients that support streaming responses.
#[async_trait]
pub trait Streaming: DeploymentDriver {
    /// Generate a streaming response.
    ///
    /// Returns a stream that yields decoded text fragments as they arrive
    /// from the API. Streaming responses bypass any response cache.
    async fn generate_stream(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<FragmentStream>;
}
