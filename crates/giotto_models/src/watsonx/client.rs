//! The watsonx deployment client facade.

use crate::watsonx::auth::TokenManager;
use crate::watsonx::executor::{self, ExecEnv, SendState};
use crate::watsonx::stream::CompletionStream;
use crate::watsonx::decode;
use async_trait::async_trait;
use giotto_cache::ResponseCache;
use giotto_core::{ChatMessage, CompletionResult, Fingerprint};
use giotto_error::{ConfigError, GiottoResult, TransportError};
use giotto_interface::{DeploymentDriver, FragmentStream, NoopObserver, Streaming, WaitObserver};
use giotto_rate_limit::{GiottoConfig, RateWindowTracker, RetryPolicy};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Environment variable holding the long-lived API key.
const API_KEY_ENV: &str = "WATSONX_API_KEY";

/// Resilient client for the watsonx.ai deployment inference API.
///
/// Composes a [`TokenManager`], a
/// [`RateWindowTracker`](giotto_rate_limit::RateWindowTracker), and a
/// [`ResponseCache`](giotto_cache::ResponseCache) into one `chat_completion`
/// operation. Tracker and cache state are fields of this instance, so
/// independent clients (for example in tests) never interfere.
///
/// # Example
///
/// ```no_run
/// use giotto_models::WatsonxClient;
/// use giotto_core::ChatMessage;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WatsonxClient::from_env()?;
///
/// let messages = vec![ChatMessage::user("Summarize the abstract.")];
/// let result = client.chat_completion("my-deployment", &messages).await?;
///
/// if let Some(fields) = result.fields() {
///     println!("summary: {:?}", fields.get("summary"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct WatsonxClient {
    http: reqwest::Client,
    auth: TokenManager,
    windows: Mutex<RateWindowTracker>,
    cache: Mutex<ResponseCache>,
    policy: RetryPolicy,
    base_url: String,
    version: String,
    observer: Arc<dyn WaitObserver>,
}

impl std::fmt::Debug for WatsonxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatsonxClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl WatsonxClient {
    /// Create a client with the bundled + user configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use giotto_models::WatsonxClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = WatsonxClient::new("my-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> GiottoResult<Self> {
        let config = GiottoConfig::load()?;
        Ok(Self::with_config(api_key, &config))
    }

    /// Create a client reading the API key from `WATSONX_API_KEY`.
    pub fn from_env() -> GiottoResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        Self::new(api_key)
    }

    /// Create a client from an explicit configuration.
    #[instrument(skip(api_key, config))]
    pub fn with_config(api_key: impl Into<String>, config: &GiottoConfig) -> Self {
        debug!("Creating new watsonx client");
        let http = reqwest::Client::new();
        let auth = TokenManager::new(
            http.clone(),
            api_key,
            config.watsonx.iam_url.clone(),
            config.watsonx.token_safety_margin(),
        );
        Self {
            http,
            auth,
            windows: Mutex::new(RateWindowTracker::new(
                config.windows.per_minute,
                config.windows.per_hour,
            )),
            cache: Mutex::new(ResponseCache::new(config.cache.clone())),
            policy: config.retry.policy(),
            base_url: config.watsonx.base_url.clone(),
            version: config.watsonx.version.clone(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach an observer for wait-time progress reporting.
    pub fn with_observer(mut self, observer: Arc<dyn WaitObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Send a conversation and decode the buffered response.
    ///
    /// On a cache hit the entire pipeline is short-circuited: no token
    /// check, no rate-limit check, no HTTP call.
    #[instrument(skip(self, messages), fields(deployment_id, message_count = messages.len()))]
    pub async fn chat_completion(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<CompletionResult> {
        self.chat_completion_inner(deployment_id, messages, None)
            .await
    }

    /// [`chat_completion`](Self::chat_completion) honoring a cancellation
    /// token at every suspension point.
    #[instrument(skip(self, messages, cancel), fields(deployment_id))]
    pub async fn chat_completion_with_cancel(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
    ) -> GiottoResult<CompletionResult> {
        self.chat_completion_inner(deployment_id, messages, Some(cancel))
            .await
    }

    /// Send a conversation and stream the response incrementally.
    ///
    /// Streaming outputs are not memoized: partial content is not a stable
    /// cache key target, so this path bypasses the cache entirely.
    #[instrument(skip(self, messages), fields(deployment_id, message_count = messages.len()))]
    pub async fn chat_completion_stream(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<CompletionStream> {
        self.stream_inner(deployment_id, messages, None).await
    }

    /// [`chat_completion_stream`](Self::chat_completion_stream) honoring a
    /// cancellation token at every suspension point before the stream opens.
    #[instrument(skip(self, messages, cancel), fields(deployment_id))]
    pub async fn chat_completion_stream_with_cancel(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
    ) -> GiottoResult<CompletionStream> {
        self.stream_inner(deployment_id, messages, Some(cancel))
            .await
    }

    /// Requests recorded inside the sliding minute window.
    pub fn requests_in_last_minute(&self) -> usize {
        self.windows.lock().unwrap().requests_in_last_minute()
    }

    /// Requests recorded inside the sliding hour window.
    pub fn requests_in_last_hour(&self) -> usize {
        self.windows.lock().unwrap().requests_in_last_hour()
    }

    /// Drop every cached completion. Explicit operator action.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }

    /// Number of memoized completions.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    async fn chat_completion_inner(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
        cancel: Option<&CancellationToken>,
    ) -> GiottoResult<CompletionResult> {
        Self::check_deployment_id(deployment_id)?;

        debug!(state = %SendState::CheckingCache, "Consulting response cache");
        let fingerprint = Fingerprint::of_messages(messages);
        if let Some(hit) = self.cache.lock().unwrap().get(&fingerprint) {
            debug!("Using cached response");
            return Ok(hit);
        }

        let response = self
            .send(deployment_id, messages, false, cancel)
            .await?;
        let body = response.text().await.map_err(|e| {
            TransportError::new(format!("Failed to read response body: {}", e))
        })?;

        let result = decode::decode_body(&body);
        self.cache
            .lock()
            .unwrap()
            .insert(fingerprint, result.clone());
        Ok(result)
    }

    async fn stream_inner(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
        cancel: Option<&CancellationToken>,
    ) -> GiottoResult<CompletionStream> {
        Self::check_deployment_id(deployment_id)?;

        let response = self.send(deployment_id, messages, true, cancel).await?;
        Ok(CompletionStream::from_response(response))
    }

    /// Drive one request through the retrying executor.
    async fn send(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
        streaming: bool,
        cancel: Option<&CancellationToken>,
    ) -> GiottoResult<reqwest::Response> {
        let endpoint = if streaming {
            "text/generation_stream"
        } else {
            "text/generation"
        };
        let url = format!(
            "{}/deployments/{}/{}",
            self.base_url, deployment_id, endpoint
        );
        let body = serde_json::json!({ "messages": messages });

        let env = ExecEnv {
            windows: &self.windows,
            policy: &self.policy,
            observer: self.observer.as_ref(),
            cancel,
        };
        executor::run_send(env, &self.auth, || {
            self.http
                .post(&url)
                .query(&[("version", self.version.as_str())])
                .json(&body)
        })
        .await
    }

    fn check_deployment_id(deployment_id: &str) -> GiottoResult<()> {
        if deployment_id.trim().is_empty() {
            return Err(ConfigError::new("deployment_id must not be empty").into());
        }
        Ok(())
    }
}

#[async_trait]
impl DeploymentDriver for WatsonxClient {
    async fn chat_completion(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<CompletionResult> {
        WatsonxClient::chat_completion(self, deployment_id, messages).await
    }

    fn provider_name(&self) -> &'static str {
        "watsonx"
    }
}

#[async_trait]
impl Streaming for WatsonxClient {
    async fn generate_stream(
        &self,
        deployment_id: &str,
        messages: &[ChatMessage],
    ) -> GiottoResult<FragmentStream> {
        let stream = self.chat_completion_stream(deployment_id, messages).await?;
        Ok(Box::pin(stream))
    }
}
