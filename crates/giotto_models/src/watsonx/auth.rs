//! IAM token management.

use derive_getters::Getters;
use giotto_error::{AuthError, AuthErrorKind, GiottoResult};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

/// Grant type for the API-key credential exchange.
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// A bearer credential and its lifetime.
///
/// Owned exclusively by [`TokenManager`]; replaced wholesale on refresh,
/// never mutated in place.
#[derive(Debug, Clone, Getters)]
pub struct AccessToken {
    value: String,
    acquired_at: Instant,
    expires_in: Duration,
}

impl AccessToken {
    /// Wrap a freshly exchanged credential.
    pub fn new(value: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            value: value.into(),
            acquired_at: Instant::now(),
            expires_in,
        }
    }

    /// Check validity against the current time.
    ///
    /// A token is valid only while `now < acquired_at + expires_in - margin`.
    pub fn is_valid(&self, margin: Duration) -> bool {
        self.is_valid_at(Instant::now(), margin)
    }

    /// [`is_valid`](Self::is_valid) against an explicit now.
    pub fn is_valid_at(&self, now: Instant, margin: Duration) -> bool {
        let expires_at = self.acquired_at + self.expires_in;
        now + margin < expires_at
    }
}

/// Fields of the identity endpoint response we consume.
///
/// Both fields are required; either one missing is a malformed response.
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Owns the access credential and refreshes it on demand.
///
/// `token()` returns the held credential while it satisfies the validity
/// invariant and performs the credential exchange otherwise. A 401 from any
/// downstream call should be followed by [`invalidate`](Self::invalidate),
/// which presumes the token stale and forces the next `token()` to
/// re-authenticate.
///
/// Authentication failures are never retried here; the executor decides
/// whether to retry the outer request.
pub struct TokenManager {
    http: reqwest::Client,
    api_key: String,
    iam_url: String,
    safety_margin: Duration,
    token: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("iam_url", &self.iam_url)
            .field("safety_margin", &self.safety_margin)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager for the given identity endpoint.
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        iam_url: impl Into<String>,
        safety_margin: Duration,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            iam_url: iam_url.into(),
            safety_margin,
            token: RwLock::new(None),
        }
    }

    /// Return a valid bearer value, refreshing if necessary.
    #[instrument(skip(self))]
    pub async fn token(&self) -> GiottoResult<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_valid(self.safety_margin) {
                return Ok(token.value().clone());
            }
        }
        self.refresh().await
    }

    /// Drop the held credential so the next `token()` re-authenticates.
    pub async fn invalidate(&self) {
        debug!("Invalidating access token");
        *self.token.write().await = None;
    }

    /// Perform the credential exchange and store the new token.
    ///
    /// Concurrent refreshes serialize on the write lock; a caller that lost
    /// the race reuses the token the winner stored.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> GiottoResult<String> {
        let mut guard = self.token.write().await;

        if let Some(token) = guard.as_ref() {
            if token.is_valid(self.safety_margin) {
                debug!("Token already refreshed by a concurrent caller");
                return Ok(token.value().clone());
            }
        }

        debug!(iam_url = %self.iam_url, "Exchanging API key for access token");

        let params = [
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", self.api_key.as_str()),
        ];
        let response = self
            .http
            .post(&self.iam_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Token request failed");
                AuthError::new(AuthErrorKind::Exchange(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Identity endpoint returned error");
            return Err(AuthError::new(AuthErrorKind::Status {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let payload: IamTokenResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse token response");
            AuthError::new(AuthErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let value = payload.access_token.ok_or_else(|| {
            AuthError::new(AuthErrorKind::MalformedResponse(
                "missing access_token".to_string(),
            ))
        })?;
        let expires_in = payload.expires_in.ok_or_else(|| {
            AuthError::new(AuthErrorKind::MalformedResponse(
                "missing expires_in".to_string(),
            ))
        })?;

        let token = AccessToken::new(value, Duration::from_secs(expires_in));
        let bearer = token.value().clone();
        debug!(expires_in, "Stored new access token");
        *guard = Some(token);

        Ok(bearer)
    }
}
