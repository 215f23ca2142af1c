//! Retrying request execution as an explicit state machine.
//!
//! Each retry decision is a pure function of the attempt outcome, the
//! attempt counter, and the policy — see [`decide_with_jitter`]. The async
//! driver [`run_send`] only performs the I/O the decisions call for:
//! waiting, re-authenticating, and resending.

use crate::watsonx::auth::TokenManager;
use giotto_error::{
    AuthError, AuthErrorKind, CancelledError, GiottoError, GiottoResult, HttpError, RateLimitError,
    RetryableError, TransportError,
};
use giotto_interface::{WaitKind, WaitObserver};
use giotto_rate_limit::{RateWindowTracker, RetryPolicy};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// States of one send operation.
///
/// `Succeeded` and `Failed` are terminal; every other state transitions
/// strictly forward per call: check cache, throttle, authenticate, send,
/// and back off between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum SendState {
    /// No call in flight
    Idle,
    /// Consulting the response cache (non-streaming only)
    CheckingCache,
    /// Proactive wait, minute ceiling already reached
    Throttling,
    /// Obtaining a valid bearer token
    Authenticating,
    /// HTTP round trip in flight
    Sending,
    /// Sleeping out a backoff delay between attempts
    BackingOff,
    /// Terminal: response obtained
    Succeeded,
    /// Terminal: retries exhausted or permanent failure
    Failed,
}

/// Outcome of one attempt, as seen by the transition function.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// The service answered with a status code.
    Status {
        /// HTTP status code
        status: u16,
        /// Parsed Retry-After header, when present
        retry_after: Option<Duration>,
        /// Extracted machine-readable error payload
        message: String,
    },
    /// The round trip never completed.
    Transport(String),
    /// The credential exchange failed.
    AuthFailed(AuthError),
}

/// Typed transition chosen by the decision function.
#[derive(Debug)]
pub enum Transition {
    /// 2xx: deliver the response
    Succeed,
    /// 401: refresh the token and resend without consuming an attempt
    RefreshAuth,
    /// Transient failure with retries remaining: sleep, then resend
    Backoff(Duration),
    /// Terminal failure surfaced to the caller untouched
    Fail(GiottoError),
}

/// Decide the next transition with fresh jitter.
pub fn decide(
    outcome: &AttemptOutcome,
    attempt: u32,
    refreshed: bool,
    policy: &RetryPolicy,
) -> Transition {
    decide_with_jitter(outcome, attempt, refreshed, policy, RetryPolicy::sample_jitter())
}

/// Decide the next transition. Pure function of its inputs.
///
/// `attempt` is the 0-indexed count of completed attempts; `refreshed` is
/// true once this call has already forced a token refresh. A 401 gets one
/// free refresh per call — the cause is presumed credential-related, not
/// load-related, so it does not consume a backoff attempt. A second
/// consecutive 401 is a permanent auth failure.
pub fn decide_with_jitter(
    outcome: &AttemptOutcome,
    attempt: u32,
    refreshed: bool,
    policy: &RetryPolicy,
    jitter: Duration,
) -> Transition {
    match outcome {
        AttemptOutcome::Status { status, .. } if (200..300).contains(status) => Transition::Succeed,
        AttemptOutcome::Status { status: 401, .. } => {
            if refreshed {
                Transition::Fail(AuthError::new(AuthErrorKind::RefreshExhausted).into())
            } else {
                Transition::RefreshAuth
            }
        }
        AttemptOutcome::Status {
            status: 429,
            retry_after,
            ..
        } => {
            if policy.retries_remaining(attempt) {
                Transition::Backoff(policy.backoff_delay_with_jitter(attempt, *retry_after, jitter))
            } else {
                Transition::Fail(RateLimitError::new(*policy.max_retries()).into())
            }
        }
        AttemptOutcome::Status {
            status, message, ..
        } => {
            if policy.retries_remaining(attempt) {
                Transition::Backoff(policy.backoff_delay_with_jitter(attempt, None, jitter))
            } else {
                Transition::Fail(HttpError::new(*status, message.clone()).into())
            }
        }
        AttemptOutcome::Transport(message) => {
            if policy.retries_remaining(attempt) {
                Transition::Backoff(policy.backoff_delay_with_jitter(attempt, None, jitter))
            } else {
                Transition::Fail(TransportError::new(message.clone()).into())
            }
        }
        AttemptOutcome::AuthFailed(err) => {
            if err.is_retryable() && policy.retries_remaining(attempt) {
                Transition::Backoff(policy.backoff_delay_with_jitter(attempt, None, jitter))
            } else {
                Transition::Fail(err.clone().into())
            }
        }
    }
}

/// Parse a Retry-After header as whole seconds.
pub fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Extract a machine-readable error message from a response body.
///
/// Understands the service's `{"error": ...}` and
/// `{"errors": [{"message": ...}]}` shapes; anything else passes through
/// as trimmed body text.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(serde_json::Value::as_str) {
            return msg.to_string();
        }
        if let Some(msg) = value
            .pointer("/errors/0/message")
            .and_then(serde_json::Value::as_str)
        {
            return msg.to_string();
        }
    }
    body.trim().to_string()
}

/// Everything the driver borrows from the client for one call.
pub(crate) struct ExecEnv<'a> {
    pub windows: &'a Mutex<RateWindowTracker>,
    pub policy: &'a RetryPolicy,
    pub observer: &'a dyn WaitObserver,
    pub cancel: Option<&'a CancellationToken>,
}

/// Drive one send operation to a terminal state.
///
/// `request_fn` builds a fresh request for each attempt; the driver adds the
/// bearer header. Every attempt is recorded in the rate windows regardless
/// of outcome. Ordering per call is strictly
/// check limits → wait → authenticate-if-needed → send → record.
pub(crate) async fn run_send<F>(
    env: ExecEnv<'_>,
    auth: &TokenManager,
    request_fn: F,
) -> GiottoResult<reqwest::Response>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut state = SendState::Throttling;
    let mut attempt: u32 = 0;
    let mut refreshed = false;
    let mut bearer = String::new();
    let mut pending_delay = Duration::ZERO;

    loop {
        debug!(state = %state, attempt, "Executor state");
        match state {
            SendState::Throttling => {
                let limits = env.windows.lock().unwrap().check_limits();
                if *limits.minute_exceeded() && !limits.wait().is_zero() {
                    warn!(
                        wait_ms = limits.wait().as_millis() as u64,
                        "Minute ceiling reached, waiting before send"
                    );
                    wait_with_ticks(WaitKind::RateLimit, *limits.wait(), env.observer, env.cancel)
                        .await?;
                }
                state = SendState::Authenticating;
            }
            SendState::Authenticating => {
                if let Some(cancel) = env.cancel {
                    if cancel.is_cancelled() {
                        debug!(state = %SendState::Failed, "Cancelled before authentication");
                        return Err(CancelledError::new("cancelled before authentication").into());
                    }
                }
                let token_result = match env.cancel {
                    Some(cancel) => tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!(state = %SendState::Failed, "Cancelled during authentication");
                            return Err(CancelledError::new("authentication aborted").into());
                        }
                        result = auth.token() => result,
                    },
                    None => auth.token().await,
                };
                match token_result {
                    Ok(value) => {
                        bearer = value;
                        state = SendState::Sending;
                    }
                    Err(err) => {
                        let auth_err = match err.kind() {
                            giotto_error::GiottoErrorKind::Auth(e) => e.clone(),
                            _ => AuthError::new(AuthErrorKind::Exchange(err.to_string())),
                        };
                        let outcome = AttemptOutcome::AuthFailed(auth_err);
                        match decide(&outcome, attempt, refreshed, env.policy) {
                            Transition::Backoff(delay) => {
                                warn!(error = %err, "Authentication failed, will retry");
                                pending_delay = delay;
                                state = SendState::BackingOff;
                            }
                            _ => {
                                debug!(state = %SendState::Failed, "Authentication failed");
                                return Err(err);
                            }
                        }
                    }
                }
            }
            SendState::Sending => {
                let result = request_fn().bearer_auth(&bearer).send().await;
                env.windows.lock().unwrap().record();

                let outcome = match result {
                    Ok(response) if response.status().is_success() => {
                        debug!(state = %SendState::Succeeded, attempt, "Request succeeded");
                        return Ok(response);
                    }
                    Ok(response) => {
                        let status = response.status().as_u16();
                        let retry_after = parse_retry_after(response.headers());
                        let body = response.text().await.unwrap_or_default();
                        AttemptOutcome::Status {
                            status,
                            retry_after,
                            message: extract_error_message(&body),
                        }
                    }
                    Err(e) => AttemptOutcome::Transport(format!("Request failed: {}", e)),
                };

                match decide(&outcome, attempt, refreshed, env.policy) {
                    Transition::Succeed => unreachable!("2xx handled before decide"),
                    Transition::RefreshAuth => {
                        warn!("401 from service, forcing token refresh");
                        auth.invalidate().await;
                        refreshed = true;
                        state = SendState::Authenticating;
                    }
                    Transition::Backoff(delay) => {
                        warn!(
                            outcome = ?outcome,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "Transient failure, backing off"
                        );
                        pending_delay = delay;
                        state = SendState::BackingOff;
                    }
                    Transition::Fail(err) => {
                        debug!(state = %SendState::Failed, attempt, "Retries exhausted");
                        return Err(err);
                    }
                }
            }
            SendState::BackingOff => {
                wait_with_ticks(WaitKind::Backoff, pending_delay, env.observer, env.cancel).await?;
                attempt += 1;
                state = SendState::Authenticating;
            }
            SendState::Idle
            | SendState::CheckingCache
            | SendState::Succeeded
            | SendState::Failed => {
                unreachable!("terminal and pre-send states are not re-entered")
            }
        }
    }
}

/// Sleep out a delay in one-second ticks, notifying the observer and
/// honoring cancellation at each tick.
pub(crate) async fn wait_with_ticks(
    kind: WaitKind,
    delay: Duration,
    observer: &dyn WaitObserver,
    cancel: Option<&CancellationToken>,
) -> GiottoResult<()> {
    if delay.is_zero() {
        return Ok(());
    }

    let deadline = tokio::time::Instant::now() + delay;
    loop {
        let now = tokio::time::Instant::now();
        if now >= deadline {
            return Ok(());
        }
        let remaining = deadline - now;
        observer.on_wait_tick(kind, remaining);

        let step = remaining.min(Duration::from_secs(1));
        match cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => {
                    return Err(CancelledError::new(format!("{} wait aborted", kind)).into());
                }
                _ = tokio::time::sleep(step) => {}
            },
            None => tokio::time::sleep(step).await,
        }
    }
}
