//! Tests for the client facade that need no network.

use giotto_core::ChatMessage;
use giotto_error::GiottoErrorKind;
use giotto_interface::DeploymentDriver;
use giotto_models::WatsonxClient;
use giotto_rate_limit::GiottoConfig;
use tokio_util::sync::CancellationToken;

fn client() -> WatsonxClient {
    WatsonxClient::with_config("test-api-key", &GiottoConfig::default())
}

#[tokio::test]
async fn test_empty_deployment_id_is_rejected() {
    let client = client();
    let messages = vec![ChatMessage::user("hi")];

    let err = client.chat_completion("", &messages).await.unwrap_err();
    assert!(matches!(err.kind(), GiottoErrorKind::Config(_)));

    let err = client
        .chat_completion_stream("   ", &messages)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), GiottoErrorKind::Config(_)));
}

#[tokio::test]
async fn test_pre_cancelled_call_aborts_before_any_network_work() {
    let client = client();
    let messages = vec![ChatMessage::user("hi")];

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .chat_completion_with_cancel("my-deployment", &messages, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), GiottoErrorKind::Cancelled(_)));

    // Nothing was sent, so nothing was recorded.
    assert_eq!(client.requests_in_last_minute(), 0);
}

#[tokio::test]
async fn test_fresh_client_state_is_isolated() {
    let a = client();
    let b = client();

    assert_eq!(a.requests_in_last_minute(), 0);
    assert_eq!(b.requests_in_last_hour(), 0);
    assert_eq!(a.cache_len(), 0);

    a.clear_cache();
    assert_eq!(a.cache_len(), 0);
}

#[test]
fn test_provider_name() {
    let client = client();
    assert_eq!(client.provider_name(), "watsonx");
}
