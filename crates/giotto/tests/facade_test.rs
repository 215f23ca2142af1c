//! Tests exercising the facade re-exports together.

use giotto::{
    ChatMessage, CompletionResult, Fingerprint, ResponseCache, ResponseCacheConfig, RetryPolicy,
    Role,
};
use serde_json::json;

#[test]
fn test_cached_result_roundtrip_through_reexports() {
    let messages = vec![
        ChatMessage::new(Role::System, "You are a research assistant."),
        ChatMessage::user("Summarize the abstract."),
    ];
    let fingerprint = Fingerprint::of_messages(&messages);

    let map = json!({"summary": ["a"], "citations": []})
        .as_object()
        .unwrap()
        .clone();
    let result = CompletionResult::Structured(map);

    let mut cache = ResponseCache::new(ResponseCacheConfig::default());
    cache.insert(fingerprint.clone(), result.clone());

    assert_eq!(cache.get(&fingerprint), Some(result));
}

#[test]
fn test_default_policy_matches_documented_limits() {
    let policy = RetryPolicy::default();
    assert_eq!(*policy.max_retries(), 5);
    assert_eq!(
        *policy.base_delay(),
        std::time::Duration::from_secs(2)
    );
    assert_eq!(*policy.max_delay(), std::time::Duration::from_secs(60));
}
