//! Tests for the completion result union.

use giotto_core::CompletionResult;
use serde_json::json;

#[test]
fn test_raw_serializes_as_fallback_object() {
    let result = CompletionResult::raw("freeform prose");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"raw_content": "freeform prose"})
    );
    assert!(!result.is_structured());
    assert_eq!(result.raw_content(), Some("freeform prose"));
    assert!(result.fields().is_none());
}

#[test]
fn test_structured_serializes_as_the_mapping() {
    let map = json!({"summary": ["a"], "citations": []})
        .as_object()
        .unwrap()
        .clone();
    let result = CompletionResult::Structured(map);

    assert!(result.is_structured());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"summary": ["a"], "citations": []})
    );
    assert_eq!(
        result.fields().unwrap().get("summary"),
        Some(&json!(["a"]))
    );
    assert!(result.raw_content().is_none());
}

#[test]
fn test_results_are_immutable_values() {
    let original = CompletionResult::raw("text");
    let copy = original.clone();
    assert_eq!(original, copy);
}
