//! Tests for response decoding.

use giotto_models::watsonx::decode::{decode_body, decode_chunk, decode_text};
use serde_json::json;

#[test]
fn test_fenced_json_block_decodes_structured() {
    let body = json!({
        "results": [{"generated_text": "```json\n{\"summary\":[\"a\"]}\n```"}]
    })
    .to_string();

    let result = decode_body(&body);
    assert!(result.is_structured());
    assert_eq!(result.fields().unwrap().get("summary"), Some(&json!(["a"])));
}

#[test]
fn test_direct_json_text_decodes_structured() {
    let body = json!({
        "results": [{"generated_text": "{\"hypotheses\": [\"h1\", \"h2\"]}"}]
    })
    .to_string();

    let result = decode_body(&body);
    assert_eq!(
        result.fields().unwrap().get("hypotheses"),
        Some(&json!(["h1", "h2"]))
    );
}

#[test]
fn test_unparsable_prose_falls_back_to_raw() {
    let prose = "The model wandered off and wrote a sonnet instead.";
    let body = json!({"results": [{"generated_text": prose}]}).to_string();

    let result = decode_body(&body);
    assert!(!result.is_structured());
    assert_eq!(result.raw_content(), Some(prose));
}

#[test]
fn test_body_without_results_stands_in_for_generated_text() {
    let body = "not json at all";
    let result = decode_body(body);
    assert_eq!(result.raw_content(), Some(body));
}

#[test]
fn test_unclosed_fence_falls_back_to_raw() {
    let text = "```json\n{\"summary\": [\"a\"]}";
    let result = decode_text(text);
    assert_eq!(result.raw_content(), Some(text));
}

#[test]
fn test_fenced_block_with_invalid_json_falls_back_to_raw() {
    let text = "```json\nnot actually json\n```";
    let result = decode_text(text);
    assert_eq!(result.raw_content(), Some(text));
}

#[test]
fn test_non_object_json_falls_back_to_raw() {
    // The structured variant is a mapping of named fields; a bare array is
    // preserved as raw content.
    let text = "[1, 2, 3]";
    let result = decode_text(text);
    assert_eq!(result.raw_content(), Some(text));
}

#[test]
fn test_prose_surrounding_fenced_block_still_decodes() {
    let text = "Here is the result:\n```json\n{\"summary\": [\"a\"]}\n```\nDone.";
    let result = decode_text(text);
    assert!(result.is_structured());
}

#[test]
fn test_sse_chunk_yields_generated_text() {
    let chunk = br#"data: {"results":[{"generated_text":"Hello"}]}"#;
    assert_eq!(decode_chunk(chunk), "Hello");
}

#[test]
fn test_plain_json_chunk_yields_generated_text() {
    let chunk = br#"{"results":[{"generated_text":"world"}]}"#;
    assert_eq!(decode_chunk(chunk), "world");
}

#[test]
fn test_unparsable_chunk_passes_through_verbatim() {
    let chunk = b"partial text that is not JSON";
    assert_eq!(decode_chunk(chunk), "partial text that is not JSON");
}

#[test]
fn test_parsable_chunk_without_field_yields_empty() {
    let chunk = br#"{"status": "thinking"}"#;
    assert_eq!(decode_chunk(chunk), "");
}

#[test]
fn test_invalid_utf8_chunk_decodes_lossily() {
    let chunk: &[u8] = &[b'h', b'i', 0xFF];
    let fragment = decode_chunk(chunk);
    assert!(fragment.starts_with("hi"));
}
