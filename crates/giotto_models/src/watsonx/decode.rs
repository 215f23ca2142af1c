//! Response normalization for buffered and streamed payloads.
//!
//! Decoding never fails the call: every parse failure degrades to the
//! raw-content fallback variant, preserving whatever text the model
//! produced.

use giotto_core::CompletionResult;
use serde_json::Value;
use tracing::debug;

/// Decode a buffered response body.
///
/// Extracts the first generated-text field from the result list; when the
/// body carries no such field the whole body stands in for the generated
/// text.
pub fn decode_body(body: &str) -> CompletionResult {
    decode_text(&extract_generated_text(body))
}

/// Decode generated text into a completion result.
///
/// Attempts a direct JSON-object parse; failing that, looks for a fenced
/// code block tagged as JSON and parses its contents; failing that, returns
/// the raw-content fallback.
pub fn decode_text(content: &str) -> CompletionResult {
    if let Ok(Value::Object(map)) = serde_json::from_str(content.trim()) {
        return CompletionResult::Structured(map);
    }

    if let Some(block) = fenced_json_block(content) {
        if let Ok(Value::Object(map)) = serde_json::from_str(block) {
            debug!("Parsed structured result from fenced JSON block");
            return CompletionResult::Structured(map);
        }
    }

    debug!("Payload not parseable as structured data, falling back to raw content");
    CompletionResult::raw(content)
}

/// Decode one streamed network chunk into a text fragment.
///
/// The chunk is decoded as UTF-8 (lossily); a server-sent-event `data:`
/// prefix is stripped before JSON-parsing the remainder. A chunk that
/// parses yields its generated-text field (empty when the field is absent);
/// a chunk that does not parse yields its raw decoded text verbatim.
pub fn decode_chunk(chunk: &[u8]) -> String {
    let text = String::from_utf8_lossy(chunk);
    match parse_fragment(&text) {
        Some(fragment) => fragment,
        None => text.into_owned(),
    }
}

/// First `results[0].generated_text` in the body, or the body itself.
fn extract_generated_text(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(text) = value
            .pointer("/results/0/generated_text")
            .and_then(Value::as_str)
        {
            return text.to_string();
        }
    }
    body.to_string()
}

/// Generated text carried by a well-formed chunk, None when the chunk is
/// not JSON at all.
fn parse_fragment(text: &str) -> Option<String> {
    let payload = match text.strip_prefix("data:") {
        Some(rest) => rest.trim(),
        None => text,
    };
    let value: Value = serde_json::from_str(payload).ok()?;
    Some(
        value
            .pointer("/results/0/generated_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    )
}

/// Contents of the first ` ```json ` fenced block, if the fence is closed.
fn fenced_json_block(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("```json")?;
    let (block, _) = rest.split_once("```")?;
    Some(block.trim())
}
