//! Tests for incremental stream consumption.

use futures_util::{StreamExt, stream};
use giotto_error::{GiottoResult, TransportError};
use giotto_models::CompletionStream;

fn stream_of(fragments: Vec<GiottoResult<String>>) -> CompletionStream {
    CompletionStream::new(Box::pin(stream::iter(fragments)))
}

#[tokio::test]
async fn test_fragments_concatenate_in_arrival_order() {
    let mut completion = stream_of(vec![
        Ok("Hello".to_string()),
        Ok(", ".to_string()),
        Ok("world".to_string()),
    ]);

    let first = completion.next().await.unwrap().unwrap();
    assert_eq!(first, "Hello");
    assert_eq!(CompletionStream::buffered(&completion), "Hello");

    let result = completion.finish().await.unwrap();
    assert_eq!(result.raw_content(), Some("Hello, world"));
}

#[tokio::test]
async fn test_finish_decodes_structured_payload_split_across_fragments() {
    let completion = stream_of(vec![
        Ok("```json\n".to_string()),
        Ok("{\"summary\":".to_string()),
        Ok("[\"a\"]}".to_string()),
        Ok("\n```".to_string()),
    ]);

    let result = completion.finish().await.unwrap();
    assert!(result.is_structured());
    assert_eq!(
        result.fields().unwrap().get("summary"),
        Some(&serde_json::json!(["a"]))
    );
}

#[tokio::test]
async fn test_empty_stream_decodes_to_empty_raw() {
    let completion = stream_of(vec![]);
    let result = completion.finish().await.unwrap();
    assert_eq!(result.raw_content(), Some(""));
}

#[tokio::test]
async fn test_transport_error_preserves_partial_buffer() {
    let completion = stream_of(vec![
        Ok("partial ".to_string()),
        Ok("text".to_string()),
        Err(TransportError::new("connection reset").into()),
        Ok("never seen".to_string()),
    ]);

    // finish degrades the interruption to the raw partial content.
    let result = completion.finish().await.unwrap();
    assert_eq!(result.raw_content(), Some("partial text"));
}

#[tokio::test]
async fn test_error_items_surface_when_consumed_manually() {
    let mut completion = stream_of(vec![
        Ok("ok".to_string()),
        Err(TransportError::new("gone").into()),
    ]);

    assert!(completion.next().await.unwrap().is_ok());
    assert!(completion.next().await.unwrap().is_err());
}
