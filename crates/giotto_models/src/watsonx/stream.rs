//! Incremental consumption of streamed generation responses.

use crate::watsonx::decode;
use futures_util::{Stream, StreamExt};
use giotto_core::CompletionResult;
use giotto_error::{GiottoResult, TransportError};
use giotto_interface::FragmentStream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::warn;

/// A streaming completion in progress.
///
/// Yields decoded text fragments in arrival order while accumulating them
/// into a running buffer. [`finish`](Self::finish) drains whatever remains
/// and decodes the full buffer by the same logic as the buffered path,
/// yielding a [`CompletionResult`]. Streaming results are never cached.
///
/// The stream is finite: it terminates when the transport closes. A
/// transport failure mid-stream surfaces as an `Err` item; `finish`
/// degrades it to a warning and decodes the partial buffer, preserving
/// whatever text arrived.
pub struct CompletionStream {
    inner: FragmentStream,
    buffer: String,
}

impl CompletionStream {
    /// Wrap a fragment stream.
    pub fn new(inner: FragmentStream) -> Self {
        Self {
            inner,
            buffer: String::new(),
        }
    }

    /// Build the fragment stream over a chunked HTTP response.
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let fragments = async_stream::stream! {
            let mut chunks = response.bytes_stream();
            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(bytes) => yield Ok(decode::decode_chunk(&bytes)),
                    Err(e) => {
                        yield Err(TransportError::new(format!("Stream read failed: {}", e)).into());
                        break;
                    }
                }
            }
        };
        Self::new(Box::pin(fragments))
    }

    /// Text accumulated so far.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Drain the remaining fragments and decode the full buffer.
    pub async fn finish(mut self) -> GiottoResult<CompletionResult> {
        while let Some(fragment) = self.next().await {
            if let Err(e) = fragment {
                warn!(error = %e, "Stream interrupted, decoding partial buffer");
                break;
            }
        }
        Ok(decode::decode_text(&self.buffer))
    }
}

impl Stream for CompletionStream {
    type Item = GiottoResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let poll = this.inner.as_mut().poll_next(cx);
        if let Poll::Ready(Some(Ok(fragment))) = &poll {
            this.buffer.push_str(fragment);
        }
        poll
    }
}

impl std::fmt::Debug for CompletionStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionStream")
            .field("buffered_len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
