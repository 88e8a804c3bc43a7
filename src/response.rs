//! Streamed text responses.

use crate::client::ChunkStream;
use crate::Error;
use futures_util::stream::Stream;
use futures_util::StreamExt;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A lazy, single-pass stream of generated text fragments.
///
/// Each poll pulls at most one chunk from the backend. Dropping the stream
/// abandons the request; a new call is needed to generate again.
pub struct TextStream {
    chunks: ChunkStream,
}

impl TextStream {
    /// Create a text stream from a stream of response envelopes.
    pub fn from_chunks(chunks: ChunkStream) -> Self {
        Self { chunks }
    }

    /// Consume the whole stream and concatenate the fragments.
    pub async fn into_text(mut self) -> Result<String, Error> {
        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }
}

impl Stream for TextStream {
    type Item = Result<String, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks
            .poll_next_unpin(cx)
            .map(|chunk| chunk.map(|result| result.map(|envelope| envelope.response)))
    }
}
