//! Stream adapter for parsing newline-delimited JSON from byte chunks.

use crate::Error;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

const MAX_BUFFER_SIZE: usize = 1_000_000;

/// A stream adapter that decodes one JSON value per line from a byte stream.
/// Lines split across chunks are reassembled before decoding.
pub struct NdjsonStream<S, T> {
    /// The underlying byte stream
    inner: S,
    /// Bytes of the line currently being received
    buffer: Vec<u8>,
    /// Complete lines waiting to be decoded, in arrival order. A line that is
    /// not valid UTF-8 is queued as its error so it keeps its place.
    lines: VecDeque<Result<String, Error>>,
    /// Set once the inner stream has ended
    finished: bool,
    _item: PhantomData<fn() -> T>,
}

impl<S, T> NdjsonStream<S, T> {
    /// Create a new NDJSON stream from a byte stream.
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            lines: VecDeque::new(),
            finished: false,
            _item: PhantomData,
        }
    }

    /// Move every complete line out of the buffer.
    fn split_lines(&mut self) {
        let mut start = 0;

        while let Some(pos) = memchr::memchr(b'\n', &self.buffer[start..]) {
            let line_end = start + pos;
            self.push_line(start, line_end);
            start = line_end + 1;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
    }

    fn push_line(&mut self, start: usize, end: usize) {
        match std::str::from_utf8(&self.buffer[start..end]) {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.lines.push_back(Ok(text.to_string()));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid UTF-8 in NDJSON line");
                self.lines.push_back(Err(Error::streaming(format!(
                    "Invalid UTF-8 in NDJSON line: {e}"
                ))));
            }
        }
    }
}

impl<S, T> NdjsonStream<S, T>
where
    T: DeserializeOwned,
{
    fn decode(line: &str) -> Result<T, Error> {
        serde_json::from_str(line).map_err(|e| {
            tracing::warn!(error = %e, line, "Failed to decode NDJSON line");
            Error::from(e)
        })
    }
}

impl<S, E, T> Stream for NdjsonStream<S, T>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    T: DeserializeOwned,
{
    type Item = Result<T, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(line) = self.lines.pop_front() {
                return Poll::Ready(Some(line.and_then(|line| Self::decode(&line))));
            }

            if self.finished {
                return Poll::Ready(None);
            }

            let chunk = match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    return Poll::Ready(Some(Err(Error::streaming(format!(
                        "Stream error: {}",
                        e.into()
                    )))));
                }
                None => {
                    // Flush a final line that was not newline-terminated
                    self.finished = true;
                    if !self.buffer.is_empty() {
                        let end = self.buffer.len();
                        self.push_line(0, end);
                        self.buffer.clear();
                    }
                    continue;
                }
            };

            self.buffer.extend_from_slice(&chunk);
            self.split_lines();

            if self.buffer.len() > MAX_BUFFER_SIZE {
                self.buffer.clear();
                self.lines
                    .push_back(Err(Error::streaming("NDJSON line exceeded maximum size")));
            }
        }
    }
}

/// Extension trait to add NDJSON decoding to byte streams.
pub trait NdjsonStreamExt: Stream {
    /// Decode this byte stream as newline-delimited JSON values of type `T`.
    fn ndjson<T>(self) -> NdjsonStream<Self, T>
    where
        Self: Sized,
    {
        NdjsonStream::new(self)
    }
}

impl<S: Stream> NdjsonStreamExt for S {}
