//! Incremental decoding of server-sent-event style completion streams.
//!
//! The generation endpoint delivers its response body as chunked
//! `text/plain`, one event record per line:
//!
//! ```text
//! data: {"text": "a fragment"}
//!
//! data: [DONE]
//! ```
//!
//! Chunk sizes and boundaries are arbitrary, so records have to be
//! reassembled before they can be interpreted. [`SseDecoder`] does the
//! reassembly: it buffers undecoded bytes, frames complete lines, and
//! yields the raw data payloads in stream order. Interpreting a payload
//! (JSON, text field, error field) is the caller's business; see
//! [`crate::delta`].

use std::time::Duration;

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use tokio::time::timeout;
use tracing::debug;

use crate::client::ClientError;

/// Marker prefix of one event record line.
pub const DATA_PREFIX: &str = "data: ";

/// Sentinel payload marking an intentionally ignorable record.
///
/// This is not an end-of-stream signal; the transport's own completion
/// is. A decoder seeing this payload simply skips the record.
pub const DONE_MARKER: &str = "[DONE]";

/// Extract the data portion of one event line.
///
/// Returns `None` for lines that do not carry the `data: ` prefix.
///
/// # Example
/// ```
/// use scrivener::sse::parse_sse_line;
///
/// assert_eq!(parse_sse_line("data: {\"text\": \"hi\"}"), Some("{\"text\": \"hi\"}"));
/// assert_eq!(parse_sse_line("unprefixed"), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX).map(|s| s.trim())
}

/// Check whether a data payload is the skip sentinel.
pub fn is_done_marker(data: &str) -> bool {
    data == DONE_MARKER
}

/// Stateful line reassembler for one streaming request.
///
/// Owns the residue of bytes not yet resolved into a complete line.
/// Created fresh per request and consumed by [`SseDecoder::finish`]
/// when the transport signals completion; abandoning it mid-stream
/// needs no cleanup.
///
/// The buffer holds bytes rather than text so a UTF-8 sequence split
/// across chunk boundaries reassembles correctly; lines are only
/// decoded once their delimiter has been seen.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    flush_trailing: bool,
}

impl SseDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Control what happens to an unterminated trailing line at stream
    /// end.
    ///
    /// By default the residue is discarded, matching the endpoint's
    /// convention that every record is newline-terminated. Enable this
    /// to frame the residue through [`SseDecoder::finish`] instead, for
    /// transports that may close mid-line with meaningful content.
    pub fn flush_trailing(mut self, flush: bool) -> Self {
        self.flush_trailing = flush;
        self
    }

    /// Absorb one transport chunk and return the data payloads of every
    /// line it completed, in order.
    ///
    /// Lines without the `data: ` prefix and lines carrying the
    /// [`DONE_MARKER`] sentinel produce nothing. The final unterminated
    /// fragment is retained as buffer state for the next call, never
    /// returned.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut records = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(&self.buffer[..pos])
                .trim()
                .to_string();
            self.buffer.drain(..=pos);

            if let Some(data) = Self::frame(&line) {
                records.push(data);
            }
        }
        records
    }

    /// Signal end of stream, consuming the decoder.
    ///
    /// Returns the payload of the retained trailing fragment when
    /// `flush_trailing` is enabled and the fragment frames to a record;
    /// otherwise the residue is dropped.
    pub fn finish(self) -> Option<String> {
        if !self.flush_trailing {
            if !self.buffer.is_empty() {
                debug!(
                    residue = self.buffer.len(),
                    "discarding unterminated trailing bytes"
                );
            }
            return None;
        }

        let line = String::from_utf8_lossy(&self.buffer).trim().to_string();
        Self::frame(&line)
    }

    fn frame(line: &str) -> Option<String> {
        if line.is_empty() {
            return None;
        }
        let data = parse_sse_line(line)?;
        if is_done_marker(data) {
            debug!("skipping sentinel record");
            return None;
        }
        Some(data.to_string())
    }
}

/// Decode a stream of transport chunks into a stream of data payloads.
///
/// `chunk_deadline` bounds the suspended wait for each next chunk;
/// when it elapses the stream ends with [`ClientError::ChunkTimeout`].
/// A transport read error likewise ends the stream after being
/// surfaced once. Payloads are yielded in framing order.
pub fn decode_sse<S, E>(
    byte_stream: S,
    chunk_deadline: Option<Duration>,
) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send,
{
    async_stream::try_stream! {
        let mut byte_stream = Box::pin(byte_stream);
        let mut decoder = SseDecoder::new();

        loop {
            let next: Option<Result<Bytes, ClientError>> = match chunk_deadline {
                Some(deadline) => match timeout(deadline, byte_stream.next()).await {
                    Ok(next) => next.map(|r| r.map_err(Into::into)),
                    Err(_) => Some(Err(ClientError::ChunkTimeout)),
                },
                None => byte_stream.next().await.map(|r| r.map_err(Into::into)),
            };

            match next {
                Some(Ok(chunk)) => {
                    for record in decoder.feed(&chunk) {
                        yield record;
                    }
                }
                Some(Err(e)) => {
                    Err(e)?;
                }
                None => {
                    if let Some(record) = decoder.finish() {
                        yield record;
                    }
                    break;
                }
            }
        }
    }
}

/// Extension trait turning an HTTP response into a payload stream.
///
/// # Example
/// ```ignore
/// use scrivener::sse::SseResponseExt;
///
/// let response = client.post(url).json(&body).send().await?;
/// let mut payloads = response.sse();
/// while let Some(payload) = payloads.next().await {
///     println!("record: {}", payload?);
/// }
/// ```
pub trait SseResponseExt {
    /// Stream of raw data payloads, one per framed record.
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send;

    /// Like [`SseResponseExt::sse`], with a per-chunk wait deadline.
    fn sse_with_deadline(
        self,
        chunk_deadline: Option<Duration>,
    ) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl SseResponseExt for reqwest::Response {
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        decode_sse(self.bytes_stream(), None)
    }

    fn sse_with_deadline(
        self,
        chunk_deadline: Option<Duration>,
    ) -> impl Stream<Item = Result<String, ClientError>> + Send {
        decode_sse(self.bytes_stream(), chunk_deadline)
    }
}
