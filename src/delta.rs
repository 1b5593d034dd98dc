//! Interpretation of decoded event record payloads.

use serde::Deserialize;
use tracing::warn;

use crate::client::ClientError;

/// Wire shape of one generation record.
///
/// The backend streams `{"text": ...}` deltas while generating and, if
/// generation fails mid-stream, a final `{"error": ...}` record.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionDelta {
    pub text: Option<String>,
    pub error: Option<String>,
}

impl SuggestionDelta {
    /// Interpret one raw data payload.
    ///
    /// Returns the text fragment to emit, `Ok(None)` for records that
    /// emit nothing, or an error when the backend reported one.
    ///
    /// A payload that is not valid JSON is dropped, not surfaced: one
    /// bad record must not abort the stream. The drop is logged.
    pub fn interpret(payload: &str) -> Result<Option<String>, ClientError> {
        let delta: SuggestionDelta = match serde_json::from_str(payload) {
            Ok(delta) => delta,
            Err(e) => {
                warn!(error = %e, payload, "dropping malformed stream record");
                return Ok(None);
            }
        };

        if let Some(error) = delta.error {
            return Err(ClientError::Provider(error));
        }

        Ok(delta.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::SseDecoder;

    /// Run raw chunks through the decoder and the interpreter, the way
    /// the streaming client does, collecting emitted fragments.
    fn pipeline(chunks: &[&[u8]]) -> Vec<String> {
        let mut decoder = SseDecoder::new();
        let mut emitted = Vec::new();
        for chunk in chunks {
            for payload in decoder.feed(chunk) {
                if let Ok(Some(text)) = SuggestionDelta::interpret(&payload) {
                    emitted.push(text);
                }
            }
        }
        emitted
    }

    #[test]
    fn text_field_is_emitted() {
        assert_eq!(
            SuggestionDelta::interpret("{\"text\":\"Hello\"}").unwrap(),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn malformed_json_is_dropped_not_fatal() {
        assert_eq!(SuggestionDelta::interpret("not-json").unwrap(), None);
    }

    #[test]
    fn valid_payload_without_text_emits_nothing() {
        assert_eq!(SuggestionDelta::interpret("{\"other\":1}").unwrap(), None);
    }

    #[test]
    fn error_field_is_promoted_to_stream_failure() {
        let result = SuggestionDelta::interpret("{\"error\":\"model overloaded\"}");
        match result {
            Err(ClientError::Provider(msg)) => assert_eq!(msg, "model overloaded"),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn delta_split_across_two_chunks_emits_once() {
        let emitted = pipeline(&[b"data: {\"text\":\"Hel", b"lo\"}\ndata: [DONE]\n"]);
        assert_eq!(emitted, vec!["Hello"]);
    }

    #[test]
    fn malformed_record_does_not_halt_later_records() {
        let emitted = pipeline(&[b"data: not-json\ndata: {\"text\":\"ok\"}\n"]);
        assert_eq!(emitted, vec!["ok"]);
    }
}
