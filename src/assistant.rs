//! Generation orchestration: prompt, stream, sink.

use futures::StreamExt;
use tracing::debug;

use crate::client::{ClientError, StreamingCompletionClient};
use crate::options::GenerateOptions;
use crate::prompt::build_prompt;
use crate::session::SuggestionSink;

/// Drives one suggestion generation end to end.
///
/// Validates the document, builds the fixed prompt, opens the
/// completion stream, and forwards each text delta to the sink in
/// order. One invocation, one stream, one sink.
///
/// # Example
/// ```ignore
/// use scrivener::{Assistant, GenerateClient, SuggestionSession, TransportOptions};
///
/// let client = GenerateClient::new(TransportOptions::default());
/// let assistant = Assistant::new(client);
///
/// let mut session = SuggestionSession::new();
/// assistant.suggest("The keeper counted the ships...", &mut session).await?;
/// for entry in session.entries() {
///     println!("[{}] {}: {}", entry.kind, entry.title, entry.body);
/// }
/// ```
pub struct Assistant<C> {
    client: C,
    options: GenerateOptions,
}

impl<C: StreamingCompletionClient> Assistant<C> {
    /// Create an assistant with default generation options.
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: GenerateOptions::default(),
        }
    }

    /// Override the default generation options.
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Stream suggestions for `document` into `sink`.
    ///
    /// Returns the number of forwarded deltas. A stream-level error
    /// aborts the invocation and is returned once; whatever the sink
    /// already received stays there.
    pub async fn suggest<S: SuggestionSink>(
        &self,
        document: &str,
        sink: &mut S,
    ) -> Result<usize, ClientError> {
        let document = document.trim();
        if document.is_empty() {
            return Err(ClientError::InvalidRequest(
                "the document is empty; write something first".to_string(),
            ));
        }

        let prompt = build_prompt(document);
        let mut deltas = self.client.generate_stream(&prompt, &self.options).await?;

        let mut forwarded = 0;
        while let Some(delta) = deltas.next().await {
            sink.append(&delta?);
            forwarded += 1;
        }

        debug!(forwarded, "generation stream complete");
        Ok(forwarded)
    }

    /// Generate suggestions in one non-streaming round trip.
    pub async fn suggest_once(&self, document: &str) -> Result<String, ClientError> {
        let document = document.trim();
        if document.is_empty() {
            return Err(ClientError::InvalidRequest(
                "the document is empty; write something first".to_string(),
            ));
        }

        self.client.generate(&build_prompt(document), &self.options).await
    }
}
