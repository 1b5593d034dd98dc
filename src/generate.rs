//! HTTP client for the assistant's generation endpoint.
//!
//! The backend exposes a single `POST /api/generate` route. With
//! `stream: false` it answers `{"text": ...}` in one round trip; with
//! `stream: true` it answers a chunked body of event records decoded by
//! [`crate::sse`] and interpreted by [`crate::delta`].

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ClientError, CompletionClient, DeltaStream, StreamingCompletionClient};
use crate::delta::SuggestionDelta;
use crate::http::{apply_headers, build_http_client};
use crate::options::{GenerateOptions, TransportOptions};
use crate::sse::SseResponseExt;

const GENERATE_PATH: &str = "/api/generate";

/// Client for the generation endpoint.
///
/// Stateless between calls; all per-invocation state lives in the
/// returned stream.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    transport: TransportOptions,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl GenerateClient {
    /// Create a client for the backend described by `transport`.
    pub fn new(transport: TransportOptions) -> Self {
        Self { transport }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.transport.base_url.trim_end_matches('/'),
            GENERATE_PATH
        )
    }

    fn build_request(
        &self,
        prompt: &str,
        options: &GenerateOptions,
        stream: bool,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        if prompt.trim().is_empty() {
            return Err(ClientError::InvalidRequest("prompt is required".to_string()));
        }

        // The whole-request timeout would cut a long-lived stream
        // short; streaming waits are bounded per chunk instead.
        let transport = if stream {
            TransportOptions {
                timeout: None,
                ..self.transport.clone()
            }
        } else {
            self.transport.clone()
        };

        let body = GenerateRequest {
            prompt,
            model: &options.model,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            stream,
        };

        let http_client = build_http_client(&transport)?;
        let request = apply_headers(http_client.post(self.endpoint()), &self.transport);
        Ok(request.json(&body))
    }

    fn handle_error_response(status: reqwest::StatusCode, body: &str) -> ClientError {
        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(body) {
            ClientError::Provider(error_resp.error)
        } else {
            ClientError::Provider(format!("HTTP {}: {}", status, body))
        }
    }
}

#[async_trait]
impl CompletionClient for GenerateClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ClientError> {
        let response = self.build_request(prompt, options, false)?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::handle_error_response(status, &body));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text)
    }
}

#[async_trait]
impl StreamingCompletionClient for GenerateClient {
    async fn generate_stream(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<DeltaStream, ClientError> {
        let response = self.build_request(prompt, options, true)?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::handle_error_response(status, &body));
        }

        debug!(model = %options.model, "generation stream opened");

        let deltas = response
            .sse_with_deadline(self.transport.chunk_timeout)
            .filter_map(|record| async move {
                match record {
                    Ok(payload) => SuggestionDelta::interpret(&payload).transpose(),
                    Err(e) => Some(Err(e)),
                }
            });

        Ok(Box::pin(deltas))
    }
}
