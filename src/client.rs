//! Core client traits and error types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use thiserror::Error;

use crate::options::GenerateOptions;

/// Errors that can occur during client operations.
///
/// Two tiers exist in practice: everything in this enum is fatal to the
/// current generation invocation. Malformed individual stream records
/// are not errors at all; they are dropped where they are decoded and
/// the stream continues.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("timed out waiting for the next stream chunk")]
    ChunkTimeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Ordered stream of generated text fragments.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// A completion backend that can turn a prompt into text.
///
/// The HTTP implementation lives in [`crate::generate`]; tests swap in
/// canned implementations.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate the full completion for a prompt in one round trip.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ClientError>;
}

/// Extension trait for backends that can stream their completion.
#[async_trait]
pub trait StreamingCompletionClient: CompletionClient {
    /// Generate a completion as an ordered stream of text deltas.
    ///
    /// Exactly one in-flight stream per invocation; the caller is
    /// responsible for not starting another before this one ends. Any
    /// yielded error terminates the invocation and is reported once.
    async fn generate_stream(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<DeltaStream, ClientError>;
}
