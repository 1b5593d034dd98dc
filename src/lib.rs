//! # scrivener - Streaming Writing-Assistant Client Core
//!
//! A small, pragmatic Rust library implementing the client core of a
//! creative-writing assistant: a streaming completion client, the
//! incremental event-stream decoder behind it, a suggestion session
//! that collects the output, and a local document store.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Incremental server-sent-event style stream decoding with
//!   chunk-boundary independence
//! - Per-record fault tolerance: one malformed record never aborts a
//!   stream
//! - Explicit per-invocation suggestion sessions (no ambient state)
//! - File-backed document persistence, export, and text statistics
//!
//! ## Architecture
//!
//! Decoding is split into layers so each one is testable on its own:
//!
//! 1. **`sse`** reassembles transport chunks into raw record payloads
//! 2. **`delta`** interprets a payload (text delta, backend error, or
//!    droppable noise)
//! 3. **`generate`** speaks HTTP to the generation endpoint
//! 4. **`assistant`** wires prompt, stream, and sink together
//!
//! ## Example
//! ```no_run
//! use scrivener::{Assistant, GenerateClient, SuggestionSession, TransportOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GenerateClient::new(TransportOptions::default());
//!     let assistant = Assistant::new(client);
//!
//!     let mut session = SuggestionSession::new();
//!     assistant
//!         .suggest("The lighthouse keeper counted the ships again.", &mut session)
//!         .await?;
//!
//!     for entry in session.entries() {
//!         println!("[{}] {}\n{}", entry.kind, entry.title, entry.body);
//!     }
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod client;
pub mod delta;
pub mod document;
pub mod generate;
pub mod http;
pub mod options;
pub mod prompt;
pub mod session;
pub mod sse;

// Re-exports for convenience
pub use assistant::Assistant;
pub use client::{ClientError, CompletionClient, DeltaStream, StreamingCompletionClient};
pub use delta::SuggestionDelta;
pub use document::{DocumentStats, DocumentStore, SavedDocument, StoreError};
pub use generate::GenerateClient;
pub use options::{GenerateOptions, SecretString, TransportOptions};
pub use session::{SuggestionEntry, SuggestionKind, SuggestionSession, SuggestionSink};
pub use sse::{SseDecoder, SseResponseExt};
