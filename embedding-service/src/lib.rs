//! OpenAI-backed text embeddings.
//!
//! A thin client around the provider's `/v1/embeddings` endpoint plus
//! the [`EmbeddingsProvider`] trait the HTTP layer programs against.

pub mod error_handler;
pub mod openai;

pub use error_handler::EmbedError;
pub use openai::{EmbedConfig, OpenAiEmbedder};

use std::{future::Future, pin::Pin};

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in another embedding backend, or a
/// fake in tests. Async is required because real providers perform
/// HTTP requests.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one text into a fixed-length vector.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbedError>> + Send + 'a>>;
}
