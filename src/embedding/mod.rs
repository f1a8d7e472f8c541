//! Embedding providers for bitext-rs
//!
//! The pipeline treats embedding generation as a contracted external
//! service behind the [`EmbeddingProvider`] trait, so tests can substitute
//! a deterministic implementation and deployments can point at any
//! OpenAI-compatible endpoint.

pub mod hash;
pub mod openai;

// Re-export main types
pub use hash::HashEmbeddings;
pub use openai::OpenAiEmbeddings;

use crate::error::Result;
use async_trait::async_trait;

/// Text-to-vector service contract
///
/// The dimension is fixed for the lifetime of a provider instance and is
/// discovered once at startup to size the vector-store collection.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text into a fixed-dimension vector
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Vector dimensionality of this provider
    async fn dimension(&self) -> Result<usize>;
}
