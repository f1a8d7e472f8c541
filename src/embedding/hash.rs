//! Deterministic hash-projection embeddings
//!
//! A model-free provider that distributes word hashes across the embedding
//! dimensions and normalizes to unit length. The vectors carry no real
//! semantics, but they are deterministic, cheap, and distinct per text,
//! which is exactly what offline runs and pipeline tests need.

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use async_trait::async_trait;

/// Deterministic, model-free embedding provider
#[derive(Debug, Clone)]
pub struct HashEmbeddings {
    dimension: usize,
    normalize: bool,
}

impl HashEmbeddings {
    /// Create a provider with the given output dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            normalize: true,
        }
    }

    fn encode_sync(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut embedding = vec![0.0f32; self.dimension];

        for (i, word) in text.split_whitespace().enumerate() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let hash = hasher.finish();

            // Distribute hash bits across embedding dimensions
            for j in 0..10.min(embedding.len()) {
                let idx = (i * 10 + j) % embedding.len();
                embedding[idx] += ((hash >> (j * 6)) & 0x3F) as f32 / 64.0 - 0.5;
            }
        }

        if self.normalize {
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 1e-12 {
                for val in &mut embedding {
                    *val /= norm;
                }
            }
        }

        embedding
    }
}

impl Default for HashEmbeddings {
    fn default() -> Self {
        // Same width as the multilingual MiniLM family, so offline and live
        // runs produce interchangeable collection shapes
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddings {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.encode_sync(text))
    }

    async fn dimension(&self) -> Result<usize> {
        Ok(self.dimension)
    }
}
