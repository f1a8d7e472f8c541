//! # bitext-rs
//!
//! Segmentation, alignment and semantic indexing of paired bilingual
//! documents. Each document's two sides are split into phrase-sized units,
//! reconciled into 1:1 pairs, embedded through an external provider, and
//! written as addressable, idempotent records into a vector store for
//! retrieval-augmented translation assistance.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bitext_rs::{Config, Document, EmbeddingIndexer, HashEmbeddings, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let documents = vec![Document {
//!         id: 1,
//!         source: "عقد زواج. الحمد لله وحده.".to_string(),
//!         translation: "ACTE DE MARIAGE. Louange à Dieu.".to_string(),
//!         segments: None,
//!     }];
//!
//!     let indexer = EmbeddingIndexer::new(
//!         Config::default(),
//!         Arc::new(HashEmbeddings::default()),
//!         Arc::new(MemoryStore::new()),
//!     )?;
//!
//!     indexer.ensure_collection().await?;
//!     let summary = indexer.index_documents(&documents).await?;
//!     println!("Indexed {} phrase pairs", summary.inserted_count);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod store;
pub mod text;

// Re-export main API types
pub use config::Config;
pub use document::{Document, DocumentSegment};
pub use embedding::{EmbeddingProvider, HashEmbeddings, OpenAiEmbeddings};
pub use error::{BitextError, Result};
pub use index::{DocumentReport, EmbeddingIndexer, PairSource, RunSummary};
pub use store::{Distance, MemoryStore, PointPayload, PointRecord, QdrantStore, VectorStore};
pub use text::{PhrasePair, PhraseSegmenter, align, normalize};
