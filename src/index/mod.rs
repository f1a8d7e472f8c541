//! Indexing orchestration for bitext-rs
//!
//! Drives a whole run: per-document phrase-pair resolution, embedding,
//! record assembly, and the single batched upsert at the end.

pub mod indexer;

// Re-export main types
pub use indexer::{EmbeddingIndexer, PHRASE_ID_STRIDE, PairSource};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-document record count for observability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Document id
    pub document_id: u64,

    /// Records this document contributed
    pub record_count: usize,
}

/// Outcome of one indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total records handed to the vector store
    pub inserted_count: usize,

    /// Documents that contributed at least one record
    pub documents_processed: usize,

    /// Documents skipped for having no content at all
    pub documents_skipped: usize,

    /// Per-document breakdown
    pub per_document: Vec<DocumentReport>,

    /// Run start time
    pub started_at: DateTime<Utc>,

    /// Run end time
    pub finished_at: DateTime<Utc>,
}
