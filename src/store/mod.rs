//! Vector store integration for bitext-rs
//!
//! The store owns persisted record lifetime; the pipeline's only write
//! primitive is idempotent upsert by deterministic id, which makes reruns
//! safe without locking or transactions.

pub mod memory;
pub mod qdrant;

// Re-export main types
pub use memory::MemoryStore;
pub use qdrant::QdrantStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Similarity metric for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
    Dot,
    Euclid,
}

/// Payload stored alongside each vector
///
/// Phrase records carry the aligned pair plus its locus; whole-document
/// fallback records carry the raw texts instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointPayload {
    Phrase {
        source_ar: String,
        source_fr: String,
        document_id: u64,
        phrase_index: usize,
    },
    WholeDocument {
        source: String,
        translation: String,
        document_id: u64,
    },
}

impl PointPayload {
    /// Document this payload belongs to
    pub fn document_id(&self) -> u64 {
        match self {
            PointPayload::Phrase { document_id, .. } => *document_id,
            PointPayload::WholeDocument { document_id, .. } => *document_id,
        }
    }
}

/// One addressable record handed to the vector store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Deterministic record id; reruns overwrite, never duplicate
    pub id: u64,

    /// Embedding vector
    pub vector: Vec<f32>,

    /// Retrieval payload
    pub payload: PointPayload,
}

/// Collection lifecycle + batched upsert contract
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Destroy and recreate a collection with the given vector shape.
    /// Idempotent: a missing collection is not an error.
    async fn recreate_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<()>;

    /// Insert-or-overwrite the records by id, as one batch
    async fn upsert(&self, collection: &str, records: &[PointRecord]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_payload_serializes_flat() {
        let payload = PointPayload::Phrase {
            source_ar: "عقد زواج".to_string(),
            source_fr: "ACTE DE MARIAGE".to_string(),
            document_id: 2,
            phrase_index: 1,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["source_ar"], "عقد زواج");
        assert_eq!(json["document_id"], 2);
        assert_eq!(json["phrase_index"], 1);
        assert!(json.get("type").is_none());
    }

    #[test]
    fn test_whole_document_payload_round_trip() {
        let payload = PointPayload::WholeDocument {
            source: "نص".to_string(),
            translation: "texte".to_string(),
            document_id: 7,
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: PointPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.document_id(), 7);
    }
}
