//! Ingestion-side document model
//!
//! Documents arrive as a JSON array matching the upstream corpus format:
//! `{"id": 2, "source": "...", "translation": "...", "segments": [...]}`.
//! The `segments` field is optional curator-supplied ground truth; when
//! present and non-empty it bypasses segmentation and alignment entirely.

use serde::{Deserialize, Serialize};

/// One bilingual document: a source-language text and its rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Corpus-unique document id for this indexing run
    pub id: u64,

    /// Source-language text
    #[serde(default, alias = "source_text")]
    pub source: String,

    /// Target-language rendering
    #[serde(default, alias = "target_text")]
    pub translation: String,

    /// Optional curator-aligned phrase pairs, authoritative when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<DocumentSegment>>,
}

/// One explicit, curator-aligned phrase pair
///
/// A missing side deserializes to an empty string; the indexer still emits a
/// record for it (degraded but present) after logging a warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSegment {
    /// Source-language side
    #[serde(default, alias = "source")]
    pub source_ar: String,

    /// Target-language side
    #[serde(default, alias = "target")]
    pub source_fr: String,
}

impl Document {
    /// True when neither raw text nor explicit segments carry any content
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
            && self.translation.trim().is_empty()
            && !self.has_segments()
    }

    /// True when explicit segments are present and non-empty
    pub fn has_segments(&self) -> bool {
        self.segments.as_ref().is_some_and(|s| !s.is_empty())
    }
}
