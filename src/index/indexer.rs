//! Embedding indexer
//!
//! Orchestrates per-document processing: choose the phrase-pair source,
//! embed each pair through the provider, assemble addressable records, and
//! hand everything to the vector store in one batched upsert. Record ids
//! are deterministic (`document_id * 1000 + phrase_index`), so re-running a
//! corpus overwrites prior records instead of duplicating them.

use crate::config::Config;
use crate::document::Document;
use crate::embedding::EmbeddingProvider;
use crate::error::{BitextError, Result};
use crate::index::{DocumentReport, RunSummary};
use crate::store::{Distance, PointPayload, PointRecord, VectorStore};
use crate::text::{PhrasePair, PhraseSegmenter, align};
use futures::stream::{self, StreamExt, TryStreamExt};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Id stride per document: phrase records occupy
/// `document_id * STRIDE .. document_id * STRIDE + pairs`, so a document may
/// hold at most `STRIDE - 1` phrases before ids would collide.
pub const PHRASE_ID_STRIDE: u64 = 1000;

/// Where a document's phrase pairs come from, resolved once per document
#[derive(Debug, Clone, PartialEq)]
pub enum PairSource {
    /// Curator-supplied pairs, used verbatim; segmentation never runs
    Explicit(Vec<PhrasePair>),

    /// Pairs derived by segmenting and aligning the two raw texts
    DerivedFromText { source: String, target: String },
}

/// Orchestrates segmentation, alignment, embedding and upsert for a corpus
pub struct EmbeddingIndexer {
    config: Config,
    provider: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    source_segmenter: PhraseSegmenter,
    target_segmenter: PhraseSegmenter,
}

impl EmbeddingIndexer {
    /// Create an indexer over injected provider and store collaborators
    pub fn new(
        config: Config,
        provider: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self> {
        config.validate()?;

        let source_segmenter = PhraseSegmenter::new(
            config.language_profile(&config.pipeline.source_language)?,
            &config.segmentation,
        )?;
        let target_segmenter = PhraseSegmenter::new(
            config.language_profile(&config.pipeline.target_language)?,
            &config.segmentation,
        )?;

        Ok(Self {
            config,
            provider,
            store,
            source_segmenter,
            target_segmenter,
        })
    }

    /// Discover the provider dimension and recreate the target collection
    /// sized for it. Returns the dimension.
    pub async fn ensure_collection(&self) -> Result<usize> {
        let dimension = self.provider.dimension().await?;
        self.store
            .recreate_collection(&self.config.collection.name, dimension, Distance::Cosine)
            .await?;
        Ok(dimension)
    }

    /// Decide once where a document's pairs come from: explicit curator
    /// segments when present and non-empty, otherwise derivation from the
    /// raw texts.
    pub fn resolve_pair_source(&self, document: &Document) -> PairSource {
        if let Some(segments) = &document.segments {
            if !segments.is_empty() {
                let pairs = segments
                    .iter()
                    .map(|segment| {
                        if segment.source_ar.is_empty() || segment.source_fr.is_empty() {
                            log::warn!(
                                "Document {}: explicit segment missing one side, keeping as-is",
                                document.id
                            );
                        }
                        PhrasePair {
                            source: segment.source_ar.clone(),
                            target: segment.source_fr.clone(),
                        }
                    })
                    .collect();
                return PairSource::Explicit(pairs);
            }
        }

        PairSource::DerivedFromText {
            source: document.source.clone(),
            target: document.translation.clone(),
        }
    }

    /// Resolve a document into its ordered phrase-pair sequence
    pub fn resolve_pairs(&self, document: &Document) -> Vec<PhrasePair> {
        match self.resolve_pair_source(document) {
            PairSource::Explicit(pairs) => pairs,
            PairSource::DerivedFromText { source, target } => {
                let source_phrases = self.source_segmenter.segment(&source);
                let target_phrases = self.target_segmenter.segment(&target);
                align(&source_phrases, &target_phrases)
            }
        }
    }

    /// Process a corpus: embed every resolved pair and submit all records in
    /// a single batched upsert.
    pub async fn index_documents(&self, documents: &[Document]) -> Result<RunSummary> {
        self.index_documents_with_progress(documents, |_, _| {}).await
    }

    /// Like [`index_documents`](Self::index_documents), reporting
    /// `(completed, total)` after each document.
    pub async fn index_documents_with_progress<F>(
        &self,
        documents: &[Document],
        progress: F,
    ) -> Result<RunSummary>
    where
        F: Fn(usize, usize),
    {
        let started_at = chrono::Utc::now();
        let total = documents.len();

        log::info!("Indexing run over {} documents", total);

        // Segmentation + alignment is pure CPU work, independent per document
        let resolved: Vec<Vec<PhrasePair>> = documents
            .par_iter()
            .map(|document| self.resolve_pairs(document))
            .collect();

        let mut all_records = Vec::new();
        let mut per_document = Vec::new();
        let mut documents_skipped = 0;

        for (position, (document, pairs)) in documents.iter().zip(resolved).enumerate() {
            if pairs.is_empty() {
                if document.source.trim().is_empty() && document.translation.trim().is_empty() {
                    log::warn!("Skipping document {}: no text on either side", document.id);
                    documents_skipped += 1;
                    progress(position + 1, total);
                    continue;
                }

                // Whole-document fallback: one record keyed by the document
                // id, carrying the raw texts
                log::warn!(
                    "Document {}: no phrase pairs extracted, indexing whole document",
                    document.id
                );
                let combined = format!("{}\n{}", document.source, document.translation);
                let vector = self.embed(document.id, 0, &combined).await?;
                all_records.push(PointRecord {
                    id: document.id,
                    vector,
                    payload: PointPayload::WholeDocument {
                        source: document.source.clone(),
                        translation: document.translation.clone(),
                        document_id: document.id,
                    },
                });
                per_document.push(DocumentReport {
                    document_id: document.id,
                    record_count: 1,
                });
                progress(position + 1, total);
                continue;
            }

            if pairs.len() as u64 >= PHRASE_ID_STRIDE {
                return Err(BitextError::DocumentOverflow {
                    document_id: document.id,
                    pairs: pairs.len(),
                });
            }

            let document_id = document.id;
            let records: Vec<PointRecord> = stream::iter(pairs.iter().enumerate().map(
                |(idx, pair)| {
                    let combined = format!("{}\n{}", pair.source, pair.target);
                    let source_phrase = pair.source.clone();
                    let target_phrase = pair.target.clone();
                    async move {
                        let vector = self.embed(document_id, idx, &combined).await?;
                        Ok::<PointRecord, BitextError>(PointRecord {
                            id: document_id * PHRASE_ID_STRIDE + idx as u64,
                            vector,
                            payload: PointPayload::Phrase {
                                source_ar: source_phrase,
                                source_fr: target_phrase,
                                document_id,
                                phrase_index: idx,
                            },
                        })
                    }
                },
            ))
            .buffered(self.config.embedding.concurrency)
            .try_collect()
            .await?;

            log::debug!(
                "Document {}: {} phrase pairs embedded",
                document_id,
                records.len()
            );
            per_document.push(DocumentReport {
                document_id,
                record_count: records.len(),
            });
            all_records.extend(records);
            progress(position + 1, total);
        }

        // One batched upsert bounds round-trips and keeps the run atomic
        // from the store's perspective
        if !all_records.is_empty() {
            self.store
                .upsert(&self.config.collection.name, &all_records)
                .await?;
        }

        let finished_at = chrono::Utc::now();
        let summary = RunSummary {
            inserted_count: all_records.len(),
            documents_processed: per_document.len(),
            documents_skipped,
            per_document,
            started_at,
            finished_at,
        };

        log::info!(
            "Run complete: {} records from {} documents ({} skipped)",
            summary.inserted_count,
            summary.documents_processed,
            summary.documents_skipped
        );
        Ok(summary)
    }

    /// Embed one text with the configured timeout, tagging failures with
    /// their document/phrase locus
    async fn embed(&self, document_id: u64, phrase_index: usize, text: &str) -> Result<Vec<f32>> {
        let timeout_secs = self.config.embedding.timeout_secs;
        match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.provider.encode(text),
        )
        .await
        {
            Ok(Ok(vector)) => Ok(vector),
            Ok(Err(e)) => Err(BitextError::Embedding {
                document_id,
                phrase_index,
                message: e.to_string(),
            }),
            Err(_) => Err(BitextError::EmbeddingTimeout {
                document_id,
                phrase_index,
                timeout_secs,
            }),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }
}
