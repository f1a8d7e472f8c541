//! End-to-end pipeline tests against deterministic stub collaborators.
//!
//! These exercise the whole segmentation → alignment → embedding → upsert
//! path with the in-memory store and the deterministic hash provider, so
//! every assertion is reproducible without external services.

use std::sync::Arc;

use async_trait::async_trait;
use bitext_rs::{
    BitextError, Config, Document, DocumentSegment, EmbeddingIndexer, EmbeddingProvider,
    HashEmbeddings, MemoryStore, PointPayload, Result,
};

const COLLECTION: &str = "phrase_pairs";

fn make_indexer(store: Arc<MemoryStore>) -> EmbeddingIndexer {
    EmbeddingIndexer::new(
        Config::default(),
        Arc::new(HashEmbeddings::new(32)),
        store,
    )
    .unwrap()
}

fn doc(id: u64, source: &str, translation: &str) -> Document {
    Document {
        id,
        source: source.to_string(),
        translation: translation.to_string(),
        segments: None,
    }
}

#[tokio::test]
async fn test_explicit_segments_take_precedence() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let mut document = doc(2, "raw source text. more.", "texte brut. encore.");
    document.segments = Some(vec![
        DocumentSegment {
            // Holds a delimiter: derivation would have split this, so the
            // record proving it intact proves segmentation never ran
            source_ar: "عقد زواج. الحمد لله وحده".to_string(),
            source_fr: "ACTE DE MARIAGE. Louange à Dieu".to_string(),
        },
        DocumentSegment {
            source_ar: "شاهدان".to_string(),
            source_fr: "deux témoins".to_string(),
        },
        DocumentSegment {
            source_ar: "خاتمة".to_string(),
            source_fr: "conclusion".to_string(),
        },
    ]);

    let summary = indexer.index_documents(&[document]).await.unwrap();

    assert_eq!(summary.inserted_count, 3);
    assert_eq!(summary.documents_processed, 1);
    assert_eq!(store.ids(COLLECTION).await, vec![2000, 2001, 2002]);

    let first = store.get(COLLECTION, 2000).await.unwrap();
    match first.payload {
        PointPayload::Phrase {
            source_ar,
            source_fr,
            document_id,
            phrase_index,
        } => {
            assert_eq!(source_ar, "عقد زواج. الحمد لله وحده");
            assert_eq!(source_fr, "ACTE DE MARIAGE. Louange à Dieu");
            assert_eq!(document_id, 2);
            assert_eq!(phrase_index, 0);
        }
        other => panic!("expected phrase payload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_derived_documents_produce_dense_ids() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let document = doc(
        7,
        "جملة أولى. جملة ثانية. جملة ثالثة.",
        "Première phrase. Deuxième phrase. Troisième phrase.",
    );

    let summary = indexer.index_documents(&[document]).await.unwrap();

    assert_eq!(summary.inserted_count, 3);
    assert_eq!(store.ids(COLLECTION).await, vec![7000, 7001, 7002]);
    assert_eq!(summary.per_document.len(), 1);
    assert_eq!(summary.per_document[0].document_id, 7);
    assert_eq!(summary.per_document[0].record_count, 3);
}

#[tokio::test]
async fn test_empty_document_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let summary = indexer.index_documents(&[doc(9, "", "")]).await.unwrap();

    assert_eq!(summary.inserted_count, 0);
    assert_eq!(summary.documents_processed, 0);
    assert_eq!(summary.documents_skipped, 1);
    assert_eq!(store.point_count(COLLECTION).await, 0);
}

#[tokio::test]
async fn test_fallback_whole_document_record() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    // Target side segments to nothing, so alignment yields no pairs, but
    // the source text is real content
    let document = doc(11, "نص كامل بدون ترجمة", "");

    let summary = indexer.index_documents(&[document]).await.unwrap();

    assert_eq!(summary.inserted_count, 1);
    // Keyed by the document id itself, not a stride multiple
    let record = store.get(COLLECTION, 11).await.unwrap();
    match record.payload {
        PointPayload::WholeDocument {
            source,
            translation,
            document_id,
        } => {
            assert_eq!(source, "نص كامل بدون ترجمة");
            assert_eq!(translation, "");
            assert_eq!(document_id, 11);
        }
        other => panic!("expected whole-document payload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let documents = vec![
        doc(1, "جملة أولى. جملة ثانية.", "Première. Deuxième."),
        doc(2, "نص وحيد", ""),
    ];

    indexer.index_documents(&documents).await.unwrap();
    let first_ids = store.ids(COLLECTION).await;
    let first_vector = store.get(COLLECTION, 1000).await.unwrap().vector;

    indexer.index_documents(&documents).await.unwrap();
    let second_ids = store.ids(COLLECTION).await;
    let second_vector = store.get(COLLECTION, 1000).await.unwrap().vector;

    // Re-run overwrites, never duplicates, and vectors are identical
    assert_eq!(first_ids, second_ids);
    assert_eq!(first_vector, second_vector);
}

#[tokio::test]
async fn test_run_uses_a_single_batched_upsert() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let documents = vec![
        doc(1, "واحد. اثنان.", "Un. Deux."),
        doc(2, "ثلاثة. أربعة.", "Trois. Quatre."),
        doc(3, "خمسة", "Cinq"),
    ];

    let summary = indexer.index_documents(&documents).await.unwrap();

    assert_eq!(summary.documents_processed, 3);
    assert!(summary.inserted_count >= 5);
    assert_eq!(store.upsert_calls().await, 1);
}

#[tokio::test]
async fn test_partial_explicit_segment_still_emits() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let mut document = doc(4, "", "");
    document.segments = Some(vec![DocumentSegment {
        source_ar: "جانب واحد فقط".to_string(),
        source_fr: String::new(),
    }]);

    let summary = indexer.index_documents(&[document]).await.unwrap();

    assert_eq!(summary.inserted_count, 1);
    let record = store.get(COLLECTION, 4000).await.unwrap();
    match record.payload {
        PointPayload::Phrase {
            source_ar,
            source_fr,
            ..
        } => {
            assert_eq!(source_ar, "جانب واحد فقط");
            assert_eq!(source_fr, "");
        }
        other => panic!("expected phrase payload, got {:?}", other),
    }
}

/// Provider that fails on texts containing a marker, for locus assertions
struct FailingProvider {
    inner: HashEmbeddings,
}

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains("boom") {
            return Err(BitextError::Provider("simulated outage".to_string()));
        }
        self.inner.encode(text).await
    }

    async fn dimension(&self) -> Result<usize> {
        self.inner.dimension().await
    }
}

#[tokio::test]
async fn test_provider_failure_reports_locus_and_commits_nothing() {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(FailingProvider {
        inner: HashEmbeddings::new(32),
    });
    let indexer = EmbeddingIndexer::new(Config::default(), provider, store.clone()).unwrap();
    indexer.ensure_collection().await.unwrap();

    let mut document = doc(6, "", "");
    document.segments = Some(vec![
        DocumentSegment {
            source_ar: "سليم".to_string(),
            source_fr: "sain".to_string(),
        },
        DocumentSegment {
            source_ar: "boom".to_string(),
            source_fr: "boom".to_string(),
        },
    ]);

    let result = indexer.index_documents(&[document]).await;

    match result {
        Err(BitextError::Embedding {
            document_id,
            phrase_index,
            message,
        }) => {
            assert_eq!(document_id, 6);
            assert_eq!(phrase_index, 1);
            assert!(message.contains("simulated outage"));
        }
        other => panic!("expected embedding error, got {:?}", other.map(|s| s.inserted_count)),
    }

    // The failed run never reached the batched upsert
    assert_eq!(store.point_count(COLLECTION).await, 0);
    assert_eq!(store.upsert_calls().await, 0);
}

#[tokio::test]
async fn test_mixed_corpus_summary() {
    let store = Arc::new(MemoryStore::new());
    let indexer = make_indexer(store.clone());
    indexer.ensure_collection().await.unwrap();

    let mut explicit = doc(1, "", "");
    explicit.segments = Some(vec![DocumentSegment {
        source_ar: "عقد".to_string(),
        source_fr: "acte".to_string(),
    }]);

    let documents = vec![
        explicit,
        doc(2, "جملة. أخرى.", "Phrase. Autre."),
        doc(3, "", ""),             // skipped
        doc(4, "نص بلا ترجمة", ""), // fallback
    ];

    let summary = indexer.index_documents(&documents).await.unwrap();

    assert_eq!(summary.documents_processed, 3);
    assert_eq!(summary.documents_skipped, 1);
    assert_eq!(
        summary.inserted_count,
        summary
            .per_document
            .iter()
            .map(|r| r.record_count)
            .sum::<usize>()
    );

    let ids = store.ids(COLLECTION).await;
    assert!(ids.contains(&1000));
    assert!(ids.contains(&2000));
    assert!(ids.contains(&2001));
    assert!(ids.contains(&4)); // fallback keyed by document id
}
