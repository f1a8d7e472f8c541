//! In-memory vector store
//!
//! Keeps collections in a map keyed by record id, mirroring the store
//! contract closely enough to exercise the pipeline end to end: recreate
//! drops prior contents, upsert overwrites by id. Used by tests and
//! available for dry runs.

use crate::error::{BitextError, Result};
use crate::store::{Distance, PointRecord, VectorStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

struct Collection {
    dimension: usize,
    distance: Distance,
    points: BTreeMap<u64, PointRecord>,
}

/// Vector store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
    upsert_calls: Mutex<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points currently in a collection
    pub async fn point_count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(|c| c.points.len())
            .unwrap_or(0)
    }

    /// All record ids in a collection, ascending
    pub async fn ids(&self, collection: &str) -> Vec<u64> {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(|c| c.points.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Fetch one record by id
    pub async fn get(&self, collection: &str, id: u64) -> Option<PointRecord> {
        self.collections
            .lock()
            .await
            .get(collection)
            .and_then(|c| c.points.get(&id).cloned())
    }

    /// Configured dimension of a collection
    pub async fn dimension(&self, collection: &str) -> Option<usize> {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(|c| c.dimension)
    }

    /// Configured similarity metric of a collection
    pub async fn distance(&self, collection: &str) -> Option<Distance> {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(|c| c.distance)
    }

    /// How many batched upsert calls the store has received
    pub async fn upsert_calls(&self) -> usize {
        *self.upsert_calls.lock().await
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn recreate_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections.insert(
            name.to_string(),
            Collection {
                dimension,
                distance,
                points: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[PointRecord]) -> Result<()> {
        let mut collections = self.collections.lock().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| BitextError::Store(format!("unknown collection '{}'", collection)))?;

        for record in records {
            if record.vector.len() != entry.dimension {
                return Err(BitextError::Store(format!(
                    "record {} has dimension {}, collection '{}' expects {}",
                    record.id,
                    record.vector.len(),
                    collection,
                    entry.dimension
                )));
            }
            entry.points.insert(record.id, record.clone());
        }

        *self.upsert_calls.lock().await += 1;
        Ok(())
    }
}
