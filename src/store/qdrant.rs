//! Qdrant REST client
//!
//! Talks to Qdrant's HTTP API directly with reqwest: collection teardown
//! and creation, plus the single batched points upsert the pipeline issues
//! per run. `wait=true` makes the upsert ack only after the write is
//! applied, so a successful run means the records are actually there.

use crate::config::StoreConfig;
use crate::error::{BitextError, Result};
use crate::store::{Distance, PointRecord, VectorStore};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Vector store backed by a Qdrant instance
pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantStore {
    /// Create a client for the configured Qdrant endpoint
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.base_url, name)
    }

    fn distance_name(distance: Distance) -> &'static str {
        match distance {
            Distance::Cosine => "Cosine",
            Distance::Dot => "Dot",
            Distance::Euclid => "Euclid",
        }
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn recreate_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<()> {
        // Teardown first; a 404 just means there was nothing to delete
        let delete = self
            .client
            .delete(self.collection_url(name))
            .send()
            .await
            .map_err(|e| BitextError::Store(format!("delete collection '{}': {}", name, e)))?;
        if !delete.status().is_success() && delete.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(BitextError::Store(format!(
                "delete collection '{}' failed with status {}",
                name,
                delete.status()
            )));
        }

        let body = json!({
            "vectors": {
                "size": dimension,
                "distance": Self::distance_name(distance),
            }
        });
        let create = self
            .client
            .put(self.collection_url(name))
            .json(&body)
            .send()
            .await
            .map_err(|e| BitextError::Store(format!("create collection '{}': {}", name, e)))?;
        if !create.status().is_success() {
            let status = create.status();
            let detail = create.text().await.unwrap_or_default();
            return Err(BitextError::Store(format!(
                "create collection '{}' failed with status {}: {}",
                name, status, detail
            )));
        }

        log::info!(
            "Collection '{}' ready with vector size {} ({:?})",
            name,
            dimension,
            distance
        );
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[PointRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let points: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "vector": r.vector,
                    "payload": r.payload,
                })
            })
            .collect();

        let response = self
            .client
            .put(format!("{}/points?wait=true", self.collection_url(collection)))
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| BitextError::Store(format!("upsert into '{}': {}", collection, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(BitextError::Store(format!(
                "upsert into '{}' failed with status {}: {}",
                collection, status, detail
            )));
        }

        log::info!("Upserted {} points into '{}'", records.len(), collection);
        Ok(())
    }
}
