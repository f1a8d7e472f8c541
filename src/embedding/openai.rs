//! OpenAI-compatible embeddings endpoint client
//!
//! Most hosted sentence-transformer deployments (and OpenAI itself) expose
//! the `/v1/embeddings` shape, so one client covers them all. The vector
//! dimension is discovered with a single probe request and cached for the
//! lifetime of the provider.

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{BitextError, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::CreateEmbeddingRequestArgs;
use async_trait::async_trait;
use tokio::sync::OnceCell;

/// Embedding provider backed by an OpenAI-compatible HTTP endpoint
pub struct OpenAiEmbeddings {
    client: Client<OpenAIConfig>,
    model: String,
    dimension: OnceCell<usize>,
}

impl OpenAiEmbeddings {
    /// Create a client from the embedding configuration
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new();
        if let Some(endpoint) = &config.endpoint {
            openai_config = openai_config.with_api_base(endpoint);
        }
        match std::env::var(&config.api_key_env) {
            Ok(key) => openai_config = openai_config.with_api_key(key),
            Err(_) => log::warn!(
                "Environment variable {} not set; proceeding without an API key",
                config.api_key_env
            ),
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
            dimension: OnceCell::new(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(text)
            .build()
            .map_err(|e| BitextError::Provider(e.to_string()))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| BitextError::Provider(e.to_string()))?;

        let data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| BitextError::Provider("embeddings response carried no data".to_string()))?;

        Ok(data.embedding)
    }

    async fn dimension(&self) -> Result<usize> {
        self.dimension
            .get_or_try_init(|| async {
                let probe = self.encode("dimension probe").await?;
                log::info!(
                    "Embedding model '{}' reports dimension {}",
                    self.model,
                    probe.len()
                );
                Ok::<usize, BitextError>(probe.len())
            })
            .await
            .copied()
    }
}
