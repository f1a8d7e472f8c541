//! Configuration for bitext-rs
//!
//! All tunables for the pipeline live here: the collection the records land
//! in, per-language segmentation profiles, the embedding service, and the
//! vector store endpoint. Everything deserializes from a JSON file so a
//! deployment can override any subset of the defaults.

use crate::error::{BitextError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Vector store collection settings
    pub collection: CollectionConfig,

    /// Segmentation settings (windowing thresholds + language profiles)
    pub segmentation: SegmentationConfig,

    /// Embedding service settings
    pub embedding: EmbeddingConfig,

    /// Vector store endpoint settings
    pub store: StoreConfig,

    /// Which language profiles the two document sides use
    pub pipeline: PipelineConfig,
}

/// Collection naming and similarity metric
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Collection name in the vector store
    pub name: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "phrase_pairs".to_string(),
        }
    }
}

/// Delimiter set for one language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Clause/sentence delimiter characters; newline is always implied
    pub delimiters: String,
}

/// Segmentation thresholds and the language profile table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Parts longer than this many words get window-split
    pub max_words: usize,

    /// Window size, in words, for over-long parts
    pub window_words: usize,

    /// Language tag -> delimiter profile. Adding a language is a config
    /// entry, not new segmentation code.
    pub languages: HashMap<String, LanguageProfile>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        let mut languages = HashMap::new();
        languages.insert(
            "ar".to_string(),
            LanguageProfile {
                delimiters: "؟!.|،,؛;:".to_string(),
            },
        );
        languages.insert(
            "fr".to_string(),
            LanguageProfile {
                delimiters: ".!?;:".to_string(),
            },
        );
        Self {
            max_words: 60,
            window_words: 30,
            languages,
        }
    }
}

/// Embedding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible embeddings endpoint; `None` uses the
    /// client's default
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model name passed to the embeddings endpoint
    pub model: String,

    /// Maximum in-flight embedding requests
    pub concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "paraphrase-multilingual-MiniLM-L12-v2".to_string(),
            concurrency: 8,
            timeout_secs: 30,
        }
    }
}

/// Vector store endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Qdrant base URL
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Which language profile each document side uses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language tag for `source` text
    pub source_language: String,

    /// Language tag for `translation` text
    pub target_language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_language: "ar".to_string(),
            target_language: "fr".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field consistency
    pub fn validate(&self) -> Result<()> {
        if self.segmentation.window_words == 0 {
            return Err(BitextError::Config(
                "segmentation.window_words must be positive".to_string(),
            ));
        }
        if self.segmentation.max_words < self.segmentation.window_words {
            return Err(BitextError::Config(format!(
                "segmentation.max_words ({}) must be >= window_words ({})",
                self.segmentation.max_words, self.segmentation.window_words
            )));
        }
        if self.embedding.concurrency == 0 {
            return Err(BitextError::Config(
                "embedding.concurrency must be positive".to_string(),
            ));
        }
        for tag in [
            &self.pipeline.source_language,
            &self.pipeline.target_language,
        ] {
            if !self.segmentation.languages.contains_key(tag) {
                return Err(BitextError::Config(format!(
                    "no language profile configured for '{}'",
                    tag
                )));
            }
        }
        Ok(())
    }

    /// Look up the profile for a language tag
    pub fn language_profile(&self, tag: &str) -> Result<&LanguageProfile> {
        self.segmentation
            .languages
            .get(tag)
            .ok_or_else(|| BitextError::Config(format!("no language profile configured for '{}'", tag)))
    }
}
