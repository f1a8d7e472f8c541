//! Error types for bitext-rs
//!
//! This module provides error handling for the whole indexing pipeline:
//! document ingestion, embedding provider calls, and vector store writes.

use thiserror::Error;

/// Main error type for bitext operations
#[derive(Error, Debug)]
pub enum BitextError {
    /// Embedding provider failure, carrying the document/phrase locus
    #[error("Embedding failed for document {document_id} phrase {phrase_index}: {message}")]
    Embedding {
        document_id: u64,
        phrase_index: usize,
        message: String,
    },

    /// Embedding provider call exceeded the configured timeout
    #[error("Embedding timed out for document {document_id} phrase {phrase_index} after {timeout_secs}s")]
    EmbeddingTimeout {
        document_id: u64,
        phrase_index: usize,
        timeout_secs: u64,
    },

    /// Vector store connectivity or write rejection
    #[error("Vector store error: {0}")]
    Store(String),

    /// Embedding provider setup/probe errors
    #[error("Embedding provider error: {0}")]
    Provider(String),

    /// A document resolved to more phrase pairs than the id stride allows
    #[error("Document {document_id} resolved to {pairs} phrase pairs, exceeding the id stride")]
    DocumentOverflow { document_id: u64, pairs: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for bitext operations
pub type Result<T> = std::result::Result<T, BitextError>;

impl From<anyhow::Error> for BitextError {
    fn from(err: anyhow::Error) -> Self {
        BitextError::Config(err.to_string())
    }
}
