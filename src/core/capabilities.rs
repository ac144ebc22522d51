use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Candidate, ExtractedParameters, SearchFilters, SearchRecord};

/// Errors surfaced by external capability adapters
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("capability request failed: {0}")]
    Transport(String),

    #[error("capability returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

/// Text-embedding capability: maps text to fixed-dimension vectors.
///
/// `embed_batch` must preserve input order and index alignment.
#[async_trait]
pub trait TextEmbedding: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError>;
}

/// Structured-parameter extraction backed by a language model.
///
/// Callers must not trust this blindly: deterministic preprocessing results
/// take precedence when both are present.
#[async_trait]
pub trait ParameterExtraction: Send + Sync {
    async fn extract(&self, raw_query: &str) -> Result<ExtractedParameters, CapabilityError>;
}

/// Optional query expansion: appends semantically related terms.
#[async_trait]
pub trait QueryExpansion: Send + Sync {
    async fn expand(&self, text: &str) -> Result<String, CapabilityError>;
}

/// Hybrid vector + scalar-filter retrieval.
///
/// Implementations push the filters into retrieval (conjunctive with the
/// similarity threshold), return candidates ordered by similarity
/// descending, include only candidates at or above the threshold, and
/// never exceed `limit`.
#[async_trait]
pub trait HybridRetrieval: Send + Sync {
    async fn retrieve(
        &self,
        vector: &[f32],
        filters: &SearchFilters,
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<Candidate>, CapabilityError>;
}

/// Query alternatives for struggling or exploring searchers.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Up to 3 alternative phrasings; requested only for poor result counts
    async fn did_you_mean(&self, query: &str) -> Result<Vec<String>, CapabilityError>;

    /// Up to 5 related queries
    async fn related_searches(&self, query: &str) -> Result<Vec<String>, CapabilityError>;
}

/// Write-only, best-effort search history.
#[async_trait]
pub trait SearchHistorySink: Send + Sync {
    async fn record_search(&self, record: &SearchRecord) -> Result<(), CapabilityError>;
}
