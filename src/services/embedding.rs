use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::EmbeddingSettings;
use crate::core::capabilities::{CapabilityError, TextEmbedding};
use crate::services::cache::EmbeddingCache;

/// Fixed character-per-token heuristic for deterministic truncation
const CHARS_PER_TOKEN: usize = 4;

/// Errors that can occur when calling the embedding capability
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<EmbeddingError> for CapabilityError {
    fn from(value: EmbeddingError) -> Self {
        match value {
            EmbeddingError::RequestError(e) => CapabilityError::Transport(e.to_string()),
            EmbeddingError::ApiError(msg) => CapabilityError::Unavailable(msg),
            EmbeddingError::InvalidResponse(msg) => CapabilityError::InvalidResponse(msg),
        }
    }
}

/// Client for the text-embedding capability
///
/// Speaks an OpenAI-compatible /embeddings API. Inputs beyond the upstream
/// token budget are truncated deterministically before submission; batch
/// requests are issued one at a time to respect upstream rate limits.
pub struct EmbeddingClient {
    api_base: String,
    api_key: String,
    model: String,
    dimensions: usize,
    max_input_chars: usize,
    client: Client,
    cache: EmbeddingCache,
}

impl EmbeddingClient {
    pub fn new(settings: &EmbeddingSettings, cache: EmbeddingCache) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            max_input_chars: settings.max_input_tokens * CHARS_PER_TOKEN,
            client,
            cache,
        }
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embeddings", self.api_base);
        let input = truncate_to_budget(text, self.max_input_chars);

        let body = serde_json::json!({
            "model": self.model,
            "input": [input],
            "dimensions": self.dimensions,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmbeddingError::ApiError(format!(
                "embedding request returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let mut vectors = parse_embedding_response(json)?;

        if vectors.is_empty() {
            return Err(EmbeddingError::InvalidResponse(
                "empty embedding data array".into(),
            ));
        }
        Ok(vectors.remove(0))
    }
}

#[async_trait]
impl TextEmbedding for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, CapabilityError> {
        if let Some(cached) = self.cache.get(text).await {
            return Ok(cached);
        }

        let vector = self.request_embedding(text).await.map_err(CapabilityError::from)?;
        self.cache.insert(text, vector.clone()).await;
        Ok(vector)
    }

    /// Sequential on purpose: each call completes before the next is
    /// issued, keeping the request rate within upstream limits. Output
    /// order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CapabilityError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Truncate on a char boundary to the fixed character budget
fn truncate_to_budget(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Parse an embeddings response, re-sorting items by their declared index
/// so output order always matches input order
fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let data = json
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::InvalidResponse("missing data array".into()))?;

    let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());
    for (fallback_index, item) in data.iter().enumerate() {
        let index = item
            .get("index")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(fallback_index);
        let embedding = item
            .get("embedding")
            .and_then(|v| v.as_array())
            .ok_or_else(|| EmbeddingError::InvalidResponse("item missing embedding array".into()))?;

        let mut vector = Vec::with_capacity(embedding.len());
        for value in embedding {
            let number = value
                .as_f64()
                .ok_or_else(|| EmbeddingError::InvalidResponse("non-numeric embedding value".into()))?;
            vector.push(number as f32);
        }
        indexed.push((index, vector));
    }

    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, vector)| vector).collect())
}
