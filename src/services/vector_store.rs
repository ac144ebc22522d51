use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::VectorStoreSettings;
use crate::core::capabilities::{CapabilityError, HybridRetrieval};
use crate::models::{Candidate, Package, SearchFilters};

/// Errors that can occur when querying the vector store
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<VectorStoreError> for CapabilityError {
    fn from(value: VectorStoreError) -> Self {
        match value {
            VectorStoreError::RequestError(e) => CapabilityError::Transport(e.to_string()),
            VectorStoreError::ApiError(msg) => CapabilityError::Unavailable(msg),
            VectorStoreError::InvalidResponse(msg) => CapabilityError::InvalidResponse(msg),
        }
    }
}

/// Client for the hybrid-retrieval capability
///
/// Speaks a Qdrant-compatible points/search API. Structured filters are
/// pushed into the search request as conjunctive must-clauses so the store
/// filters during retrieval rather than after ranking.
pub struct VectorStoreClient {
    url: String,
    api_key: Option<String>,
    collection: String,
    client: Client,
}

impl VectorStoreClient {
    pub fn new(settings: &VectorStoreSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            collection: settings.collection.clone(),
            client,
        }
    }
}

#[async_trait]
impl HybridRetrieval for VectorStoreClient {
    async fn retrieve(
        &self,
        vector: &[f32],
        filters: &SearchFilters,
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<Candidate>, CapabilityError> {
        let url = format!("{}/collections/{}/points/search", self.url, self.collection);

        let body = serde_json::json!({
            "vector": vector,
            "limit": limit,
            "score_threshold": threshold,
            "with_payload": true,
            "filter": build_filter(filters),
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key);
        }

        let response = request.send().await.map_err(VectorStoreError::from)?;

        if !response.status().is_success() {
            return Err(VectorStoreError::ApiError(format!(
                "search returned {}",
                response.status()
            ))
            .into());
        }

        let json: Value = response
            .json()
            .await
            .map_err(VectorStoreError::from)?;
        let mut candidates = parse_search_response(json).map_err(CapabilityError::from)?;

        // The store owns the contract, but a misconfigured collection must
        // not leak through: re-assert threshold and limit
        candidates.retain(|c| c.similarity >= threshold);
        candidates.truncate(limit);

        Ok(candidates)
    }
}

/// Build the conjunctive must-clause filter for the search request.
/// Published-only is always enforced at retrieval time.
fn build_filter(filters: &SearchFilters) -> Value {
    let mut must = vec![serde_json::json!({
        "key": "status",
        "match": { "value": "published" },
    })];

    if let Some(budget_max) = filters.budget_max {
        must.push(serde_json::json!({
            "key": "priceMin",
            "range": { "lte": budget_max },
        }));
    }
    if let Some(capacity_min) = filters.capacity_min {
        must.push(serde_json::json!({
            "key": "capacity",
            "range": { "gte": capacity_min },
        }));
    }
    if let Some(location) = &filters.location {
        must.push(serde_json::json!({
            "key": "location",
            "match": { "text": location },
        }));
    }

    serde_json::json!({ "must": must })
}

/// Parse search hits: each result carries a similarity score and the
/// package record in its payload
fn parse_search_response(json: Value) -> Result<Vec<Candidate>, VectorStoreError> {
    let hits = json
        .get("result")
        .and_then(|v| v.as_array())
        .ok_or_else(|| VectorStoreError::InvalidResponse("missing result array".into()))?;

    let mut candidates = Vec::with_capacity(hits.len());
    for hit in hits {
        let similarity = hit
            .get("score")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| VectorStoreError::InvalidResponse("hit missing score".into()))?;
        let payload = hit
            .get("payload")
            .ok_or_else(|| VectorStoreError::InvalidResponse("hit missing payload".into()))?;

        let package: Package = serde_json::from_value(payload.clone()).map_err(|e| {
            VectorStoreError::InvalidResponse(format!("failed to parse package payload: {}", e))
        })?;

        candidates.push(Candidate {
            package,
            similarity,
        });
    }

    Ok(candidates)
}
