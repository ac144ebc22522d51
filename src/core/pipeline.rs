use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{
    capabilities::{
        CapabilityError, HybridRetrieval, ParameterExtraction, QueryExpansion, SearchHistorySink,
        SuggestionProvider, TextEmbedding,
    },
    diversify::diversify,
    preprocess::Preprocessor,
    rerank::rerank,
    suggest::analyze_quality,
};
use crate::models::{
    Candidate, ExtractedParameters, PreprocessedQuery, RankedResult, RerankWeights, SearchRecord,
    SearchRequest, SearchResponse,
};

const MIN_QUERY_LEN: usize = 2;
const MAX_QUERY_LEN: usize = 500;
const MAX_LIMIT: usize = 100;

/// Result counts below this trigger did-you-mean alternatives
const POOR_RESULT_COUNT: usize = 3;

const MAX_DID_YOU_MEAN: usize = 3;
const MAX_RELATED_SEARCHES: usize = 5;

/// Errors surfaced by the search pipeline, each with a distinct wire code
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request rejected before any external call
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Embedding failed; retrieval cannot proceed without a valid vector
    #[error("embedding generation failed: {0}")]
    Embedding(#[source] CapabilityError),

    /// Parameter extraction failed and no deterministic fallback existed
    #[error("parameter extraction failed: {0}")]
    Extraction(#[source] CapabilityError),

    /// The retrieval store failed
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] CapabilityError),
}

impl SearchError {
    /// Stable machine-readable code for the wire
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery(_) => "invalid_query",
            SearchError::Embedding(_) => "embedding_failed",
            SearchError::Extraction(_) => "extraction_failed",
            SearchError::Retrieval(_) => "retrieval_failed",
        }
    }
}

/// The search-and-ranking pipeline
///
/// Composes the stages in order: preprocess, extract parameters, expand,
/// embed, retrieve, rerank, diversify, suggest. Stages run synchronously
/// per request; the only awaits are the external capability calls. All
/// state is per-request, so one pipeline instance serves concurrent
/// requests behind an `Arc`.
pub struct SearchPipeline {
    preprocessor: Preprocessor,
    extractor: Arc<dyn ParameterExtraction>,
    expander: Arc<dyn QueryExpansion>,
    embedder: Arc<dyn TextEmbedding>,
    retriever: Arc<dyn HybridRetrieval>,
    suggestions: Arc<dyn SuggestionProvider>,
    history: Arc<dyn SearchHistorySink>,
    weights: RerankWeights,
}

impl SearchPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        preprocessor: Preprocessor,
        extractor: Arc<dyn ParameterExtraction>,
        expander: Arc<dyn QueryExpansion>,
        embedder: Arc<dyn TextEmbedding>,
        retriever: Arc<dyn HybridRetrieval>,
        suggestions: Arc<dyn SuggestionProvider>,
        history: Arc<dyn SearchHistorySink>,
        weights: RerankWeights,
    ) -> Self {
        Self {
            preprocessor,
            extractor,
            expander,
            embedder,
            retriever,
            suggestions,
            history,
            weights,
        }
    }

    /// Run the full pipeline for one request
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse, SearchError> {
        validate_request(&request)?;

        let preprocessed = self.preprocessor.preprocess(&request.query);
        debug!("preprocessed query: {}", preprocessed.with_synonyms);

        // Probabilistic extraction, merged under the deterministic results
        let extracted = match self.extractor.extract(&request.query).await {
            Ok(params) => params,
            Err(e) => {
                warn!("parameter extraction failed, using preprocessing only: {}", e);
                ExtractedParameters::default()
            }
        };
        let params = merge_parameters(&preprocessed, extracted, &request);

        // Optional expansion; input is the corrected, synonym-expanded text
        // so misspellings aren't amplified
        let mut expanded_query = None;
        let embed_text = if request.use_expansion {
            match self.expander.expand(&preprocessed.with_synonyms).await {
                Ok(text) => {
                    expanded_query = Some(text.clone());
                    text
                }
                Err(e) => {
                    warn!("query expansion failed, using unexpanded text: {}", e);
                    preprocessed.with_synonyms.clone()
                }
            }
        } else {
            preprocessed.with_synonyms.clone()
        };

        // No fallback exists for a missing embedding: fail the request
        let vector = self
            .embedder
            .embed(&embed_text)
            .await
            .map_err(SearchError::Embedding)?;

        let retrieval_limit = if request.use_diversify {
            // Headroom so the diversifier has variety to choose from
            (request.limit * 2).min(MAX_LIMIT * 2)
        } else {
            request.limit
        };
        let filters = crate::models::SearchFilters {
            budget_max: params.budget_max,
            capacity_min: params.capacity_min,
            location: params.location.clone(),
        };
        let candidates = self
            .retriever
            .retrieve(&vector, &filters, request.threshold, retrieval_limit)
            .await
            .map_err(SearchError::Retrieval)?;
        let total_matches = candidates.len();

        let mut results = if request.use_reranking {
            rerank(candidates, &params, &self.weights)
        } else {
            passthrough(candidates)
        };

        if request.use_diversify && results.len() > request.limit {
            results = diversify(results, request.limit);
        } else {
            results.truncate(request.limit);
        }

        let (did_you_mean, related_searches, search_quality) = if request.include_suggestions {
            self.build_suggestions(&request.query, results.len(), &params)
                .await
        } else {
            (None, None, None)
        };

        let corrected_query =
            (preprocessed.corrected != preprocessed.normalized).then(|| preprocessed.corrected.clone());

        self.record_history(&request.query, results.len(), params.clone());

        info!(
            "search returned {} of {} results for query \"{}\"",
            results.len(),
            total_matches,
            request.query
        );

        Ok(SearchResponse {
            count: results.len(),
            results,
            total_matches,
            corrected_query,
            expanded_query,
            extracted_params: params,
            did_you_mean,
            related_searches,
            search_quality,
        })
    }

    /// Quality score plus the two best-effort suggestion calls.
    /// Neither capability call may fail the request: errors degrade to
    /// empty lists.
    async fn build_suggestions(
        &self,
        query: &str,
        result_count: usize,
        params: &ExtractedParameters,
    ) -> (
        Option<Vec<String>>,
        Option<Vec<String>>,
        Option<crate::models::SearchQuality>,
    ) {
        let quality = analyze_quality(query, result_count, params, self.preprocessor.lexicon());

        let did_you_mean = if result_count < POOR_RESULT_COUNT {
            match self.suggestions.did_you_mean(query).await {
                Ok(alternatives) => {
                    Some(alternatives.into_iter().take(MAX_DID_YOU_MEAN).collect())
                }
                Err(e) => {
                    warn!("did-you-mean generation failed: {}", e);
                    Some(Vec::new())
                }
            }
        } else {
            None
        };

        let related_searches = match self.suggestions.related_searches(query).await {
            Ok(related) => Some(related.into_iter().take(MAX_RELATED_SEARCHES).collect()),
            Err(e) => {
                warn!("related-search generation failed: {}", e);
                Some(Vec::new())
            }
        };

        (did_you_mean, related_searches, Some(quality))
    }

    /// Fire-and-forget history write; failures are logged, never surfaced,
    /// and the response does not wait for the write
    fn record_history(&self, query: &str, result_count: usize, params: ExtractedParameters) {
        let record = SearchRecord {
            id: uuid::Uuid::new_v4(),
            query: query.to_string(),
            result_count,
            params,
            created_at: chrono::Utc::now(),
        };
        let history = Arc::clone(&self.history);
        tokio::spawn(async move {
            if let Err(e) = history.record_search(&record).await {
                warn!("failed to record search history: {}", e);
            }
        });
    }
}

/// Reject malformed requests before any external call
pub fn validate_request(request: &SearchRequest) -> Result<(), SearchError> {
    let query_len = request.query.chars().count();
    if !(MIN_QUERY_LEN..=MAX_QUERY_LEN).contains(&query_len) {
        return Err(SearchError::InvalidQuery(format!(
            "query length must be between {} and {} characters, got {}",
            MIN_QUERY_LEN, MAX_QUERY_LEN, query_len
        )));
    }
    if request.limit == 0 || request.limit > MAX_LIMIT {
        return Err(SearchError::InvalidQuery(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, request.limit
        )));
    }
    if !(0.0..=1.0).contains(&request.threshold) {
        return Err(SearchError::InvalidQuery(format!(
            "threshold must be between 0 and 1, got {}",
            request.threshold
        )));
    }
    Ok(())
}

/// Merge parameter sources by precedence: explicit request filters, then
/// deterministic preprocessing, then probabilistic extraction. Regex-derived
/// values win over the language model because they are auditable.
pub fn merge_parameters(
    preprocessed: &PreprocessedQuery,
    extracted: ExtractedParameters,
    request: &SearchRequest,
) -> ExtractedParameters {
    let request_filters = request.filters.clone().unwrap_or_default();

    ExtractedParameters {
        budget_max: request_filters
            .budget_max
            .or(preprocessed.price_range.and_then(|r| r.max))
            .or(extracted.budget_max),
        capacity_min: request_filters
            .capacity_min
            .or(preprocessed.guest_count)
            .or(extracted.capacity_min),
        location: request_filters
            .location
            .or_else(|| preprocessed.location.clone())
            .or(extracted.location),
        food_type: extracted.food_type,
        venue_type: extracted.venue_type,
    }
}

fn passthrough(candidates: Vec<Candidate>) -> Vec<RankedResult> {
    candidates
        .into_iter()
        .map(|candidate| RankedResult {
            similarity: candidate.similarity,
            rerank_score: candidate.similarity,
            explanations: Vec::new(),
            package: candidate.package,
        })
        .collect()
}
