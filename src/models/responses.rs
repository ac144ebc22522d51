use serde::{Deserialize, Serialize};

use crate::models::domain::{ExtractedParameters, MatchScore, RankedResult, SearchQuality};

/// Response for the search pipeline endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RankedResult>,
    pub count: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "correctedQuery", skip_serializing_if = "Option::is_none")]
    pub corrected_query: Option<String>,
    #[serde(rename = "expandedQuery", skip_serializing_if = "Option::is_none")]
    pub expanded_query: Option<String>,
    #[serde(rename = "extractedParams")]
    pub extracted_params: ExtractedParameters,
    #[serde(rename = "didYouMean", skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<Vec<String>>,
    #[serde(rename = "relatedSearches", skip_serializing_if = "Option::is_none")]
    pub related_searches: Option<Vec<String>>,
    #[serde(rename = "searchQuality", skip_serializing_if = "Option::is_none")]
    pub search_quality: Option<SearchQuality>,
}

/// Response for the package matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindPackageMatchesResponse {
    pub matches: Vec<MatchScore>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the refine endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineMatchesResponse {
    pub matches: Vec<MatchScore>,
    pub count: usize,
}

/// Response for autocomplete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
