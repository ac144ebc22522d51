use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Event, MatchScore};

/// Structured filters supplied alongside the free-text query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<f64>,
    #[serde(rename = "capacityMin", default)]
    pub capacity_min: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to run the search pipeline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 2, max = 500))]
    pub query: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(rename = "useExpansion", default = "default_true")]
    pub use_expansion: bool,
    #[serde(rename = "useReranking", default = "default_true")]
    pub use_reranking: bool,
    #[serde(rename = "useDiversify", default)]
    pub use_diversify: bool,
    #[serde(rename = "includeSuggestions", default = "default_true")]
    pub include_suggestions: bool,
    #[serde(default)]
    pub filters: Option<SearchFilters>,
}

fn default_limit() -> usize {
    50
}

fn default_threshold() -> f64 {
    0.3
}

fn default_true() -> bool {
    true
}

impl SearchRequest {
    /// Build a request with defaults for everything but the query text
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: default_limit(),
            threshold: default_threshold(),
            use_expansion: true,
            use_reranking: true,
            use_diversify: false,
            include_suggestions: true,
            filters: None,
        }
    }
}

/// Request to score catalog packages against an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindPackageMatchesRequest {
    #[validate(nested)]
    pub event: EventInput,
}

/// Event payload with wire-level validation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventInput {
    #[validate(range(min = 1.0))]
    pub budget: f64,
    #[validate(range(min = 1))]
    #[serde(rename = "guestCount")]
    pub guest_count: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "eventType")]
    pub event_type: String,
}

impl From<EventInput> for Event {
    fn from(value: EventInput) -> Self {
        Event {
            budget: value.budget,
            guest_count: value.guest_count,
            latitude: value.latitude,
            longitude: value.longitude,
            event_type: value.event_type,
        }
    }
}

/// Range filters for refining already-scored matches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFilters {
    #[serde(rename = "budgetMin", default)]
    pub budget_min: Option<f64>,
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<f64>,
    #[serde(rename = "capacityMin", default)]
    pub capacity_min: Option<u32>,
    #[serde(rename = "maxDistanceMiles", default)]
    pub max_distance_miles: Option<f64>,
    #[serde(rename = "serviceTypes", default)]
    pub service_types: Option<Vec<String>>,
}

/// Request to filter an already-scored match list without rescoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineMatchesRequest {
    pub matches: Vec<MatchScore>,
    #[serde(default)]
    pub filters: MatchFilters,
}

/// Autocomplete query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteQuery {
    pub q: String,
}
