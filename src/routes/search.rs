use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{suggest::autocomplete, Lexicon, Matcher, SearchError, SearchPipeline};
use crate::models::{
    AutocompleteQuery, AutocompleteResponse, ErrorResponse, HealthResponse, SearchRequest,
};
use crate::services::{CatalogClient, HistoryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SearchPipeline>,
    pub lexicon: Arc<Lexicon>,
    pub catalog: Arc<CatalogClient>,
    pub history: Arc<HistoryStore>,
    pub matcher: Matcher,
    pub max_match_distance_miles: f64,
}

/// Configure search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/search/autocomplete", web::get().to(autocomplete_handler));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.history.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "query": "rustic barn wedding for 150 guests under $5000",
///   "limit": 50,
///   "threshold": 0.3,
///   "useExpansion": true,
///   "useReranking": true,
///   "useDiversify": false,
///   "includeSuggestions": true
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.pipeline.search(req.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(e),
    }
}

/// Autocomplete endpoint
///
/// GET /api/v1/search/autocomplete?q=wed
async fn autocomplete_handler(
    state: web::Data<AppState>,
    query: web::Query<AutocompleteQuery>,
) -> impl Responder {
    let suggestions = autocomplete(&query.q, &state.lexicon);
    HttpResponse::Ok().json(AutocompleteResponse { suggestions })
}

/// Map pipeline errors to wire responses with distinct codes
pub fn error_response(error: SearchError) -> HttpResponse {
    let (status, status_code) = match &error {
        SearchError::InvalidQuery(_) => (actix_web::http::StatusCode::BAD_REQUEST, 400),
        SearchError::Embedding(_) | SearchError::Extraction(_) | SearchError::Retrieval(_) => {
            (actix_web::http::StatusCode::BAD_GATEWAY, 502)
        }
    };

    if status_code >= 500 {
        tracing::error!("search pipeline failure: {}", error);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: error.code().to_string(),
        message: error.to_string(),
        status_code,
    })
}
