mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::core::{
    HybridRetrieval, Lexicon, Matcher, ParameterExtraction, Preprocessor, QueryExpansion,
    SearchHistorySink, SearchPipeline, SuggestionProvider, TextEmbedding,
};
use crate::models::RerankWeights;
use crate::routes::AppState;
use crate::services::{
    CatalogClient, EmbeddingCache, EmbeddingClient, HistoryStore, LlmClient, VectorStoreClient,
};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Eventra search service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Domain lexicon, shared by the preprocessor and autocomplete
    let lexicon = Arc::new(Lexicon::default_domain());
    let preprocessor = Preprocessor::new(Arc::clone(&lexicon));

    // Capability clients
    let cache_size = settings.cache.embedding_cache_size.unwrap_or(10_000);
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(3600);
    let embedding_cache = EmbeddingCache::new(cache_size, cache_ttl);
    let embedder = Arc::new(EmbeddingClient::new(&settings.embedding, embedding_cache));

    info!("Embedding client initialized (cache: {} entries, TTL: {}s)", cache_size, cache_ttl);

    let llm = Arc::new(LlmClient::new(&settings.llm));
    let vector_store = Arc::new(VectorStoreClient::new(&settings.vector_store));
    let catalog = Arc::new(CatalogClient::new(&settings.catalog));

    info!("Capability clients initialized");

    // Initialize history store
    let history = Arc::new(
        HistoryStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("History store initialized");

    // Build the pipeline with configured rerank weights
    let weights = RerankWeights {
        budget: settings.rerank.weights.budget,
        capacity: settings.rerank.weights.capacity,
        food_type: settings.rerank.weights.food_type,
        venue_type: settings.rerank.weights.venue_type,
    };

    let extractor: Arc<dyn ParameterExtraction> = llm.clone();
    let expander: Arc<dyn QueryExpansion> = llm.clone();
    let embedder_cap: Arc<dyn TextEmbedding> = embedder.clone();
    let retriever: Arc<dyn HybridRetrieval> = vector_store.clone();
    let suggestions: Arc<dyn SuggestionProvider> = llm.clone();
    let history_sink: Arc<dyn SearchHistorySink> = history.clone();

    let pipeline = Arc::new(SearchPipeline::new(
        preprocessor,
        extractor,
        expander,
        embedder_cap,
        retriever,
        suggestions,
        history_sink,
        weights,
    ));

    info!("Search pipeline initialized with weights: {:?}", weights);

    let matcher = Matcher::new(
        settings.matching.max_distance_miles,
        settings.matching.top_matches,
    );

    // Build application state
    let app_state = AppState {
        pipeline,
        lexicon,
        catalog,
        history,
        matcher,
        max_match_distance_miles: settings.matching.max_distance_miles,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
