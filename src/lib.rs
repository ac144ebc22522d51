//! Eventra Search - hybrid search and matching service for the Eventra
//! event marketplace
//!
//! This library provides the search-and-ranking pipeline that turns a
//! free-text event description into a ranked, explainable set of candidate
//! packages, plus the deterministic matching algorithm that scores
//! event/package compatibility from geography, budget, and capacity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    haversine_distance, rerank, Lexicon, Matcher, Preprocessor, SearchError, SearchPipeline,
};
pub use crate::models::{
    Candidate, Event, ExtractedParameters, MatchScore, Package, RankedResult, SearchRequest,
    SearchResponse,
};
