// Core algorithm exports
pub mod capabilities;
pub mod distance;
pub mod diversify;
pub mod filters;
pub mod lexicon;
pub mod matcher;
pub mod pipeline;
pub mod preprocess;
pub mod rerank;
pub mod scoring;
pub mod suggest;

pub use capabilities::{
    CapabilityError, HybridRetrieval, ParameterExtraction, QueryExpansion, SearchHistorySink,
    SuggestionProvider, TextEmbedding,
};
pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use diversify::diversify;
pub use filters::{passes_hard_filters, refine_matches};
pub use lexicon::Lexicon;
pub use matcher::{MatchResult, Matcher};
pub use pipeline::{SearchError, SearchPipeline};
pub use preprocess::Preprocessor;
pub use rerank::rerank;
pub use scoring::calculate_compatibility_score;
pub use suggest::{analyze_quality, autocomplete};
