// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Candidate, CateringDetails, EntertainmentDetails, Event, ExtractedParameters,
    MatchScore, Package, PackageStatus, PreprocessedQuery, PriceRange, RankedResult,
    RerankWeights, SearchQuality, SearchRecord, VendorSummary, VenueDetails,
};
pub use requests::{
    AutocompleteQuery, EventInput, FindPackageMatchesRequest, MatchFilters, RefineMatchesRequest,
    SearchFilters, SearchRequest,
};
pub use responses::{
    AutocompleteResponse, ErrorResponse, FindPackageMatchesResponse, HealthResponse,
    RefineMatchesResponse, SearchResponse,
};
