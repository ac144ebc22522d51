use serde::{Deserialize, Serialize};

/// Publication state of a vendor package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Draft,
    Published,
}

/// Vendor summary carried alongside each package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSummary {
    #[serde(rename = "vendorId")]
    pub vendor_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Service categories the vendor offers (venue, catering, dj, ...)
    #[serde(default)]
    pub services: Vec<String>,
}

/// Venue details attached to a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDetails {
    pub style: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Catering details attached to a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CateringDetails {
    #[serde(rename = "foodTypes", default)]
    pub food_types: Vec<String>,
}

/// Entertainment details attached to a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntertainmentDetails {
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A vendor-supplied event package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "packageId")]
    pub package_id: String,
    pub title: String,
    #[serde(rename = "priceMin")]
    pub price_min: f64,
    #[serde(rename = "priceMax")]
    pub price_max: f64,
    pub capacity: u32,
    pub status: PackageStatus,
    #[serde(default)]
    pub venue: Option<VenueDetails>,
    #[serde(default)]
    pub catering: Option<CateringDetails>,
    #[serde(default)]
    pub entertainment: Option<EntertainmentDetails>,
    pub vendor: VendorSummary,
}

impl Package {
    /// Midpoint of the package's price range, used by budget scoring
    pub fn price_mid(&self) -> f64 {
        (self.price_min + self.price_max) / 2.0
    }
}

/// A planned event looking for packages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub budget: f64,
    #[serde(rename = "guestCount")]
    pub guest_count: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "eventType")]
    pub event_type: String,
}

/// A package returned by vector retrieval with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub package: Package,
    pub similarity: f64,
}

/// A reranked candidate with its adjusted score and explanations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub package: Package,
    pub similarity: f64,
    #[serde(rename = "rerankScore")]
    pub rerank_score: f64,
    pub explanations: Vec<String>,
}

/// Compatibility score between one package and one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScore {
    pub package: Package,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    pub score: i32,
}

/// Price range extracted from query text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Output of the deterministic query preprocessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessedQuery {
    pub original: String,
    pub normalized: String,
    pub corrected: String,
    /// Corrected text with synonyms appended and duplicates removed,
    /// tokens in first-seen order
    #[serde(rename = "withSynonyms")]
    pub with_synonyms: String,
    #[serde(rename = "priceRange", default)]
    pub price_range: Option<PriceRange>,
    #[serde(rename = "guestCount", default)]
    pub guest_count: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Structured filters merged from preprocessing and LLM extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedParameters {
    #[serde(rename = "budgetMax", default)]
    pub budget_max: Option<f64>,
    #[serde(rename = "capacityMin", default)]
    pub capacity_min: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "foodType", default)]
    pub food_type: Option<String>,
    #[serde(rename = "venueType", default)]
    pub venue_type: Option<String>,
}

/// Search quality assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuality {
    pub score: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Bonus weights applied by the reranker
#[derive(Debug, Clone, Copy)]
pub struct RerankWeights {
    pub budget: f64,
    pub capacity: f64,
    pub food_type: f64,
    pub venue_type: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            budget: 0.15,
            capacity: 0.10,
            food_type: 0.10,
            venue_type: 0.05,
        }
    }
}

/// One recorded search, written best-effort after each request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: uuid::Uuid,
    pub query: String,
    pub result_count: usize,
    pub params: ExtractedParameters,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
