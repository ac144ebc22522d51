use crate::core::{
    distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box},
    filters::passes_hard_filters,
    scoring::{calculate_compatibility_score, MAX_MATCH_DISTANCE_MILES},
};
use crate::models::{Event, MatchScore, Package};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<MatchScore>,
    pub total_candidates: usize,
}

/// Event/package matching orchestrator - implements the multi-stage
/// filtering and scoring pipeline
///
/// # Pipeline Stages
/// 1. Geospatial bounding box pre-filter
/// 2. Hard eligibility filters (capacity, budget straddle, published)
/// 3. Haversine distance gate
/// 4. Compatibility scoring and ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    max_distance_miles: f64,
    top_matches: usize,
}

impl Matcher {
    pub fn new(max_distance_miles: f64, top_matches: usize) -> Self {
        Self {
            max_distance_miles,
            top_matches,
        }
    }

    /// Score a catalog of packages against one event
    ///
    /// # Arguments
    /// * `packages` - Candidate packages from the catalog
    /// * `event` - The event seeking packages
    ///
    /// # Returns
    /// MatchResult with scored matches, best first, truncated to the top 20
    pub fn match_packages(&self, packages: Vec<Package>, event: &Event) -> MatchResult {
        let total_candidates = packages.len();

        let bounding_box = calculate_bounding_box(
            event.latitude,
            event.longitude,
            self.max_distance_miles,
        );

        let mut matches: Vec<MatchScore> = packages
            .into_iter()
            // Stage 1: cheap geospatial pre-filter
            .filter(|package| {
                is_within_bounding_box(
                    package.vendor.latitude,
                    package.vendor.longitude,
                    &bounding_box,
                )
            })
            // Stage 2: hard eligibility filters
            .filter(|package| passes_hard_filters(package, event))
            // Stage 3 & 4: exact distance gate, then scoring
            .filter_map(|package| {
                let distance_miles = haversine_distance(
                    event.latitude,
                    event.longitude,
                    package.vendor.latitude,
                    package.vendor.longitude,
                );

                if distance_miles > self.max_distance_miles {
                    return None;
                }

                let score = calculate_compatibility_score(&package, event, distance_miles);

                Some(MatchScore {
                    package,
                    distance_miles,
                    score,
                })
            })
            .collect();

        // Sort by score (descending) and then by distance (ascending)
        matches.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| {
                a.distance_miles
                    .partial_cmp(&b.distance_miles)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        matches.truncate(self.top_matches);

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MAX_MATCH_DISTANCE_MILES, 20)
    }
}
