use crate::core::lexicon::Lexicon;
use crate::models::{ExtractedParameters, SearchQuality};

/// Penalty for queries shorter than 5 characters
const SHORT_QUERY_PENALTY: f64 = 0.3;
/// Penalty for vague adjectives ("nice", "good", ...)
const VAGUE_QUERY_PENALTY: f64 = 0.2;
/// Penalty when fewer than 3 results came back
const FEW_RESULTS_PENALTY: f64 = 0.4;
/// Penalty when more than 50 results came back
const BROAD_RESULTS_PENALTY: f64 = 0.1;

const MIN_AUTOCOMPLETE_LEN: usize = 2;
const MAX_AUTOCOMPLETE_RESULTS: usize = 5;

/// Assess how well a query performed and what the planner could do better.
///
/// Starts at 1.0 and subtracts fixed penalties for short queries, vague
/// wording, and poor result counts; zero results force the score to zero.
/// The result is clamped to [0, 1].
pub fn analyze_quality(
    query: &str,
    result_count: usize,
    params: &ExtractedParameters,
    lexicon: &Lexicon,
) -> SearchQuality {
    let mut score = 1.0;
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if query.chars().count() < 5 {
        score -= SHORT_QUERY_PENALTY;
        issues.push("query is very short".to_string());
        suggestions.push("describe the event in more detail".to_string());
    }

    let lowered = query.to_lowercase();
    if lowered.split_whitespace().any(|word| lexicon.is_vague(word)) {
        score -= VAGUE_QUERY_PENALTY;
        issues.push("query uses vague wording".to_string());
        suggestions.push("name a cuisine, venue style, or event type".to_string());
    }

    if result_count == 0 {
        score = 0.0;
        issues.push("no results found".to_string());
        if params.budget_max.is_some() || params.capacity_min.is_some() {
            suggestions.push("loosen the budget or guest count".to_string());
        } else {
            suggestions.push("broaden the search terms".to_string());
        }
    } else if result_count < 3 {
        score -= FEW_RESULTS_PENALTY;
        issues.push("very few results".to_string());
        suggestions.push("remove a constraint to see more options".to_string());
    } else if result_count > 50 {
        score -= BROAD_RESULTS_PENALTY;
        issues.push("query matches very broadly".to_string());
        suggestions.push("add a budget, location, or guest count".to_string());
    }

    SearchQuality {
        score: score.clamp(0.0, 1.0),
        issues,
        suggestions,
    }
}

/// Complete a partial query against the popular-query list.
///
/// Pure substring match, at least 2 characters of input, up to 5 results.
pub fn autocomplete(partial: &str, lexicon: &Lexicon) -> Vec<String> {
    let needle = partial.trim().to_lowercase();
    if needle.chars().count() < MIN_AUTOCOMPLETE_LEN {
        return Vec::new();
    }

    lexicon
        .popular_queries()
        .iter()
        .filter(|query| query.to_lowercase().contains(&needle))
        .take(MAX_AUTOCOMPLETE_RESULTS)
        .cloned()
        .collect()
}
