use crate::models::{Candidate, ExtractedParameters, Package, RankedResult, RerankWeights};

/// Deterministic reranker
///
/// Rescopes retrieval order using the extracted parameters: each candidate's
/// base similarity is adjusted by additive bonuses for budget closeness,
/// capacity fit, food type, and venue style. Criteria that contribute a
/// nonzero bonus are recorded as human-readable explanations, in that fixed
/// order. Pure: no I/O, no randomness.
///
/// Output is sorted by adjusted score descending; ties keep retrieval order.
pub fn rerank(
    candidates: Vec<Candidate>,
    params: &ExtractedParameters,
    weights: &RerankWeights,
) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .map(|candidate| rerank_one(candidate, params, weights))
        .collect();

    // Stable sort: equal scores stay in retrieval order
    results.sort_by(|a, b| {
        b.rerank_score
            .partial_cmp(&a.rerank_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

fn rerank_one(
    candidate: Candidate,
    params: &ExtractedParameters,
    weights: &RerankWeights,
) -> RankedResult {
    let mut bonus = 0.0;
    let mut explanations = Vec::new();

    if let Some(budget_bonus) = budget_bonus(&candidate.package, params, weights.budget) {
        if budget_bonus > 0.0 {
            bonus += budget_bonus;
            explanations.push("within budget".to_string());
        }
    }

    if let Some(capacity_bonus) = capacity_bonus(&candidate.package, params, weights.capacity) {
        if capacity_bonus > 0.0 {
            bonus += capacity_bonus;
            explanations.push("fits guest count".to_string());
        }
    }

    if let Some(food_type) = matched_food_type(&candidate.package, params) {
        bonus += weights.food_type;
        explanations.push(format!("matches food preference: {}", food_type));
    }

    if let Some(venue_type) = matched_venue_type(&candidate.package, params) {
        bonus += weights.venue_type;
        explanations.push(format!("matches venue style: {}", venue_type));
    }

    RankedResult {
        similarity: candidate.similarity,
        rerank_score: candidate.similarity + bonus,
        explanations,
        package: candidate.package,
    }
}

/// Budget bonus: proximity of the price-range midpoint to the target
/// budget, zero when the package starts above the budget
fn budget_bonus(package: &Package, params: &ExtractedParameters, weight: f64) -> Option<f64> {
    let budget = params.budget_max?;
    if budget <= 0.0 || package.price_min > budget {
        return Some(0.0);
    }

    let deviation = ((package.price_mid() - budget).abs() / budget).min(1.0);
    Some(weight * (1.0 - deviation))
}

/// Capacity bonus by capacity/guest ratio band, mirroring the matcher's
/// banding: snug fits earn the full weight, oversized packages decay
fn capacity_bonus(package: &Package, params: &ExtractedParameters, weight: f64) -> Option<f64> {
    let capacity_min = params.capacity_min?;
    if capacity_min == 0 || package.capacity < capacity_min {
        return Some(0.0);
    }

    let ratio = package.capacity as f64 / capacity_min as f64;
    let factor = if ratio <= 1.5 {
        1.0
    } else if ratio <= 2.0 {
        0.75
    } else {
        (1.0 - (ratio - 2.0) * 0.25).max(0.0)
    };

    Some(weight * factor)
}

fn matched_food_type<'a>(
    package: &Package,
    params: &'a ExtractedParameters,
) -> Option<&'a str> {
    let food_type = params.food_type.as_deref()?;
    let catering = package.catering.as_ref()?;
    catering
        .food_types
        .iter()
        .any(|f| f.eq_ignore_ascii_case(food_type))
        .then_some(food_type)
}

fn matched_venue_type<'a>(
    package: &Package,
    params: &'a ExtractedParameters,
) -> Option<&'a str> {
    let venue_type = params.venue_type.as_deref()?;
    let venue = package.venue.as_ref()?;
    venue
        .style
        .eq_ignore_ascii_case(venue_type)
        .then_some(venue_type)
}
