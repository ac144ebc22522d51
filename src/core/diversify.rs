use crate::models::RankedResult;

/// Reduce vendor redundancy in a ranked result list.
///
/// Greedy round-robin by vendor: results are bucketed per vendor in rank
/// order, vendors are visited in order of their first (best-ranked)
/// appearance, and one result is taken per vendor per round until `limit`
/// is reached. Deterministic; within a vendor, rank order is preserved.
///
/// Callers invoke this only when diversification was requested and more
/// than `limit` results are available.
pub fn diversify(ranked: Vec<RankedResult>, limit: usize) -> Vec<RankedResult> {
    if ranked.len() <= limit {
        return ranked;
    }

    let mut vendor_order: Vec<&str> = Vec::new();
    for result in &ranked {
        let vendor_id = result.package.vendor.vendor_id.as_str();
        if !vendor_order.contains(&vendor_id) {
            vendor_order.push(vendor_id);
        }
    }

    let mut buckets: Vec<Vec<RankedResult>> = vendor_order.iter().map(|_| Vec::new()).collect();
    let vendor_order: Vec<String> = vendor_order.into_iter().map(String::from).collect();
    for result in ranked {
        let idx = vendor_order
            .iter()
            .position(|v| *v == result.package.vendor.vendor_id)
            .unwrap_or(0);
        buckets[idx].push(result);
    }

    let mut selected = Vec::with_capacity(limit);
    let mut round = 0;
    while selected.len() < limit {
        let mut picked_any = false;
        for bucket in &mut buckets {
            if round < bucket.len() {
                // Buckets hold rank-ordered results; index by round
                selected.push(bucket[round].clone());
                picked_any = true;
                if selected.len() == limit {
                    break;
                }
            }
        }
        if !picked_any {
            break;
        }
        round += 1;
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Package, PackageStatus, VendorSummary};

    fn ranked(id: &str, vendor_id: &str, score: f64) -> RankedResult {
        RankedResult {
            package: Package {
                package_id: id.to_string(),
                title: format!("Package {}", id),
                price_min: 3000.0,
                price_max: 7000.0,
                capacity: 120,
                status: PackageStatus::Published,
                venue: None,
                catering: None,
                entertainment: None,
                vendor: VendorSummary {
                    vendor_id: vendor_id.to_string(),
                    name: format!("Vendor {}", vendor_id),
                    latitude: 34.0522,
                    longitude: -118.2437,
                    services: vec![],
                },
            },
            similarity: score,
            rerank_score: score,
            explanations: vec![],
        }
    }

    #[test]
    fn test_returns_input_when_at_or_below_limit() {
        let results = vec![ranked("a", "v1", 0.9), ranked("b", "v2", 0.8)];
        let out = diversify(results.clone(), 5);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].package.package_id, "a");
    }

    #[test]
    fn test_round_robin_across_vendors() {
        // Vendor v1 dominates the top ranks
        let results = vec![
            ranked("a", "v1", 0.95),
            ranked("b", "v1", 0.90),
            ranked("c", "v1", 0.85),
            ranked("d", "v2", 0.80),
            ranked("e", "v3", 0.75),
        ];

        let out = diversify(results, 3);
        let ids: Vec<&str> = out.iter().map(|r| r.package.package_id.as_str()).collect();

        // One per vendor before v1 repeats
        assert_eq!(ids, vec!["a", "d", "e"]);
    }

    #[test]
    fn test_second_round_picks_next_best_per_vendor() {
        let results = vec![
            ranked("a", "v1", 0.95),
            ranked("b", "v2", 0.90),
            ranked("c", "v1", 0.85),
            ranked("d", "v2", 0.80),
            ranked("e", "v1", 0.75),
        ];

        let out = diversify(results, 4);
        let ids: Vec<&str> = out.iter().map(|r| r.package.package_id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_deterministic() {
        let results = vec![
            ranked("a", "v1", 0.95),
            ranked("b", "v2", 0.90),
            ranked("c", "v3", 0.85),
            ranked("d", "v1", 0.80),
        ];

        let first = diversify(results.clone(), 2);
        let second = diversify(results, 2);

        let first_ids: Vec<&str> = first.iter().map(|r| r.package.package_id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.package.package_id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
