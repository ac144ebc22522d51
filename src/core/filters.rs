use crate::models::{Event, MatchFilters, MatchScore, Package, PackageStatus};

/// Check whether a package is eligible for an event at all.
///
/// Hard filters, all must pass:
/// - capacity covers the guest count
/// - the package's price range straddles the budget (price_min ≤ budget ≤
///   price_max), not merely "is affordable"
/// - the package is published
#[inline]
pub fn passes_hard_filters(package: &Package, event: &Event) -> bool {
    if package.status != PackageStatus::Published {
        return false;
    }

    if package.capacity < event.guest_count {
        return false;
    }

    if package.price_min > event.budget || package.price_max < event.budget {
        return false;
    }

    true
}

/// Apply UI-driven range filters to an already-scored match list.
///
/// Filter-only: scores and distances are taken as-is, nothing is recomputed.
pub fn refine_matches(matches: Vec<MatchScore>, filters: &MatchFilters) -> Vec<MatchScore> {
    matches
        .into_iter()
        .filter(|m| {
            if let Some(budget_min) = filters.budget_min {
                if m.package.price_max < budget_min {
                    return false;
                }
            }
            if let Some(budget_max) = filters.budget_max {
                if m.package.price_min > budget_max {
                    return false;
                }
            }
            if let Some(capacity_min) = filters.capacity_min {
                if m.package.capacity < capacity_min {
                    return false;
                }
            }
            if let Some(max_distance) = filters.max_distance_miles {
                if m.distance_miles > max_distance {
                    return false;
                }
            }
            if let Some(service_types) = &filters.service_types {
                if !service_types.is_empty()
                    && !m
                        .package
                        .vendor
                        .services
                        .iter()
                        .any(|s| service_types.contains(s))
                {
                    return false;
                }
            }
            true
        })
        .collect()
}
