use crate::models::{Event, Package};

/// Matches beyond this distance are rejected outright
pub const MAX_MATCH_DISTANCE_MILES: f64 = 20.0;

/// Calculate the compatibility score (nominal 0-100) for an eligible
/// package at a known distance from the event.
///
/// Scoring components, each independently bounded:
/// - distance: up to 40 pts, 2 pts lost per mile
/// - budget closeness: up to 30 pts, price-range midpoint vs budget
/// - capacity fit: up to 20 pts, by capacity/guest ratio bands
/// - service completeness: 3 pts per vendor service, capped at 10
///
/// The sum is rounded to the nearest integer and is not clamped.
pub fn calculate_compatibility_score(package: &Package, event: &Event, distance_miles: f64) -> i32 {
    let total = distance_points(distance_miles)
        + budget_points(package, event.budget)
        + capacity_points(package.capacity, event.guest_count)
        + service_points(package.vendor.services.len());

    total.round() as i32
}

/// Distance component: 40 pts at 0 miles, falling 2 pts per mile
#[inline]
pub fn distance_points(distance_miles: f64) -> f64 {
    (40.0 - distance_miles * 2.0).max(0.0)
}

/// Budget component: full 30 pts when the price-range midpoint equals the
/// budget, falling linearly with relative deviation
#[inline]
pub fn budget_points(package: &Package, budget: f64) -> f64 {
    let deviation = ((package.price_mid() - budget).abs() / budget).min(1.0);
    30.0 * (1.0 - deviation)
}

/// Capacity component by capacity/guest ratio band.
///
/// Hard filtering already guarantees ratio ≥ 1: a snug fit scores best,
/// moderate headroom a little less, heavy oversizing decays to zero.
#[inline]
pub fn capacity_points(capacity: u32, guest_count: u32) -> f64 {
    let ratio = capacity as f64 / guest_count as f64;

    if ratio <= 1.5 {
        20.0
    } else if ratio <= 2.0 {
        15.0
    } else {
        (20.0 - (ratio - 2.0) * 5.0).max(0.0)
    }
}

/// Service completeness: 3 pts per service category, capped at 10
#[inline]
pub fn service_points(service_count: usize) -> f64 {
    (service_count as f64 * 3.0).min(10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PackageStatus, VendorSummary};

    fn test_package(price_min: f64, price_max: f64, capacity: u32, services: usize) -> Package {
        Package {
            package_id: "pkg_1".to_string(),
            title: "Test Package".to_string(),
            price_min,
            price_max,
            capacity,
            status: PackageStatus::Published,
            venue: None,
            catering: None,
            entertainment: None,
            vendor: VendorSummary {
                vendor_id: "vendor_1".to_string(),
                name: "Test Vendor".to_string(),
                latitude: 34.0522,
                longitude: -118.2437,
                services: (0..services).map(|i| format!("service_{}", i)).collect(),
            },
        }
    }

    fn test_event(budget: f64, guest_count: u32) -> Event {
        Event {
            budget,
            guest_count,
            latitude: 34.0522,
            longitude: -118.2437,
            event_type: "wedding".to_string(),
        }
    }

    #[test]
    fn test_exact_match_scores_99_at_zero_distance() {
        // Midpoint equals budget, ratio 1.2, 3 services:
        // 40 + 30 + 20 + 9 = 99
        let package = test_package(4000.0, 6000.0, 120, 3);
        let event = test_event(5000.0, 100);

        let score = calculate_compatibility_score(&package, &event, 0.0);
        assert_eq!(score, 99);
    }

    #[test]
    fn test_distance_points_decay() {
        assert_eq!(distance_points(0.0), 40.0);
        assert_eq!(distance_points(10.0), 20.0);
        assert_eq!(distance_points(20.0), 0.0);
        assert_eq!(distance_points(25.0), 0.0);
    }

    #[test]
    fn test_budget_points_exact_and_off() {
        let package = test_package(4000.0, 6000.0, 120, 3);
        assert_eq!(budget_points(&package, 5000.0), 30.0);

        // Midpoint 5000 vs budget 4000: deviation 0.25 gives 22.5 pts
        let off = budget_points(&package, 4000.0);
        assert!((off - 22.5).abs() < 1e-9);

        // Deviation beyond 100% floors at zero
        let far = test_package(50_000.0, 70_000.0, 120, 3);
        assert_eq!(budget_points(&far, 5000.0), 0.0);
    }

    #[test]
    fn test_capacity_ratio_bands() {
        // ratio 1.0 and 1.5: full points
        assert_eq!(capacity_points(100, 100), 20.0);
        assert_eq!(capacity_points(150, 100), 20.0);
        // ratio in (1.5, 2]: 15 points
        assert_eq!(capacity_points(160, 100), 15.0);
        assert_eq!(capacity_points(200, 100), 15.0);
        // ratio beyond 2 decays 5 points per unit
        assert_eq!(capacity_points(300, 100), 15.0); // 20 - (3-2)*5
        assert_eq!(capacity_points(400, 100), 10.0);
        assert_eq!(capacity_points(1000, 100), 0.0);
    }

    #[test]
    fn test_service_points_cap() {
        assert_eq!(service_points(0), 0.0);
        assert_eq!(service_points(3), 9.0);
        assert_eq!(service_points(4), 10.0);
        assert_eq!(service_points(10), 10.0);
    }

    #[test]
    fn test_score_rounds_to_integer() {
        // Midpoint 5000 vs budget 4500: deviation 500/4500 gives 26.67 pts
        let package = test_package(4000.0, 6000.0, 120, 3);
        let event = test_event(4500.0, 100);
        let score = calculate_compatibility_score(&package, &event, 0.0);
        assert_eq!(score, 96); // 40 + 26.67 + 20 + 9 = 95.67, rounds to 96
    }
}
