// Unit tests for Eventra Search

use std::sync::Arc;

use eventra_search::core::{
    distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box},
    filters::passes_hard_filters,
    scoring::calculate_compatibility_score,
    suggest::{analyze_quality, autocomplete},
    Lexicon, Matcher, Preprocessor,
};
use eventra_search::models::{
    Event, ExtractedParameters, Package, PackageStatus, VendorSummary,
};

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
fn test_haversine_distance_zero() {
    let distance = haversine_distance(34.0522, -118.2437, 34.0522, -118.2437);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_symmetric_for_arbitrary_points() {
    let points = [
        (34.0522, -118.2437, 40.7128, -74.0060),
        (51.5074, -0.1278, 48.8566, 2.3522),
        (-33.8688, 151.2093, 35.6762, 139.6503),
    ];
    for (lat1, lon1, lat2, lon2) in points {
        let forward = haversine_distance(lat1, lon1, lat2, lon2);
        let backward = haversine_distance(lat2, lon2, lat1, lon1);
        assert!((forward - backward).abs() < 1e-9);
    }
}

#[test]
fn test_bounding_box_contains_center() {
    let bbox = calculate_bounding_box(34.0522, -118.2437, 20.0);
    assert!(is_within_bounding_box(34.0522, -118.2437, &bbox));
    assert!(!is_within_bounding_box(40.7128, -74.0060, &bbox));
}

#[test]
fn test_preprocess_is_pure() {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));
    let query = "Elegant seafod dinner in Santa Monica for 80 guests under $6,000";

    let first = preprocessor.preprocess(query);
    let second = preprocessor.preprocess(query);

    assert_eq!(first, second);
}

#[test]
fn test_preprocess_corrects_seafod() {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));
    let result = preprocessor.preprocess("seafod buffet");
    assert_eq!(result.corrected, "seafood buffet");
}

#[test]
fn test_preprocess_never_corrects_short_words() {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));
    let result = preprocessor.preprocess("dj and bar");
    assert_eq!(result.corrected, "dj and bar");
}

#[test]
fn test_price_extraction_forms() {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));

    let under = preprocessor.preprocess("catering under $5000");
    let range = under.price_range.unwrap();
    assert_eq!((range.min, range.max), (None, Some(5000.0)));

    let between = preprocessor.preprocess("venue $2000 to $5000");
    let range = between.price_range.unwrap();
    assert_eq!((range.min, range.max), (Some(2000.0), Some(5000.0)));

    let over = preprocessor.preprocess("packages over $1000");
    let range = over.price_range.unwrap();
    assert_eq!((range.min, range.max), (Some(1000.0), None));
}

#[test]
fn test_guest_count_bounds() {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));

    assert_eq!(preprocessor.preprocess("150 people").guest_count, Some(150));
    assert_eq!(preprocessor.preprocess("5 people").guest_count, None);
    assert_eq!(preprocessor.preprocess("for 99999 guests").guest_count, None);
}

#[test]
fn test_undersized_package_always_excluded() {
    let matcher = Matcher::default();
    let event = test_event(5000.0, 100);

    // Everything else is ideal; capacity alone disqualifies
    let package = test_package(4000.0, 6000.0, 50, 3);
    assert!(!passes_hard_filters(&package, &event));

    let result = matcher.match_packages(vec![test_package(4000.0, 6000.0, 50, 3)], &event);
    assert!(result.matches.is_empty());
}

#[test]
fn test_exact_budget_snug_fit_scores_99() {
    // Exact budget midpoint, capacity ratio 1.2, 3 services, zero distance:
    // 40 + 30 + 20 + 9 = 99
    let package = test_package(4000.0, 6000.0, 120, 3);
    let event = test_event(5000.0, 100);

    let score = calculate_compatibility_score(&package, &event, 0.0);
    assert_eq!(score, 99);
}

#[test]
fn test_quality_score_zero_and_poor_bounds() {
    let lexicon = Lexicon::default_domain();
    let params = ExtractedParameters::default();

    let zero = analyze_quality("rustic barn wedding", 0, &params, &lexicon);
    assert_eq!(zero.score, 0.0);

    for count in 1..3 {
        let poor = analyze_quality("rustic barn wedding", count, &params, &lexicon);
        assert!(poor.score < 0.7);
    }
}

#[test]
fn test_autocomplete_limits() {
    let lexicon = Lexicon::default_domain();

    let matches = autocomplete("wedding", &lexicon);
    assert!(matches.len() <= 5);

    assert!(autocomplete("w", &lexicon).is_empty());
}
