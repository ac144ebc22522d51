// Criterion benchmarks for Eventra Search

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eventra_search::core::{haversine_distance, rerank, Lexicon, Matcher, Preprocessor};
use eventra_search::models::{
    Candidate, Event, ExtractedParameters, Package, PackageStatus, RerankWeights, VendorSummary,
};

fn create_package(id: usize, lat: f64, lon: f64) -> Package {
    Package {
        package_id: id.to_string(),
        title: format!("Package {}", id),
        price_min: 2000.0 + (id % 10) as f64 * 500.0,
        price_max: 6000.0 + (id % 10) as f64 * 500.0,
        capacity: 100 + (id % 5) as u32 * 50,
        status: PackageStatus::Published,
        venue: None,
        catering: None,
        entertainment: None,
        vendor: VendorSummary {
            vendor_id: format!("vendor_{}", id % 7),
            name: format!("Vendor {}", id % 7),
            latitude: lat,
            longitude: lon,
            services: vec!["venue".to_string(), "catering".to_string()],
        },
    }
}

fn create_event() -> Event {
    Event {
        budget: 5000.0,
        guest_count: 100,
        latitude: 34.0522, // Los Angeles
        longitude: -118.2437,
        event_type: "wedding".to_string(),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(34.0522),
                black_box(-118.2437),
                black_box(34.10),
                black_box(-118.30),
            )
        });
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let preprocessor = Preprocessor::new(Arc::new(Lexicon::default_domain()));

    c.bench_function("preprocess_typical_query", |b| {
        b.iter(|| {
            preprocessor.preprocess(black_box(
                "Elegant seafod dinner in Santa Monica for 80 guests under $6,000",
            ))
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let event = create_event();

    let mut group = c.benchmark_group("matching");

    for package_count in [10, 50, 100, 500, 1000].iter() {
        let packages: Vec<Package> = (0..*package_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.0005) % 0.25;
                let lon_offset = (i as f64 * 0.0005) % 0.25;
                create_package(i, 34.0522 + lat_offset, -118.2437 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("match_packages", package_count),
            package_count,
            |b, _| {
                b.iter(|| {
                    matcher.match_packages(black_box(packages.clone()), black_box(&event))
                });
            },
        );
    }

    group.finish();
}

fn bench_rerank(c: &mut Criterion) {
    let candidates: Vec<Candidate> = (0..100)
        .map(|i| Candidate {
            package: create_package(i, 34.0522, -118.2437),
            similarity: 0.5 + (i % 50) as f64 * 0.01,
        })
        .collect();

    let params = ExtractedParameters {
        budget_max: Some(5000.0),
        capacity_min: Some(100),
        location: None,
        food_type: Some("bbq".to_string()),
        venue_type: Some("outdoor".to_string()),
    };

    c.bench_function("rerank_100_candidates", |b| {
        b.iter(|| {
            rerank(
                black_box(candidates.clone()),
                black_box(&params),
                black_box(&RerankWeights::default()),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_preprocess,
    bench_matching,
    bench_rerank
);

criterion_main!(benches);
