// Criterion benchmarks for Laptop Valuation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use laptop_valuation::core::{
    build_feature_vector, calculate_ppi, derive_features, parse_resolution, Valuator, SUPPORTED_RESOLUTIONS,
};
use laptop_valuation::models::RawSpecSelection;
use laptop_valuation::services::ModelArtifact;
use std::sync::Arc;

fn create_selection(resolution: &str) -> RawSpecSelection {
    RawSpecSelection {
        manufacturer: "Asus".to_string(),
        form_factor: "Gaming".to_string(),
        platform: "Windows".to_string(),
        screen_size_inches: 17.3,
        resolution: resolution.to_string(),
        gpu_brand: "Nvidia".to_string(),
        touchscreen: "No".to_string(),
        ips_panel: "Yes".to_string(),
        cpu_brand: "Intel Core i7".to_string(),
        ram_gb: 16,
        hdd_gb: 1024,
        ssd_gb: 512,
        weight_kg: 2.9,
    }
}

fn load_model() -> Arc<ModelArtifact> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/laptop_price.json");
    Arc::new(ModelArtifact::load(path).expect("demo artifact"))
}

fn bench_ppi(c: &mut Criterion) {
    c.bench_function("calculate_ppi", |b| {
        b.iter(|| calculate_ppi(black_box(1920), black_box(1080), black_box(15.6)));
    });
}

fn bench_parse_resolution(c: &mut Criterion) {
    c.bench_function("parse_resolution", |b| {
        b.iter(|| parse_resolution(black_box("3840x2160")));
    });
}

fn bench_feature_vector(c: &mut Criterion) {
    let selection = create_selection("2560x1440");
    c.bench_function("derive_and_build_features", |b| {
        b.iter(|| {
            let derived = derive_features(black_box(&selection)).unwrap();
            build_feature_vector(&selection, &derived)
        });
    });
}

fn bench_appraisal(c: &mut Criterion) {
    let valuator = Valuator::with_minimal_validation(load_model());

    let mut group = c.benchmark_group("appraise");

    for resolution in SUPPORTED_RESOLUTIONS.iter() {
        let selection = create_selection(resolution);
        group.bench_with_input(
            BenchmarkId::new("resolution", resolution),
            &selection,
            |b, selection| {
                b.iter(|| valuator.appraise(black_box(selection)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ppi,
    bench_parse_resolution,
    bench_feature_vector,
    bench_appraisal
);

criterion_main!(benches);
