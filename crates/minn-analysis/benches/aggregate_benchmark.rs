use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use minn_analysis::aggregate::{aggregate_production, name_pairs, top_countries_by_export};
use minn_analysis::config::SampleConfig;
use minn_analysis::loader::{default_countries, default_minerals};
use minn_analysis::model::ProductionRecord;
use minn_analysis::sample::generate_sample_production;

fn sample_frame(countries: i64, years: i64) -> polars::prelude::DataFrame {
    let sample = SampleConfig::default()
        .with_countries((1..=countries).collect())
        .with_years(1900..=1900 + years - 1);
    let records = generate_sample_production(&sample, &mut StdRng::seed_from_u64(1)).unwrap();
    ProductionRecord::to_frame(&records).unwrap()
}

fn bench_aggregate_production(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_production");

    for countries in [3i64, 100, 1_000] {
        let df = sample_frame(countries, 100);
        group.bench_with_input(BenchmarkId::from_parameter(df.height()), &df, |b, df| {
            b.iter(|| {
                let summary = aggregate_production(black_box(df)).unwrap();
                black_box(summary);
            });
        });
    }

    group.finish();
}

fn bench_top_exporters(c: &mut Criterion) {
    let df = sample_frame(1_000, 100);
    let countries = default_countries().unwrap();

    c.bench_function("top_countries_by_export_200k", |b| {
        b.iter(|| {
            let top = top_countries_by_export(black_box(&df), &countries, 5).unwrap();
            black_box(top);
        });
    });
}

fn bench_name_pairs(c: &mut Criterion) {
    let df = sample_frame(1_000, 10);
    let pairs = aggregate_production(&df).unwrap().pairs;
    let countries = default_countries().unwrap();
    let minerals = default_minerals().unwrap();

    c.bench_function("name_pairs_2k", |b| {
        b.iter(|| {
            let named = name_pairs(black_box(&pairs), &countries, &minerals).unwrap();
            black_box(named);
        });
    });
}

criterion_group!(benches, bench_aggregate_production, bench_top_exporters, bench_name_pairs);
criterion_main!(benches);
