//! Unification benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use impress_unify::{unify_values, ClusterLinkage, DistanceMatrix, DistanceMetric, UnifyOptions};

fn generate_company_names(count: usize) -> Vec<String> {
    let bases = ["Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark", "Wayne", "Wonka"];
    let suffixes = ["", " Inc", " Inc.", " Corp", " Co.", " (US)", "-Group"];
    (0..count)
        .map(|i| {
            let base = bases[i % bases.len()];
            let suffix = suffixes[(i / bases.len()) % suffixes.len()];
            if i % 3 == 0 {
                format!("{}{} {}", base.to_uppercase(), suffix, i / 24)
            } else {
                format!("{}{} {}", base, suffix, i / 24)
            }
        })
        .collect()
}

fn bench_unify(c: &mut Criterion) {
    let mut group = c.benchmark_group("unify_values");
    for count in [50, 200, 500] {
        let values = generate_company_names(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &values, |b, values| {
            b.iter(|| unify_values(black_box(values), &UnifyOptions::default()))
        });
    }
    group.finish();
}

fn bench_linkage(c: &mut Criterion) {
    let values = generate_company_names(200);
    let mut group = c.benchmark_group("linkage");
    for linkage in [ClusterLinkage::Single, ClusterLinkage::Complete, ClusterLinkage::Average] {
        let options = UnifyOptions {
            cluster_linkage: linkage,
            ..Default::default()
        };
        group.bench_function(linkage.as_str(), |b| {
            b.iter(|| unify_values(black_box(&values), &options))
        });
    }
    group.finish();
}

fn bench_distance_matrix(c: &mut Criterion) {
    let keys: Vec<String> = generate_company_names(300)
        .into_iter()
        .map(|v| v.to_lowercase())
        .collect();
    let mut group = c.benchmark_group("distance_matrix");
    for metric in [
        DistanceMetric::Levenshtein,
        DistanceMetric::JaroWinkler,
        DistanceMetric::TokenSetRatio,
    ] {
        group.bench_function(metric.as_str(), |b| {
            b.iter(|| DistanceMatrix::build(black_box(&keys), metric))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unify, bench_linkage, bench_distance_matrix);
criterion_main!(benches);
