use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kolosal_fairness::prelude::*;
use ndarray::Array1;
use rand::prelude::*;

fn create_population(n: usize) -> (Array1<f64>, Array1<f64>, Array1<f64>, Vec<u32>) {
    let mut rng = rand::thread_rng();

    let scores: Array1<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let labels: Array1<f64> = scores
        .iter()
        .map(|&s| if rng.gen::<f64>() < s { 1.0 } else { 0.0 })
        .collect();
    let attr: Array1<f64> = (0..n).map(|_| if rng.gen_bool(0.3) { 1.0 } else { 0.0 }).collect();
    let groups: Vec<u32> = (0..n).map(|_| rng.gen_range(0..8)).collect();

    (labels, scores, attr, groups)
}

fn bench_probability_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("probability_metrics");

    for n in [1_000, 10_000, 100_000] {
        let (labels, scores, attr, _) = create_population(n);

        group.bench_with_input(BenchmarkId::new("demographic_parity_prob", n), &n, |b, _| {
            b.iter(|| demographic_parity_prob(black_box(&scores), black_box(&attr)))
        });

        group.bench_with_input(BenchmarkId::new("equalised_odds_prob", n), &n, |b, _| {
            b.iter(|| equalised_odds_prob(black_box(&labels), black_box(&scores), black_box(&attr)))
        });
    }

    group.finish();
}

fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration");
    let (labels, scores, attr, _) = create_population(50_000);

    for n_bins in [5, 10, 50] {
        group.bench_with_input(BenchmarkId::new("calibration", n_bins), &n_bins, |b, &n_bins| {
            b.iter(|| calibration(black_box(&labels), black_box(&scores), black_box(&attr), n_bins))
        });
    }

    group.finish();
}

fn bench_conditional(c: &mut Criterion) {
    let (labels, scores, attr, groups) = create_population(50_000);
    let pred = binarize(&scores, DEFAULT_THRESHOLD);

    c.bench_function("conditional_demographic_parity_difference", |b| {
        b.iter(|| {
            conditional_demographic_parity_difference(
                black_box(&labels),
                black_box(&pred),
                black_box(&attr),
                black_box(&groups),
            )
        })
    });
}

fn bench_evaluator(c: &mut Criterion) {
    let (labels, scores, attr, groups) = create_population(20_000);
    let evaluator = FairnessEvaluator::default();

    c.bench_function("evaluate_conditional", |b| {
        b.iter(|| evaluator.evaluate_conditional(&labels, &scores, &attr, &groups))
    });
}

criterion_group!(
    benches,
    bench_probability_metrics,
    bench_calibration,
    bench_conditional,
    bench_evaluator
);
criterion_main!(benches);
