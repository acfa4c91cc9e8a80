//! Benchmarks for indicator implementations.

use breadth_core::traits::{Indicator, Statistic};
use breadth_indicators::{simd, AnnualizedVolatility, Beta, Sma};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use statrs::statistics::Statistics;

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_returns(size: usize, phase: f64) -> Vec<f64> {
    (0..size)
        .map(|i| ((i as f64 + phase) * 0.37).sin() * 0.02)
        .collect()
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("standard", size), &data, |b, data| {
            let sma = Sma::new(50);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("simd", size), &data, |b, data| {
            b.iter(|| simd::sma_simd(black_box(data), black_box(50)))
        });
    }

    group.finish();
}

fn benchmark_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Covariance");

    for size in [252, 2520, 25200].iter() {
        let a = generate_returns(*size, 0.0);
        let m = generate_returns(*size, 3.0);

        group.bench_with_input(
            BenchmarkId::new("statrs", size),
            &(a.clone(), m.clone()),
            |b, (a, m)| b.iter(|| black_box(a).iter().covariance(black_box(m).iter())),
        );

        group.bench_with_input(BenchmarkId::new("simd", size), &(a, m), |b, (a, m)| {
            b.iter(|| simd::covariance_simd(black_box(a), black_box(m)))
        });
    }

    group.finish();
}

fn benchmark_universe(c: &mut Criterion) {
    // Fifty constituents over one year of daily returns
    let benchmark = generate_returns(251, 0.0);
    let assets: Vec<Vec<f64>> = (0..50).map(|i| generate_returns(251, i as f64)).collect();
    let vol = AnnualizedVolatility::daily();

    c.bench_function("universe_beta_and_vol", |b| {
        b.iter(|| {
            for asset in &assets {
                let _ = black_box(Beta::compute(asset, &benchmark));
                let _ = black_box(vol.compute(asset));
            }
        })
    });
}

criterion_group!(benches, benchmark_sma, benchmark_covariance, benchmark_universe);
criterion_main!(benches);
