//! Criterion benchmarks for the correlation engine.
//!
//! Benchmarks cover:
//! - Single Pearson coefficient over growing history lengths
//! - Full matrix construction for universes of 10 to 200 instruments

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use structure_core::correlation::{build_correlation_matrix, calculate_correlation};
use structure_core::types::ReturnSeries;

/// Generate a one-factor universe: each return is beta * market + noise.
fn generate_universe(n_instruments: usize, n_returns: usize) -> Vec<ReturnSeries> {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0, 0.01).expect("valid normal");
    let market: Vec<f64> = (0..n_returns).map(|_| normal.sample(&mut rng)).collect();

    (0..n_instruments)
        .map(|i| {
            let beta = 0.5 + (i % 7) as f64 * 0.2;
            let returns = market
                .iter()
                .map(|m| beta * m + normal.sample(&mut rng))
                .collect();
            ReturnSeries::new(format!("SYM{:03}", i), returns)
        })
        .collect()
}

fn bench_pairwise_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_correlation");

    for n_returns in [64, 252, 1260] {
        let universe = generate_universe(2, n_returns);
        group.bench_with_input(
            BenchmarkId::new("pearson", n_returns),
            &universe,
            |b, universe| {
                b.iter(|| {
                    calculate_correlation(
                        black_box(&universe[0].returns),
                        black_box(&universe[1].returns),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_correlation_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");

    for n_instruments in [10, 50, 200] {
        let universe = generate_universe(n_instruments, 252);
        group.bench_with_input(
            BenchmarkId::new("build", n_instruments),
            &universe,
            |b, universe| {
                b.iter(|| build_correlation_matrix(black_box(universe)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pairwise_correlation, bench_correlation_matrix);
criterion_main!(benches);
