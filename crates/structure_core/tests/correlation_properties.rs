//! Property-based tests for the correlation engine.
//!
//! Verifies the matrix invariants (symmetry, unit diagonal, bounds) and the
//! scaling behaviour of the Pearson coefficient over generated return series.

use approx::assert_relative_eq;
use proptest::prelude::*;
use structure_core::correlation::{build_correlation_matrix, calculate_correlation};
use structure_core::math::statistics::centred_moments;
use structure_core::types::ReturnSeries;

const TOLERANCE: f64 = 1e-9;

// Returns in a realistic daily range
fn returns_strategy(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.2..0.2_f64, len)
}

// Series with enough spread to avoid near-zero variance artefacts
fn non_constant_returns() -> impl Strategy<Value = Vec<f64>> {
    returns_strategy(3..40).prop_filter("needs variance", |r| {
        let (_, var, _) = centred_moments(r, r);
        var > 1e-8
    })
}

fn universe_strategy() -> impl Strategy<Value = Vec<ReturnSeries>> {
    prop::collection::vec(returns_strategy(0..30), 1..8).prop_map(|all| {
        all.into_iter()
            .enumerate()
            .map(|(i, r)| ReturnSeries::new(format!("S{}", i), r))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal(series in universe_strategy()) {
        let m = build_correlation_matrix(&series);
        prop_assert_eq!(m.len(), series.len());
        for i in 0..m.len() {
            prop_assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.len() {
                prop_assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_matrix_entries_bounded(series in universe_strategy()) {
        let m = build_correlation_matrix(&series);
        for row in &m.matrix {
            for &rho in row {
                prop_assert!(rho.is_finite());
                prop_assert!((-1.0 - TOLERANCE..=1.0 + TOLERANCE).contains(&rho));
            }
        }
    }

    #[test]
    fn test_self_correlation_is_one(x in non_constant_returns()) {
        assert_relative_eq!(calculate_correlation(&x, &x), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_positive_multiple_is_one(x in non_constant_returns(), k in 0.1..50.0_f64) {
        let y: Vec<f64> = x.iter().map(|v| v * k).collect();
        assert_relative_eq!(calculate_correlation(&x, &y), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_negative_multiple_is_minus_one(x in non_constant_returns(), k in 0.1..50.0_f64) {
        let y: Vec<f64> = x.iter().map(|v| -v * k).collect();
        assert_relative_eq!(calculate_correlation(&x, &y), -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_correlation_argument_order_irrelevant(
        a in returns_strategy(0..30),
        b in returns_strategy(0..30)
    ) {
        prop_assert_eq!(calculate_correlation(&a, &b), calculate_correlation(&b, &a));
    }
}

#[test]
fn test_scenario_identical_and_negated_series() {
    let series = vec![
        ReturnSeries::new("A", vec![0.01, 0.02, -0.01, 0.03]),
        ReturnSeries::new("B", vec![0.01, 0.02, -0.01, 0.03]),
        ReturnSeries::new("C", vec![-0.01, -0.02, 0.01, -0.03]),
    ];
    let m = build_correlation_matrix(&series);

    assert_relative_eq!(m.correlation("A", "B"), 1.0, epsilon = 1e-12);
    assert_relative_eq!(m.correlation("A", "C"), -1.0, epsilon = 1e-12);
    assert_relative_eq!(m.correlation("B", "C"), -1.0, epsilon = 1e-12);
}

#[test]
fn test_single_instrument_matrix() {
    let m = build_correlation_matrix(&[ReturnSeries::new("ONLY", vec![0.01, -0.02, 0.005])]);
    assert_eq!(m.matrix, vec![vec![1.0]]);
}

#[test]
fn test_different_history_depths_align_on_tail() {
    let recent = vec![0.02, -0.01, 0.015, -0.03, 0.01];
    let mut deep = vec![0.4, 0.4, -0.9, 0.1];
    deep.extend(recent.iter().map(|r| r * 2.0));

    let series = vec![
        ReturnSeries::new("DEEP", deep),
        ReturnSeries::new("RECENT", recent),
    ];
    let m = build_correlation_matrix(&series);
    assert_relative_eq!(m.correlation("DEEP", "RECENT"), 1.0, epsilon = 1e-12);
}
