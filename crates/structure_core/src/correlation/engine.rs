//! Pairwise correlation and matrix assembly.

use super::matrix::CorrelationMatrix;
use crate::math::statistics::{align_tail, pearson};
use crate::types::ReturnSeries;

/// Pearson correlation between two return slices.
///
/// Both slices are expected to be date-aligned and of equal length; when they
/// are not, only the shared tail is used. Zero variance or fewer than two
/// observations give `0.0`, never NaN.
///
/// # Examples
/// ```
/// use structure_core::correlation::calculate_correlation;
///
/// let a = [0.01, 0.02, -0.01, 0.03];
/// let neg: Vec<f64> = a.iter().map(|r| -r).collect();
/// assert!((calculate_correlation(&a, &a) - 1.0).abs() < 1e-12);
/// assert!((calculate_correlation(&a, &neg) + 1.0).abs() < 1e-12);
/// ```
pub fn calculate_correlation(a: &[f64], b: &[f64]) -> f64 {
    let (a, b) = align_tail(a, b);
    pearson(a, b)
}

/// Builds the `n × n` correlation matrix for `series`.
///
/// Row and column order follow the input order. The diagonal is set to `1.0`
/// without computation; each off-diagonal entry is computed once over the
/// tail-aligned returns and mirrored, so the result is exactly symmetric.
///
/// Cost is O(n² · L) for `n` series of aligned length `L`.
pub fn build_correlation_matrix(series: &[ReturnSeries]) -> CorrelationMatrix {
    let n = series.len();
    let symbols: Vec<String> = series.iter().map(|s| s.symbol.clone()).collect();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let rho = calculate_correlation(&series[i].returns, &series[j].returns);
            matrix[i][j] = rho;
            matrix[j][i] = rho;
        }
    }

    tracing::debug!(instruments = n, "correlation matrix built");
    CorrelationMatrix::new(symbols, matrix)
}
