//! Correlation matrix and read-only queries.

use serde::{Deserialize, Serialize};

/// Symmetric matrix of pairwise correlations.
///
/// `matrix[i][j]` is the correlation between `symbols[i]` and `symbols[j]`.
/// The diagonal is `1.0` and every entry lies in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Row and column order
    pub symbols: Vec<String>,
    /// Dense `n × n` correlations
    pub matrix: Vec<Vec<f64>>,
}

/// One unordered pair of instruments with its correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedPair {
    /// First symbol (earlier in matrix order)
    pub symbol1: String,
    /// Second symbol
    pub symbol2: String,
    /// Signed correlation
    pub correlation: f64,
}

impl CorrelationMatrix {
    /// Wraps precomputed correlations.
    ///
    /// The caller guarantees `matrix` is `symbols.len()` square; symmetry and
    /// the unit diagonal are not re-checked.
    pub fn new(symbols: Vec<String>, matrix: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(symbols.len(), matrix.len());
        debug_assert!(matrix.iter().all(|row| row.len() == symbols.len()));
        Self { symbols, matrix }
    }

    /// Number of instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the matrix has no instruments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entry at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// Row/column index of `symbol`.
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Whether `symbol` has a row in the matrix.
    pub fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Correlation between two symbols, or `0.0` if either is absent.
    pub fn correlation(&self, symbol1: &str, symbol2: &str) -> f64 {
        match (self.index_of(symbol1), self.index_of(symbol2)) {
            (Some(i), Some(j)) => self.matrix[i][j],
            _ => 0.0,
        }
    }

    /// All unordered pairs, ranked by absolute correlation, first `top_n` kept.
    ///
    /// Ties keep matrix order (row-major over the upper triangle).
    pub fn top_correlated_pairs(&self, top_n: usize) -> Vec<CorrelatedPair> {
        let n = self.len();
        let mut pairs: Vec<CorrelatedPair> = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push(CorrelatedPair {
                    symbol1: self.symbols[i].clone(),
                    symbol2: self.symbols[j].clone(),
                    correlation: self.matrix[i][j],
                });
            }
        }

        pairs.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
        pairs.truncate(top_n);
        pairs
    }

    /// Iterates `(i, j, correlation)` over the strict upper triangle.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.matrix[i][j])))
    }
}

/// Looks up the correlation of two symbols; `0.0` if either is absent.
pub fn get_correlation(matrix: &CorrelationMatrix, symbol1: &str, symbol2: &str) -> f64 {
    matrix.correlation(symbol1, symbol2)
}

/// The `top_n` most strongly correlated unordered pairs by absolute value.
pub fn get_top_correlated_pairs(matrix: &CorrelationMatrix, top_n: usize) -> Vec<CorrelatedPair> {
    matrix.top_correlated_pairs(top_n)
}
