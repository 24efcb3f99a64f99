//! Degree centrality.

use crate::graph::Adjacency;
use std::collections::HashMap;
use structure_core::CorrelationMatrix;

/// Neighbour count per node, in adjacency order.
pub fn degree_scores(adjacency: &Adjacency) -> Vec<usize> {
    (0..adjacency.len()).map(|i| adjacency.degree(i)).collect()
}

/// Counts, for each instrument, the others with `|correlation| ≥ threshold`.
///
/// The count is not normalised by `n - 1`.
pub fn calculate_degree_centrality(
    matrix: &CorrelationMatrix,
    threshold: f64,
) -> HashMap<String, usize> {
    let adjacency = Adjacency::from_matrix(matrix, threshold);
    matrix
        .symbols
        .iter()
        .cloned()
        .zip(degree_scores(&adjacency))
        .collect()
}
