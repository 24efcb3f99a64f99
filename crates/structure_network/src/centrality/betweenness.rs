//! Betweenness centrality (Brandes, unweighted).
//!
//! # Algorithm
//!
//! For every source `s`:
//! 1. BFS from `s`, recording distance, shortest-path counts `σ`, and the
//!    predecessors of each node on shortest paths.
//! 2. Pop nodes in reverse BFS order and accumulate dependencies
//!    `δ[v] += σ[v] / σ[w] · (1 + δ[w])` for each predecessor `v` of `w`.
//!
//! Each source pass is a pure function ([`source_dependencies`]) returning a
//! contribution vector. The vectors are summed by
//! [`sum_contributions`](crate::parallel::sum_contributions), which runs on
//! Rayon for large graphs. Total cost is O(V · (V + E)).
//!
//! # Normalisation
//!
//! Raw scores are divided by `(n-1)(n-2)/2` when `n ≥ 3`. Below three nodes
//! no node can sit between two others and every score is `0.0`. Sources are
//! summed over both orientations of each pair, so a perfect hub scores `2.0`.

use crate::graph::Adjacency;
use crate::parallel::{sum_contributions, ParallelConfig};
use std::collections::{HashMap, VecDeque};
use structure_core::CorrelationMatrix;

const UNVISITED: usize = usize::MAX;

/// Dependency of every node on paths starting at `source`.
///
/// The entry for `source` itself is `0.0`. All entries are non-negative.
///
/// # Panics
/// Panics if `source >= adjacency.len()`.
///
/// # Examples
/// ```
/// use structure_network::{source_dependencies, Adjacency};
///
/// // Path 0 - 1 - 2: from 0, node 1 lies on the only path to 2.
/// let adjacency = Adjacency::from_lists(vec![vec![1], vec![2], vec![]]);
/// assert_eq!(source_dependencies(&adjacency, 0), vec![0.0, 1.0, 0.0]);
/// ```
pub fn source_dependencies(adjacency: &Adjacency, source: usize) -> Vec<f64> {
    let n = adjacency.len();
    let mut sigma = vec![0.0_f64; n];
    let mut distance = vec![UNVISITED; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);

    sigma[source] = 1.0;
    distance[source] = 0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let next = distance[v] + 1;
        for &w in adjacency.neighbours(v) {
            if distance[w] == UNVISITED {
                distance[w] = next;
                queue.push_back(w);
            }
            if distance[w] == next {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = order.pop() {
        let coefficient = 1.0 + delta[w];
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * coefficient;
        }
    }
    delta[source] = 0.0;
    delta
}

/// Scales raw scores by `2 / ((n-1)(n-2))`, or zeroes them when `n < 3`.
pub fn normalise_betweenness(raw: &mut [f64]) {
    let n = raw.len();
    if n < 3 {
        raw.iter_mut().for_each(|v| *v = 0.0);
        return;
    }
    let max_pairs = ((n - 1) * (n - 2)) as f64 / 2.0;
    raw.iter_mut().for_each(|v| *v /= max_pairs);
}

/// Normalised betweenness per node, in adjacency order.
pub fn betweenness_scores(adjacency: &Adjacency, config: &ParallelConfig) -> Vec<f64> {
    let n = adjacency.len();
    if n < 3 {
        return vec![0.0; n];
    }

    tracing::debug!(
        nodes = n,
        edges = adjacency.edge_count(),
        parallel = config.should_parallelize(n),
        "accumulating betweenness"
    );

    let mut raw = sum_contributions(n, n, config, |s| source_dependencies(adjacency, s));
    normalise_betweenness(&mut raw);
    raw
}

/// Betweenness centrality of every instrument in the thresholded network.
///
/// Instruments are adjacent iff `|correlation| ≥ threshold`; edge weights and
/// signs do not affect path counting.
pub fn calculate_betweenness_centrality(
    matrix: &CorrelationMatrix,
    threshold: f64,
) -> HashMap<String, f64> {
    let adjacency = Adjacency::from_matrix(matrix, threshold);
    matrix
        .symbols
        .iter()
        .cloned()
        .zip(betweenness_scores(&adjacency, &ParallelConfig::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn star(leaves: usize) -> Adjacency {
        let mut lists = vec![(1..=leaves).collect::<Vec<_>>()];
        lists.extend((0..leaves).map(|_| Vec::new()));
        Adjacency::from_lists(lists)
    }

    #[test]
    fn test_source_dependencies_star_from_leaf() {
        // From leaf 1, the hub carries the paths to the 3 other leaves.
        let deps = source_dependencies(&star(4), 1);
        assert_relative_eq!(deps[0], 3.0);
        assert!(deps[1..].iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_source_dependencies_split_paths() {
        // Square 0-1-3, 0-2-3: two shortest paths from 0 to 3.
        let adj = Adjacency::from_lists(vec![vec![1, 2], vec![3], vec![3], vec![]]);
        let deps = source_dependencies(&adj, 0);
        assert_relative_eq!(deps[1], 0.5);
        assert_relative_eq!(deps[2], 0.5);
        assert_relative_eq!(deps[3], 0.0);
    }

    #[test]
    fn test_star_hub_scores() {
        let scores = betweenness_scores(&star(4), &ParallelConfig::sequential());
        // 4 leaves × 3 dependencies = 12 raw, over (4·3)/2 = 6.
        assert_relative_eq!(scores[0], 2.0);
        assert!(scores[1..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_path_middle_node() {
        let adj = Adjacency::from_lists(vec![vec![1], vec![2], vec![]]);
        let scores = betweenness_scores(&adj, &ParallelConfig::sequential());
        assert_relative_eq!(scores[1], 2.0);
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_fewer_than_three_nodes_is_zero() {
        let adj = Adjacency::from_lists(vec![vec![1], vec![]]);
        assert_eq!(
            betweenness_scores(&adj, &ParallelConfig::default()),
            vec![0.0, 0.0]
        );
        assert!(betweenness_scores(&Adjacency::from_lists(vec![]), &ParallelConfig::default())
            .is_empty());
    }

    #[test]
    fn test_disconnected_graph() {
        // Two separate edges: nobody is between anybody.
        let adj = Adjacency::from_lists(vec![vec![1], vec![], vec![3], vec![]]);
        let scores = betweenness_scores(&adj, &ParallelConfig::sequential());
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        // Ring of 30 with chords.
        let n = 30;
        let lists: Vec<Vec<usize>> = (0..n).map(|i| vec![(i + 1) % n, (i + 7) % n]).collect();
        let adj = Adjacency::from_lists(lists);
        let seq = betweenness_scores(&adj, &ParallelConfig::sequential());
        let par = betweenness_scores(&adj, &ParallelConfig::new(2, 0));
        for (a, b) in seq.iter().zip(&par) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalise_small() {
        let mut raw = vec![5.0, 1.0];
        normalise_betweenness(&mut raw);
        assert_eq!(raw, vec![0.0, 0.0]);
    }

    #[test]
    fn test_calculate_from_matrix() {
        let matrix = CorrelationMatrix::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec![1.0, 0.9, 0.0],
                vec![0.9, 1.0, -0.9],
                vec![0.0, -0.9, 1.0],
            ],
        );
        let bc = calculate_betweenness_centrality(&matrix, 0.5);
        assert_relative_eq!(bc["B"], 2.0);
        assert_eq!(bc["A"], 0.0);
        assert_eq!(bc["C"], 0.0);
    }
}
