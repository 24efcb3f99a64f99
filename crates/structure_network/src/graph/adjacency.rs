//! Unweighted adjacency lists derived from a thresholded matrix.

use super::NetworkGraph;
use std::collections::HashMap;
use structure_core::CorrelationMatrix;

/// Whether a correlation passes the connection gate.
///
/// Sign is ignored; NaN never connects.
#[inline]
pub fn is_connected(correlation: f64, threshold: f64) -> bool {
    correlation.abs() >= threshold
}

/// Neighbour lists indexed by matrix position.
///
/// Node `i` neighbours `j` iff `i ≠ j` and `|m[i][j]| ≥ threshold`. Lists are
/// in ascending index order, which keeps traversal deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    neighbours: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Builds adjacency from a correlation matrix and threshold.
    pub fn from_matrix(matrix: &CorrelationMatrix, threshold: f64) -> Self {
        let n = matrix.len();
        let mut neighbours = vec![Vec::new(); n];
        for (i, j, rho) in matrix.upper_triangle() {
            if is_connected(rho, threshold) {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }
        for list in &mut neighbours {
            list.sort_unstable();
        }
        Self { neighbours }
    }

    /// Builds adjacency from a graph's edge set, indexed in node order.
    ///
    /// Edges naming unknown ids or looping onto themselves are skipped.
    pub fn from_graph(graph: &NetworkGraph) -> Self {
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();
        let mut neighbours = vec![Vec::new(); graph.nodes.len()];
        for edge in &graph.edges {
            if let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            {
                if a != b {
                    neighbours[a].push(b);
                    neighbours[b].push(a);
                }
            }
        }
        for list in &mut neighbours {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbours }
    }

    /// Builds adjacency directly from neighbour lists.
    ///
    /// Lists are symmetrised, sorted and de-duplicated; self-loops and
    /// out-of-range indices are dropped.
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        let n = lists.len();
        let mut neighbours = vec![Vec::new(); n];
        for (i, list) in lists.into_iter().enumerate() {
            for j in list {
                if j < n && j != i {
                    neighbours[i].push(j);
                    neighbours[j].push(i);
                }
            }
        }
        for list in &mut neighbours {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbours }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Neighbours of node `i`.
    #[inline]
    pub fn neighbours(&self, i: usize) -> &[usize] {
        &self.neighbours[i]
    }

    /// Number of neighbours of node `i`.
    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.neighbours[i].len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbours.iter().map(Vec::len).sum::<usize>() / 2
    }
}
