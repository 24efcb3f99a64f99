//! Graph construction and bridge ranking.

use super::adjacency::{is_connected, Adjacency};
use super::{GraphEdge, GraphNode, NetworkGraph};
use crate::centrality::{betweenness_scores, degree_scores};
use crate::parallel::ParallelConfig;
use structure_core::{CorrelationMatrix, SectorMap};

/// Network builder carrying the parallel execution settings.
///
/// The free function [`build_network_graph`] uses the default settings.
#[derive(Debug, Clone, Default)]
pub struct NetworkEngine {
    parallel: ParallelConfig,
}

impl NetworkEngine {
    /// Creates an engine with the given parallel configuration.
    pub fn new(parallel: ParallelConfig) -> Self {
        Self { parallel }
    }

    /// Parallel configuration in use.
    pub fn parallel_config(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Builds the network for `matrix` at `threshold`.
    ///
    /// One node per symbol with degree, betweenness and optional sector; one
    /// edge per unordered pair with `|correlation| ≥ threshold`.
    pub fn build(
        &self,
        matrix: &CorrelationMatrix,
        threshold: f64,
        sectors: Option<&SectorMap>,
    ) -> NetworkGraph {
        let adjacency = Adjacency::from_matrix(matrix, threshold);
        let degree = degree_scores(&adjacency);
        let betweenness = betweenness_scores(&adjacency, &self.parallel);

        let nodes: Vec<GraphNode> = matrix
            .symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| GraphNode {
                id: symbol.clone(),
                label: symbol.clone(),
                degree: degree[i],
                betweenness: betweenness[i],
                sector: sectors.and_then(|s| s.get(symbol)).map(str::to_owned),
            })
            .collect();

        let edges: Vec<GraphEdge> = matrix
            .upper_triangle()
            .filter(|&(_, _, rho)| is_connected(rho, threshold))
            .map(|(i, j, rho)| GraphEdge {
                from: matrix.symbols[i].clone(),
                to: matrix.symbols[j].clone(),
                weight: rho.abs(),
                correlation: rho,
            })
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            threshold,
            "network graph built"
        );

        NetworkGraph {
            threshold,
            nodes,
            edges,
        }
    }
}

/// Builds the thresholded correlation network.
///
/// # Examples
/// ```
/// use structure_core::{CorrelationMatrix, SectorMap};
/// use structure_network::build_network_graph;
///
/// let matrix = CorrelationMatrix::new(
///     vec!["A".into(), "B".into()],
///     vec![vec![1.0, -0.7], vec![-0.7, 1.0]],
/// );
/// let sectors: SectorMap = [("A", "Tech")].into_iter().collect();
///
/// let graph = build_network_graph(&matrix, 0.5, Some(&sectors));
/// assert_eq!(graph.edges[0].weight, 0.7);
/// assert_eq!(graph.edges[0].correlation, -0.7);
/// assert_eq!(graph.nodes[0].sector.as_deref(), Some("Tech"));
/// assert_eq!(graph.nodes[1].sector, None);
/// ```
pub fn build_network_graph(
    matrix: &CorrelationMatrix,
    threshold: f64,
    sectors: Option<&SectorMap>,
) -> NetworkGraph {
    NetworkEngine::default().build(matrix, threshold, sectors)
}

/// The `top_n` nodes by betweenness, highest first.
///
/// Ties keep node order.
pub fn get_top_bridge_nodes(graph: &NetworkGraph, top_n: usize) -> Vec<&GraphNode> {
    let mut nodes: Vec<&GraphNode> = graph.nodes.iter().collect();
    nodes.sort_by(|a, b| b.betweenness.total_cmp(&a.betweenness));
    nodes.truncate(top_n);
    nodes
}
