//! Thresholded correlation network.
//!
//! A [`NetworkGraph`] carries one node per matrix symbol and one undirected
//! edge per pair whose absolute correlation meets the threshold. Nodes carry
//! their degree and betweenness so callers can render or rank them without
//! recomputing anything.

mod adjacency;
mod builder;

pub use adjacency::{is_connected, Adjacency};
pub use builder::{build_network_graph, get_top_bridge_nodes, NetworkEngine};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One instrument in the network.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphNode {
    /// Symbol, unique within the graph
    pub id: String,
    /// Display label
    pub label: String,
    /// Number of neighbours
    pub degree: usize,
    /// Normalised betweenness centrality (non-negative)
    pub betweenness: f64,
    /// Sector tag from the caller's lookup
    pub sector: Option<String>,
}

/// Undirected edge between two instruments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphEdge {
    /// Symbol earlier in matrix order
    pub from: String,
    /// Symbol later in matrix order
    pub to: String,
    /// `|correlation|`
    pub weight: f64,
    /// Signed correlation
    pub correlation: f64,
}

/// Correlation network built from a matrix and a threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkGraph {
    /// Minimum absolute correlation for an edge
    pub threshold: f64,
    /// Nodes in matrix order
    pub nodes: Vec<GraphNode>,
    /// Edges in row-major upper-triangle order
    pub edges: Vec<GraphEdge>,
}

impl NetworkGraph {
    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node with the given id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Betweenness of `id`, or `0.0` when the node is absent.
    pub fn betweenness(&self, id: &str) -> f64 {
        self.node(id).map_or(0.0, |n| n.betweenness)
    }

    /// Edge joining `a` and `b` in either direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }

    /// Ids adjacent to `id`, in edge order.
    pub fn neighbours(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.from == id {
                    Some(e.to.as_str())
                } else if e.to == id {
                    Some(e.from.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Edge density `2E / n(n-1)`; `0.0` for fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        2.0 * self.edges.len() as f64 / (n * (n - 1)) as f64
    }

    /// Nodes with no edges.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.degree == 0)
    }
}
