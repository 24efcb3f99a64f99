//! # structure_network (L2: Network)
//!
//! Thresholded correlation networks and their structural metrics.
//!
//! This crate provides:
//! - [`NetworkGraph`] construction from a [`CorrelationMatrix`](structure_core::CorrelationMatrix)
//! - Degree centrality (raw neighbour counts)
//! - Betweenness centrality via per-source Brandes accumulation, reduced
//!   across sources with Rayon once the graph is large enough
//! - Bridge ranking and community detection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         structure_network (L2)          │
//! ├─────────────────────────────────────────┤
//! │  graph/       - NetworkGraph, nodes,    │
//! │                 edges, adjacency        │
//! │  centrality/  - degree, betweenness     │
//! │  communities  - one-hop, components,    │
//! │                 label propagation       │
//! │  parallel/    - Rayon reduce helpers    │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          structure_core (L1)            │
//! │  ReturnSeries, CorrelationMatrix        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use structure_core::CorrelationMatrix;
//! use structure_network::{build_network_graph, get_top_bridge_nodes};
//!
//! // X correlates with everyone, the others are mutually uncorrelated.
//! let symbols = vec!["X".to_string(), "A".to_string(), "B".to_string()];
//! let matrix = CorrelationMatrix::new(
//!     symbols,
//!     vec![
//!         vec![1.0, 0.8, 0.7],
//!         vec![0.8, 1.0, 0.1],
//!         vec![0.7, 0.1, 1.0],
//!     ],
//! );
//!
//! let graph = build_network_graph(&matrix, 0.5, None);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(get_top_bridge_nodes(&graph, 1)[0].id, "X");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod centrality;
pub mod communities;
pub mod graph;
pub mod parallel;

pub use centrality::{
    calculate_betweenness_centrality, calculate_degree_centrality, source_dependencies,
};
pub use communities::{detect_communities, detect_communities_with, CommunityMethod};
pub use graph::{
    build_network_graph, get_top_bridge_nodes, Adjacency, GraphEdge, GraphNode, NetworkEngine,
    NetworkGraph,
};
pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE};
