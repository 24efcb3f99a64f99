//! Centrality measures over the thresholded network.
//!
//! - `degree`: raw neighbour counts
//! - `betweenness`: Brandes shortest-path accumulation, one pure pass per
//!   source followed by an explicit reduction

mod betweenness;
mod degree;

pub use betweenness::{
    betweenness_scores, calculate_betweenness_centrality, normalise_betweenness,
    source_dependencies,
};
pub use degree::{calculate_degree_centrality, degree_scores};
