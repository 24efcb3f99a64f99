//! Shock propagation over the correlation network.
//!
//! A shock of a given magnitude applied to one instrument is passed on to
//! every other instrument in proportion to their absolute correlation,
//! amplified by the shocked instrument's betweenness.

mod config;
mod engine;

pub use config::{
    ShockConfig, DEFAULT_CENTRALITY_OFFSET, DEFAULT_CENTRALITY_SCALE, DEFAULT_MATERIALITY_FLOOR,
};
pub use engine::{simulate_shock, ShockEngine, ShockImpact, ShockSimulation};
