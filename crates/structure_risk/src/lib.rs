//! # structure_risk (L3: Application)
//!
//! Shock propagation over correlation networks and the end-to-end analysis
//! pipeline.
//!
//! This crate provides:
//! - [`ShockEngine`] and [`simulate_shock`] for centrality-amplified shock impacts
//! - [`get_affected_sectors`] for sector-level aggregation of a shock
//! - [`MarketStructureAnalysis`] chaining correlation, network, communities
//!   and an optional shock into one [`AnalysisReport`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          structure_risk (L3)            │
//! ├─────────────────────────────────────────┤
//! │  shock/     - ShockConfig, ShockEngine  │
//! │  sectors    - SectorImpact aggregation  │
//! │  analysis   - MarketStructureAnalysis   │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │         structure_network (L2)          │
//! │  NetworkGraph, betweenness, communities │
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
//! use structure_core::{ReturnSeries, SectorMap};
//! use structure_risk::{MarketStructureAnalysis, ShockRequest};
//!
//! let series = vec![
//!     ReturnSeries::new("AAA", vec![0.01, -0.02, 0.03, 0.00, 0.01]),
//!     ReturnSeries::new("BBB", vec![0.02, -0.04, 0.06, 0.00, 0.02]),
//!     ReturnSeries::new("CCC", vec![0.01, 0.01, -0.01, 0.02, -0.02]),
//! ];
//!
//! let analysis = MarketStructureAnalysis::default();
//! let report = analysis
//!     .run(&series, &SectorMap::new(), Some(&ShockRequest::new("AAA", 5.0)))
//!     .unwrap();
//!
//! let shock = report.shock.unwrap();
//! assert_eq!(shock.impacts[0].symbol, "BBB");
//! assert!((shock.impacts[0].impact - 5.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod error;
pub mod sectors;
pub mod shock;

pub use analysis::{AnalysisConfig, AnalysisReport, MarketStructureAnalysis, ShockRequest};
pub use error::ShockError;
pub use sectors::{get_affected_sectors, SectorImpact};
pub use shock::{simulate_shock, ShockConfig, ShockEngine, ShockImpact, ShockSimulation};
