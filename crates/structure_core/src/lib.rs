//! # structure_core: Foundation for Market Structure Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! structure_core is the bottom layer of the analysis workspace, providing:
//! - Return series and the log-return adapter (`types::series`)
//! - Sector lookup shared by the network and shock layers (`types::sector`)
//! - Error types: `SeriesError` (`types::error`)
//! - Pearson statistics over generic floats (`math::statistics`)
//! - The correlation engine and `CorrelationMatrix` (`correlation`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other structure_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Chronological ordering of price histories
//! - serde: Serialisation of the matrix and series
//! - tracing: Debug-level diagnostics
//!
//! Nothing in this crate performs I/O. Every call recomputes from the
//! borrowed inputs and leaves them untouched.
//!
//! ## Usage Examples
//!
//! ```rust
//! use structure_core::correlation::{build_correlation_matrix, get_correlation};
//! use structure_core::types::ReturnSeries;
//!
//! let series = vec![
//!     ReturnSeries::new("A", vec![0.01, 0.02, -0.01, 0.03]),
//!     ReturnSeries::new("B", vec![0.01, 0.02, -0.01, 0.03]),
//!     ReturnSeries::new("C", vec![-0.01, -0.02, 0.01, -0.03]),
//! ];
//!
//! let matrix = build_correlation_matrix(&series);
//! assert!((get_correlation(&matrix, "A", "B") - 1.0).abs() < 1e-12);
//! assert!((get_correlation(&matrix, "A", "C") + 1.0).abs() < 1e-12);
//! assert_eq!(get_correlation(&matrix, "A", "ZZZ"), 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod correlation;
pub mod math;
pub mod types;

pub use correlation::{
    build_correlation_matrix, calculate_correlation, get_correlation, get_top_correlated_pairs,
    CorrelatedPair, CorrelationMatrix,
};
pub use types::{PricePoint, ReturnSeries, SectorMap, SeriesError, UNKNOWN_SECTOR};
