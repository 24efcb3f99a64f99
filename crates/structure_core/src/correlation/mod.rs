//! Correlation engine.
//!
//! Turns a collection of [`ReturnSeries`](crate::types::ReturnSeries) into a
//! symmetric [`CorrelationMatrix`] and answers read-only queries over it.
//!
//! ## Architecture
//!
//! ```text
//! ReturnSeries[] ──align_tail──► calculate_correlation ──► CorrelationMatrix
//!                                                              │
//!                               get_correlation / get_top_correlated_pairs
//! ```

mod engine;
mod matrix;

pub use engine::{build_correlation_matrix, calculate_correlation};
pub use matrix::{get_correlation, get_top_correlated_pairs, CorrelatedPair, CorrelationMatrix};
