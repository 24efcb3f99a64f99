//! Core input types for market structure analysis.
//!
//! This module provides:
//! - `series`: [`ReturnSeries`], [`PricePoint`] and the log-return adapter
//! - `sector`: [`SectorMap`] symbol-to-sector lookup
//! - `error`: Structured error types for series construction

pub mod error;
pub mod sector;
pub mod series;

pub use error::SeriesError;
pub use sector::{SectorMap, UNKNOWN_SECTOR};
pub use series::{log_returns, PricePoint, ReturnSeries};
