//! Error types for return series construction.
//!
//! Correlation and matrix queries are total and never fail; the only
//! fallible step in this layer is turning raw closes into log-returns.

use thiserror::Error;

/// Errors raised while deriving log-returns from closing prices.
///
/// # Examples
/// ```
/// use structure_core::types::SeriesError;
///
/// let err = SeriesError::InvalidPrice { index: 3, price: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid close price -1 at index 3");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// A close was zero, negative, or not finite.
    #[error("Invalid close price {price} at index {index}")]
    InvalidPrice {
        /// Position of the offending close in the chronologically sorted history.
        index: usize,
        /// The rejected value.
        price: f64,
    },

    /// The symbol was empty.
    #[error("Series symbol must not be empty")]
    EmptySymbol,
}
