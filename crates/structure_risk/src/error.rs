//! Shock engine error types.

use thiserror::Error;

/// Errors that can occur while simulating a shock.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShockError {
    /// The shocked symbol has no row in the correlation matrix.
    #[error("Unknown shock symbol: {0}")]
    UnknownSymbol(String),

    /// A shock configuration constant is out of range.
    #[error("Invalid shock configuration: {0}")]
    InvalidConfig(String),
}
