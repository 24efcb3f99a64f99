//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use structure_core::SeriesError;
use structure_risk::ShockError;

/// Errors surfaced by the `structure` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid input data: {0}")]
    InvalidData(String),

    #[error("Invalid price series: {0}")]
    Series(#[from] SeriesError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] ShockError),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("prices.csv".to_string());
        assert_eq!(err.to_string(), "File not found: prices.csv");

        let err = CliError::InvalidArgument("Unknown format: xml".to_string());
        assert!(err.to_string().contains("Unknown format"));
    }

    #[test]
    fn test_from_shock_error() {
        let err: CliError = ShockError::UnknownSymbol("ZZZ".to_string()).into();
        assert_eq!(err.to_string(), "Analysis failed: Unknown shock symbol: ZZZ");
    }

    #[test]
    fn test_from_config_error() {
        let err: CliError = ConfigError::InvalidThreshold(1.5).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
