//! Analysis settings management
//!
//! Handles loading settings from TOML files, environment variables, and CLI arguments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use structure_network::{CommunityMethod, ParallelConfig};
use structure_risk::{AnalysisConfig, ShockConfig};
use thiserror::Error;

/// Environment variable overriding the edge threshold.
pub const ENV_THRESHOLD: &str = "STRUCTURE_THRESHOLD";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "STRUCTURE_LOG_LEVEL";
/// Environment variable overriding the default shock magnitude.
pub const ENV_MAGNITUDE: &str = "STRUCTURE_MAGNITUDE";
/// Environment variable overriding the parallel betweenness threshold.
pub const ENV_PARALLEL_THRESHOLD: &str = "STRUCTURE_PARALLEL_THRESHOLD";
/// Environment variable overriding the ranked list length.
pub const ENV_TOP_N: &str = "STRUCTURE_TOP_N";
/// Environment variable overriding the community detection method.
pub const ENV_COMMUNITIES: &str = "STRUCTURE_COMMUNITIES";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid threshold: {0}. Must be between 0 and 1")]
    InvalidThreshold(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid community method: {0}")]
    InvalidCommunityMethod(String),

    #[error("Invalid shock settings: {0}")]
    InvalidShock(String),

    #[error("Invalid batch size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Effective settings for one CLI invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Minimum absolute correlation for an edge
    pub threshold: f64,
    /// Length of ranked pair and bridge lists
    pub top_n: usize,
    /// Default shock magnitude
    pub magnitude: f64,
    /// Community detection strategy
    #[serde(
        deserialize_with = "deserialize_community_method",
        serialize_with = "serialize_community_method"
    )]
    pub community_method: CommunityMethod,
    /// Log level
    pub log_level: LogLevel,
    /// Node count from which betweenness runs in parallel
    pub parallel_threshold: usize,
    /// Minimum sources per Rayon task
    pub batch_size: usize,
    /// Divisor for the shocked node's betweenness
    pub centrality_scale: f64,
    /// Baseline shock multiplier
    pub centrality_offset: f64,
    /// Impact above which an instrument counts as affected
    pub materiality_floor: f64,
}

fn deserialize_community_method<'de, D>(deserializer: D) -> Result<CommunityMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    CommunityMethod::from_str(&s).map_err(serde::de::Error::custom)
}

fn serialize_community_method<S>(method: &CommunityMethod, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(method.name())
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let shock = ShockConfig::default();
        let parallel = ParallelConfig::default();
        Self {
            threshold: 0.5,
            top_n: 10,
            magnitude: 5.0,
            community_method: CommunityMethod::OneHop,
            log_level: LogLevel::Warn,
            parallel_threshold: parallel.parallel_threshold,
            batch_size: parallel.batch_size,
            centrality_scale: shock.centrality_scale,
            centrality_offset: shock.centrality_offset,
            materiality_floor: shock.materiality_floor,
        }
    }
}

impl AnalysisSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings: AnalysisSettings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from process environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_THRESHOLD) {
            self.threshold = parse_env(ENV_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&value)?;
        }
        if let Some(value) = lookup(ENV_MAGNITUDE) {
            self.magnitude = parse_env(ENV_MAGNITUDE, &value)?;
        }
        if let Some(value) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_env(ENV_PARALLEL_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_TOP_N) {
            self.top_n = parse_env(ENV_TOP_N, &value)?;
        }
        if let Some(value) = lookup(ENV_COMMUNITIES) {
            self.community_method = CommunityMethod::from_str(&value)
                .map_err(ConfigError::InvalidCommunityMethod)?;
        }
        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if !self.materiality_floor.is_finite() || self.materiality_floor < 0.0 {
            return Err(ConfigError::InvalidShock(format!(
                "materiality_floor must be non-negative, got {}",
                self.materiality_floor
            )));
        }
        self.shock_config()
            .validate()
            .map_err(|e| ConfigError::InvalidShock(e.to_string()))?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
        if let Some(top_n) = cli.top_n {
            self.top_n = top_n;
        }
        if let Some(magnitude) = cli.magnitude {
            self.magnitude = magnitude;
        }
        if let Some(method) = &cli.community_method {
            self.community_method =
                CommunityMethod::from_str(method).map_err(ConfigError::InvalidCommunityMethod)?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Shock constants as a library configuration
    pub fn shock_config(&self) -> ShockConfig {
        ShockConfig {
            centrality_scale: self.centrality_scale,
            centrality_offset: self.centrality_offset,
            materiality_floor: self.materiality_floor,
        }
    }

    /// Pipeline configuration for `structure_risk`
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            threshold: self.threshold,
            top_n: self.top_n,
            community_method: self.community_method,
            shock: self.shock_config(),
            parallel: ParallelConfig::new(self.batch_size, self.parallel_threshold),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} could not be parsed", key, value)))
}

/// CLI overrides collected from global and subcommand flags
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Threshold override
    pub threshold: Option<f64>,
    /// Ranked list length override
    pub top_n: Option<usize>,
    /// Shock magnitude override
    pub magnitude: Option<f64>,
    /// Community method override
    pub community_method: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AnalysisSettings, ConfigError> {
    let mut settings = match &cli.config_file {
        Some(path) => AnalysisSettings::from_file(path)?,
        None => AnalysisSettings::default(),
    };

    settings.apply_env()?;
    settings.merge_with_cli(cli)?;
    settings.validate()?;

    Ok(settings)
}
