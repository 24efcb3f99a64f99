//! Structure CLI - Command Line Market Structure Analysis
//!
//! This is the operational entry point for the market structure libraries.
//!
//! # Commands
//!
//! - `structure correlate --prices <file>` - Pairwise correlation matrix
//! - `structure network --prices <file>` - Thresholded network, bridges and communities
//! - `structure shock --prices <file> --symbol <sym>` - Shock propagation
//! - `structure check` - Print the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate owns all file handling and
//! orchestrates the `structure_core`, `structure_network` and
//! `structure_risk` crates.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod loader;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel};
use output::OutputFormat;

/// Market structure analysis CLI
#[derive(Parser)]
#[command(name = "structure")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "STRUCTURE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write results to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the pairwise correlation matrix
    Correlate {
        /// Path to prices CSV (date,symbol,close)
        #[arg(short, long)]
        prices: PathBuf,

        /// Number of strongest pairs to report
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build the correlation network and rank bridges
    Network {
        /// Path to prices CSV (date,symbol,close)
        #[arg(short, long)]
        prices: PathBuf,

        /// Minimum absolute correlation for an edge
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Path to sectors CSV (symbol,sector)
        #[arg(short, long)]
        sectors: Option<PathBuf>,

        /// Number of bridges to report
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Community detection (one-hop, components, label-propagation)
        #[arg(long)]
        communities: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Simulate a shock to one instrument
    Shock {
        /// Path to prices CSV (date,symbol,close)
        #[arg(short, long)]
        prices: PathBuf,

        /// Instrument to shock
        #[arg(long)]
        symbol: String,

        /// Shock magnitude
        #[arg(short, long)]
        magnitude: Option<f64>,

        /// Minimum absolute correlation for an edge
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Path to sectors CSV (symbol,sector)
        #[arg(short, long)]
        sectors: Option<PathBuf>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration and print effective settings
    Check,
}

impl Cli {
    /// Collect setting overrides from global and subcommand flags.
    fn overrides(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            ..Default::default()
        };
        match &self.command {
            Commands::Correlate { top, .. } => {
                args.top_n = *top;
            }
            Commands::Network {
                threshold,
                top,
                communities,
                ..
            } => {
                args.threshold = *threshold;
                args.top_n = *top;
                args.community_method = communities.clone();
            }
            Commands::Shock {
                magnitude,
                threshold,
                ..
            } => {
                args.magnitude = *magnitude;
                args.threshold = *threshold;
            }
            Commands::Check => {}
        }
        args
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = build_config(&cli.overrides())?;
    let log_level = if cli.verbose && settings.log_level != LogLevel::Trace {
        LogLevel::Debug
    } else {
        settings.log_level
    };
    init_tracing(log_level.as_filter_str());

    info!(
        threshold = settings.threshold,
        top_n = settings.top_n,
        communities = %settings.community_method,
        log_level = %log_level,
        "Configuration loaded"
    );

    let output = cli.output.as_deref();
    match &cli.command {
        Commands::Correlate { prices, format, .. } => {
            commands::correlate::run(&settings, prices, OutputFormat::from_str(format)?, output)
        }
        Commands::Network {
            prices,
            sectors,
            format,
            ..
        } => commands::network::run(
            &settings,
            prices,
            sectors.as_deref(),
            OutputFormat::from_str(format)?,
            output,
        ),
        Commands::Shock {
            prices,
            symbol,
            sectors,
            format,
            ..
        } => commands::shock::run(
            &settings,
            prices,
            symbol,
            sectors.as_deref(),
            OutputFormat::from_str(format)?,
            output,
        ),
        Commands::Check => commands::check::run(&settings, cli.config.as_deref(), output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_network_overrides() {
        let cli = Cli::try_parse_from([
            "structure",
            "network",
            "--prices",
            "p.csv",
            "--threshold",
            "0.7",
            "--communities",
            "components",
            "-n",
            "3",
        ])
        .unwrap();
        let args = cli.overrides();
        assert_eq!(args.threshold, Some(0.7));
        assert_eq!(args.top_n, Some(3));
        assert_eq!(args.community_method.as_deref(), Some("components"));
        assert_eq!(args.magnitude, None);
    }

    #[test]
    fn test_shock_overrides_and_global_flags() {
        let cli = Cli::try_parse_from([
            "structure",
            "shock",
            "--prices",
            "p.csv",
            "--symbol",
            "AAA",
            "--magnitude",
            "12",
            "--log-level",
            "debug",
            "-o",
            "out.json",
        ])
        .unwrap();
        let args = cli.overrides();
        assert_eq!(args.magnitude, Some(12.0));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_shock_requires_symbol() {
        assert!(Cli::try_parse_from(["structure", "shock", "--prices", "p.csv"]).is_err());
    }
}
