//! Check command implementation
//!
//! Prints the effective settings after file, environment and CLI overrides.

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::AnalysisSettings;
use crate::output::open_output;
use crate::Result;

/// Run the check command
pub fn run(settings: &AnalysisSettings, config_file: Option<&Path>, output: Option<&Path>) -> Result<()> {
    info!("Checking configuration...");

    let mut out = open_output(output)?;
    write_settings(&mut out, settings, config_file)?;
    out.flush()?;

    info!("Configuration OK");
    Ok(())
}

/// Write the effective settings as TOML, preceded by a comment naming the source.
pub fn write_settings<W: Write>(
    out: &mut W,
    settings: &AnalysisSettings,
    config_file: Option<&Path>,
) -> Result<()> {
    writeln!(out, "# structure {}", env!("CARGO_PKG_VERSION"))?;
    match config_file {
        Some(path) => writeln!(out, "# config file: {}", path.display())?,
        None => writeln!(out, "# config file: none (defaults)")?,
    }
    write!(out, "{}", toml::to_string(settings)?)?;
    Ok(())
}
