//! Shock command implementation
//!
//! Shocks one instrument and reports the propagated impacts per instrument
//! and per sector.

use std::io::Write;
use std::path::Path;
use structure_core::SectorMap;
use structure_risk::{MarketStructureAnalysis, SectorImpact, ShockRequest, ShockSimulation};
use tracing::info;

use crate::config::AnalysisSettings;
use crate::loader;
use crate::output::{fmt_num, open_output, render_table, OutputFormat};
use crate::{CliError, Result};

/// Run the shock command
pub fn run(
    settings: &AnalysisSettings,
    prices: &Path,
    symbol: &str,
    sectors: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!("Starting shock simulation...");
    info!("  Prices: {}", prices.display());
    info!("  Symbol: {}", symbol);
    info!("  Magnitude: {}", settings.magnitude);
    info!("  Threshold: {}", settings.threshold);
    info!("  Output format: {}", format);

    let series = loader::load_series(prices)?;
    let sector_map = loader::load_optional_sectors(sectors)?;

    let analysis = MarketStructureAnalysis::new(settings.analysis_config())?;
    let request = ShockRequest::new(symbol, settings.magnitude);
    let report = analysis.run(&series, &sector_map, Some(&request))?;

    let (simulation, by_sector) = match (report.shock, report.sectors) {
        (Some(simulation), Some(by_sector)) => (simulation, by_sector),
        _ => {
            return Err(CliError::InvalidData(format!(
                "no shock result produced for {}",
                symbol
            )))
        }
    };

    let mut out = open_output(output)?;
    write_report(&mut out, &simulation, &by_sector, &sector_map, format)?;
    out.flush()?;

    info!(
        total_affected = simulation.total_affected,
        max_impact = simulation.max_impact,
        "Shock simulation complete"
    );
    Ok(())
}

/// Write a simulation and its sector breakdown in `format`.
///
/// CSV output lists one row per impacted instrument.
pub fn write_report<W: Write>(
    out: &mut W,
    simulation: &ShockSimulation,
    by_sector: &[SectorImpact],
    sectors: &SectorMap,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "shock": simulation,
                "sectors": by_sector,
            });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["symbol", "sector", "correlation", "centrality", "impact"])?;
            for impact in &simulation.impacts {
                writer.write_record([
                    impact.symbol.clone(),
                    sectors.get_or_unknown(&impact.symbol).to_string(),
                    impact.original_correlation.to_string(),
                    impact.centrality.to_string(),
                    impact.impact.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "Shock: {} x {} | affected {} | max {} | average {}",
                simulation.shock_symbol,
                simulation.shock_magnitude,
                simulation.total_affected,
                fmt_num(simulation.max_impact),
                fmt_num(simulation.average_impact)
            )?;
            let rows: Vec<Vec<String>> = simulation
                .impacts
                .iter()
                .map(|i| {
                    vec![
                        i.symbol.clone(),
                        sectors.get_or_unknown(&i.symbol).to_string(),
                        fmt_num(i.original_correlation),
                        fmt_num(i.centrality),
                        fmt_num(i.impact),
                    ]
                })
                .collect();
            write!(
                out,
                "{}",
                render_table(
                    &["Symbol", "Sector", "Correlation", "Centrality", "Impact"],
                    &rows
                )
            )?;

            writeln!(out, "\nSectors")?;
            let rows: Vec<Vec<String>> = by_sector
                .iter()
                .map(|s| {
                    vec![
                        s.sector.clone(),
                        s.stock_count.to_string(),
                        fmt_num(s.total_impact),
                        fmt_num(s.average_impact()),
                    ]
                })
                .collect();
            write!(
                out,
                "{}",
                render_table(&["Sector", "Stocks", "Total", "Average"], &rows)
            )?;
        }
    }
    Ok(())
}
