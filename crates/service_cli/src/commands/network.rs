//! Network command implementation
//!
//! Builds the thresholded correlation network and reports centralities,
//! bridges and communities.

use std::io::Write;
use std::path::Path;
use structure_risk::{AnalysisReport, MarketStructureAnalysis};
use tracing::info;

use crate::config::AnalysisSettings;
use crate::loader;
use crate::output::{fmt_num, open_output, render_table, OutputFormat};
use crate::Result;

/// Run the network command
pub fn run(
    settings: &AnalysisSettings,
    prices: &Path,
    sectors: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!("Starting network analysis...");
    info!("  Prices: {}", prices.display());
    info!("  Threshold: {}", settings.threshold);
    info!("  Communities: {}", settings.community_method);
    info!("  Output format: {}", format);

    let series = loader::load_series(prices)?;
    let sector_map = loader::load_optional_sectors(sectors)?;

    let analysis = MarketStructureAnalysis::new(settings.analysis_config())?;
    let report = analysis.run(&series, &sector_map, None)?;

    let mut out = open_output(output)?;
    write_report(&mut out, &report, format)?;
    out.flush()?;

    info!(
        nodes = report.graph.node_count(),
        edges = report.graph.edge_count(),
        "Network analysis complete"
    );
    Ok(())
}

/// Write the network section of `report` in `format`.
///
/// JSON carries the whole report; CSV and table list one row per node.
pub fn write_report<W: Write>(out: &mut W, report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["symbol", "sector", "degree", "betweenness", "community"])?;
            for row in node_rows(report) {
                writer.write_record(&row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let graph = &report.graph;
            writeln!(
                out,
                "Network: {} nodes, {} edges, density {}, threshold {}",
                graph.node_count(),
                graph.edge_count(),
                fmt_num(graph.density()),
                graph.threshold
            )?;
            write!(
                out,
                "{}",
                render_table(
                    &["Symbol", "Sector", "Degree", "Betweenness", "Community"],
                    &node_rows(report)
                )
            )?;

            writeln!(out, "\nTop bridges")?;
            let bridges: Vec<Vec<String>> = report
                .bridges
                .iter()
                .enumerate()
                .map(|(rank, node)| {
                    vec![
                        (rank + 1).to_string(),
                        node.id.clone(),
                        fmt_num(node.betweenness),
                    ]
                })
                .collect();
            write!(out, "{}", render_table(&["Rank", "Symbol", "Betweenness"], &bridges))?;

            let isolated: Vec<&str> = graph.isolated_nodes().map(|n| n.id.as_str()).collect();
            if !isolated.is_empty() {
                writeln!(out, "\nIsolated: {}", isolated.join(", "))?;
            }
        }
    }
    Ok(())
}

fn node_rows(report: &AnalysisReport) -> Vec<Vec<String>> {
    report
        .graph
        .nodes
        .iter()
        .map(|node| {
            vec![
                node.id.clone(),
                node.sector.clone().unwrap_or_default(),
                node.degree.to_string(),
                fmt_num(node.betweenness),
                report
                    .communities
                    .get(&node.id)
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}
