//! Correlate command implementation
//!
//! Builds the pairwise correlation matrix for a price file.

use std::io::Write;
use std::path::Path;
use structure_core::{build_correlation_matrix, CorrelatedPair, CorrelationMatrix};
use tracing::info;

use crate::config::AnalysisSettings;
use crate::loader;
use crate::output::{fmt_num, open_output, render_table, OutputFormat};
use crate::Result;

/// Run the correlate command
pub fn run(
    settings: &AnalysisSettings,
    prices: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!("Starting correlation...");
    info!("  Prices: {}", prices.display());
    info!("  Top pairs: {}", settings.top_n);
    info!("  Output format: {}", format);

    let series = loader::load_series(prices)?;
    let matrix = build_correlation_matrix(&series);
    let pairs = matrix.top_correlated_pairs(settings.top_n);

    let mut out = open_output(output)?;
    write_report(&mut out, &matrix, &pairs, format)?;
    out.flush()?;

    info!("Correlation complete");
    Ok(())
}

/// Write the matrix and its strongest pairs in `format`.
///
/// CSV output is the full matrix with a leading `symbol` column.
pub fn write_report<W: Write>(
    out: &mut W,
    matrix: &CorrelationMatrix,
    pairs: &[CorrelatedPair],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "matrix": matrix,
                "topPairs": pairs,
            });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            let mut header = vec!["symbol".to_string()];
            header.extend(matrix.symbols.iter().cloned());
            writer.write_record(&header)?;
            for (symbol, row) in matrix.symbols.iter().zip(&matrix.matrix) {
                let mut record = vec![symbol.clone()];
                record.extend(row.iter().map(|rho| rho.to_string()));
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "Correlation matrix: {} instruments", matrix.len())?;
            let rows: Vec<Vec<String>> = pairs
                .iter()
                .enumerate()
                .map(|(rank, p)| {
                    vec![
                        (rank + 1).to_string(),
                        p.symbol1.clone(),
                        p.symbol2.clone(),
                        fmt_num(p.correlation),
                    ]
                })
                .collect();
            write!(
                out,
                "{}",
                render_table(&["Rank", "Symbol 1", "Symbol 2", "Correlation"], &rows)
            )?;
        }
    }
    Ok(())
}
