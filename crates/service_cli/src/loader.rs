//! CSV input loading
//!
//! Prices arrive in long format, one `date,symbol,close` row per observation,
//! in any order. Sectors arrive as `symbol,sector` rows.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use structure_core::{PricePoint, ReturnSeries, SectorMap};
use tracing::{debug, warn};

use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: NaiveDate,
    symbol: String,
    close: f64,
}

#[derive(Debug, Deserialize)]
struct SectorRow {
    symbol: String,
    sector: String,
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).comment(Some(b'#'));
    builder
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Load return series from a prices CSV file.
pub fn load_series(path: &Path) -> Result<Vec<ReturnSeries>> {
    ensure_exists(path)?;
    debug!(path = %path.display(), "loading prices");
    read_series(std::fs::File::open(path)?)
}

/// Parse return series from prices CSV data.
///
/// Series are returned in order of each symbol's first row.
pub fn read_series<R: Read>(input: R) -> Result<Vec<ReturnSeries>> {
    let mut reader = reader_builder().from_reader(input);

    let mut order: Vec<String> = Vec::new();
    let mut histories: HashMap<String, Vec<PricePoint>> = HashMap::new();
    for row in reader.deserialize() {
        let row: PriceRow = row?;
        if row.symbol.is_empty() {
            return Err(CliError::InvalidData(format!(
                "empty symbol on {}",
                row.date
            )));
        }
        let history = histories.entry(row.symbol.clone()).or_insert_with(|| {
            order.push(row.symbol.clone());
            Vec::new()
        });
        history.push(PricePoint::new(row.date, row.close));
    }

    if order.is_empty() {
        return Err(CliError::InvalidData("no price rows found".to_string()));
    }

    let mut series = Vec::with_capacity(order.len());
    for symbol in order {
        let points = histories.remove(&symbol).unwrap_or_default();
        let s = ReturnSeries::from_price_history(symbol, points)?;
        if s.len() < 2 {
            warn!(symbol = %s.symbol, returns = s.len(), "too few returns; correlations will be zero");
        }
        series.push(s);
    }

    debug!(instruments = series.len(), "prices loaded");
    Ok(series)
}

/// Load a sector mapping from a CSV file.
pub fn load_sectors(path: &Path) -> Result<SectorMap> {
    ensure_exists(path)?;
    debug!(path = %path.display(), "loading sectors");
    read_sectors(std::fs::File::open(path)?)
}

/// Parse a sector mapping from `symbol,sector` CSV data.
///
/// A symbol listed twice keeps its last sector.
pub fn read_sectors<R: Read>(input: R) -> Result<SectorMap> {
    let mut reader = reader_builder().from_reader(input);
    let mut sectors = SectorMap::new();
    for row in reader.deserialize() {
        let row: SectorRow = row?;
        sectors.insert(row.symbol, row.sector);
    }
    Ok(sectors)
}

/// Load sectors when a path is given, otherwise an empty mapping.
pub fn load_optional_sectors(path: Option<&Path>) -> Result<SectorMap> {
    match path {
        Some(p) => load_sectors(p),
        None => Ok(SectorMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use structure_core::SeriesError;

    const PRICES: &str = "\
date,symbol,close
2024-01-03,AAA,110.0
2024-01-02,AAA,100.0
2024-01-02,BBB,50.0
2024-01-03,BBB,45.0
2024-01-04,AAA,121.0
2024-01-04,BBB,40.5
";

    #[test]
    fn test_read_series_orders_by_date() {
        let series = read_series(PRICES.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].symbol, "AAA");
        assert_eq!(series[1].symbol, "BBB");

        assert_eq!(series[0].len(), 2);
        assert_relative_eq!(series[0].returns[0], 1.1_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(series[0].returns[1], 1.1_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(series[1].returns[0], 0.9_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_read_series_trims_and_skips_comments() {
        let data = "date, symbol, close\n# header comment\n2024-01-02, AAA , 1.0\n2024-01-03,AAA,2.0\n";
        let series = read_series(data.as_bytes()).unwrap();
        assert_eq!(series[0].symbol, "AAA");
        assert_relative_eq!(series[0].returns[0], 2.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_read_series_rejects_bad_date() {
        let data = "date,symbol,close\n02/01/2024,AAA,1.0\n";
        assert!(matches!(read_series(data.as_bytes()), Err(CliError::Csv(_))));
    }

    #[test]
    fn test_read_series_rejects_non_positive_close() {
        let data = "date,symbol,close\n2024-01-02,AAA,1.0\n2024-01-03,AAA,0.0\n";
        let err = read_series(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Series(SeriesError::InvalidPrice { index: 1, .. })
        ));
    }

    #[test]
    fn test_read_series_rejects_empty_input() {
        let data = "date,symbol,close\n";
        assert!(matches!(
            read_series(data.as_bytes()),
            Err(CliError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_series_rejects_empty_symbol() {
        let data = "date,symbol,close\n2024-01-02,,1.0\n";
        assert!(matches!(
            read_series(data.as_bytes()),
            Err(CliError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_sectors() {
        let data = "symbol,sector\nAAA,Tech\nBBB,Energy\nAAA,Media\n";
        let sectors = read_sectors(data.as_bytes()).unwrap();
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors.get("AAA"), Some("Media"));
        assert_eq!(sectors.get_or_unknown("ZZZ"), "Unknown");
    }

    #[test]
    fn test_load_from_files() {
        let mut prices = tempfile::NamedTempFile::new().unwrap();
        prices.write_all(PRICES.as_bytes()).unwrap();
        let mut sectors = tempfile::NamedTempFile::new().unwrap();
        writeln!(sectors, "symbol,sector\nAAA,Tech").unwrap();

        let series = load_series(prices.path()).unwrap();
        assert_eq!(series.len(), 2);
        let map = load_optional_sectors(Some(sectors.path())).unwrap();
        assert_eq!(map.get("AAA"), Some("Tech"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_series(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert!(load_optional_sectors(None).unwrap().is_empty());
    }
}
