//! Return series and the log-return adapter.
//!
//! A [`ReturnSeries`] is one instrument's ordered log-returns. Callers usually
//! build it from a price history with [`ReturnSeries::from_price_history`],
//! which sorts observations chronologically before differencing.

use super::error::SeriesError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date of the observation
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// One instrument's historical behaviour as ordered log-returns.
///
/// The symbol is the stable key used by the matrix, the graph and the shock
/// simulation. Fewer than two returns is allowed; such a series simply
/// correlates at `0.0` with everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    /// Instrument identifier
    pub symbol: String,
    /// Log-returns, oldest first
    pub returns: Vec<f64>,
}

impl ReturnSeries {
    /// Creates a series from already computed returns.
    pub fn new(symbol: impl Into<String>, returns: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            returns,
        }
    }

    /// Builds a series from chronologically ordered closes.
    ///
    /// # Errors
    /// Returns [`SeriesError::EmptySymbol`] for an empty symbol and
    /// [`SeriesError::InvalidPrice`] for any non-positive or non-finite close.
    pub fn from_closes(symbol: impl Into<String>, closes: &[f64]) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(SeriesError::EmptySymbol);
        }
        Ok(Self {
            symbol,
            returns: log_returns(closes)?,
        })
    }

    /// Builds a series from an unordered price history.
    ///
    /// Points are sorted by date. When a date appears more than once the
    /// last observation supplied for that date wins.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use structure_core::types::{PricePoint, ReturnSeries};
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    /// let history = vec![
    ///     PricePoint::new(d(3), 110.0),
    ///     PricePoint::new(d(2), 100.0),
    /// ];
    /// let series = ReturnSeries::from_price_history("ACME", history).unwrap();
    /// assert_eq!(series.len(), 1);
    /// assert!((series.returns[0] - (1.1_f64).ln()).abs() < 1e-12);
    /// ```
    pub fn from_price_history(
        symbol: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, SeriesError> {
        // Stable sort keeps supplied order within a date, so the last one wins.
        points.sort_by_key(|p| p.date);
        let mut closes: Vec<f64> = Vec::with_capacity(points.len());
        let mut last_date: Option<NaiveDate> = None;
        for point in &points {
            if last_date == Some(point.date) {
                if let Some(last) = closes.last_mut() {
                    *last = point.close;
                }
            } else {
                closes.push(point.close);
                last_date = Some(point.date);
            }
        }
        Self::from_closes(symbol, &closes)
    }

    /// Number of returns in the series.
    #[inline]
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Whether the series holds no returns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// The most recent `n` returns (or all of them when shorter).
    #[inline]
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.returns[self.returns.len().saturating_sub(n)..]
    }
}

/// Computes `ln(close[t] / close[t-1])` for consecutive closes.
///
/// Fewer than two closes produce an empty vector.
///
/// # Errors
/// Returns [`SeriesError::InvalidPrice`] for the first close that is not a
/// finite positive number.
pub fn log_returns(closes: &[f64]) -> Result<Vec<f64>, SeriesError> {
    if let Some((index, &price)) = closes
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c <= 0.0)
    {
        return Err(SeriesError::InvalidPrice { index, price });
    }

    Ok(closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}
