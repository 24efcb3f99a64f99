//! Symbol-to-sector lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bucket name used when an instrument has no sector entry.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Caller-supplied sector grouping keyed by symbol.
///
/// # Examples
/// ```
/// use structure_core::types::SectorMap;
///
/// let sectors: SectorMap = [("AAPL", "Tech"), ("XOM", "Energy")].into_iter().collect();
/// assert_eq!(sectors.get("AAPL"), Some("Tech"));
/// assert_eq!(sectors.get("JPM"), None);
/// assert_eq!(sectors.get_or_unknown("JPM"), "Unknown");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorMap {
    sectors: HashMap<String, String>,
}

impl SectorMap {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `symbol` to `sector`, replacing any earlier assignment.
    pub fn insert(&mut self, symbol: impl Into<String>, sector: impl Into<String>) {
        self.sectors.insert(symbol.into(), sector.into());
    }

    /// Sector of `symbol`, if known.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.sectors.get(symbol).map(String::as_str)
    }

    /// Sector of `symbol`, or [`UNKNOWN_SECTOR`].
    pub fn get_or_unknown(&self, symbol: &str) -> &str {
        self.get(symbol).unwrap_or(UNKNOWN_SECTOR)
    }

    /// Number of symbols with a sector.
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Whether no symbol has a sector.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for SectorMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            sectors: iter
                .into_iter()
                .map(|(symbol, sector)| (symbol.into(), sector.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for SectorMap {
    fn from(sectors: HashMap<String, String>) -> Self {
        Self { sectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut sectors = SectorMap::new();
        sectors.insert("A", "Tech");
        sectors.insert("A", "Energy");
        assert_eq!(sectors.get("A"), Some("Energy"));
        assert_eq!(sectors.len(), 1);
    }

    #[test]
    fn test_empty_lookup() {
        let sectors = SectorMap::new();
        assert!(sectors.is_empty());
        assert_eq!(sectors.get_or_unknown("A"), UNKNOWN_SECTOR);
    }
}
