//! Sector aggregation of shock impacts.

use crate::shock::ShockSimulation;
use std::collections::HashMap;
use structure_core::SectorMap;

/// Total shock impact on one sector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SectorImpact {
    /// Sector name, or `"Unknown"`
    pub sector: String,
    /// Sum of member impacts
    pub total_impact: f64,
    /// Number of impacted instruments in the sector
    pub stock_count: usize,
}

impl SectorImpact {
    /// Mean impact per instrument in the sector.
    pub fn average_impact(&self) -> f64 {
        if self.stock_count == 0 {
            0.0
        } else {
            self.total_impact / self.stock_count as f64
        }
    }
}

/// Groups a simulation's impacts by sector, highest total first.
///
/// Instruments without a sector entry are pooled under `"Unknown"`. Sectors
/// with equal totals keep the order in which they first appear in the
/// (already impact-sorted) simulation.
///
/// # Examples
/// ```
/// use structure_core::{CorrelationMatrix, SectorMap};
/// use structure_network::build_network_graph;
/// use structure_risk::{get_affected_sectors, simulate_shock};
///
/// let matrix = CorrelationMatrix::new(
///     vec!["X".into(), "A".into(), "B".into()],
///     vec![vec![1.0, 0.8, 0.4], vec![0.8, 1.0, 0.0], vec![0.4, 0.0, 1.0]],
/// );
/// let graph = build_network_graph(&matrix, 0.5, None);
/// let sim = simulate_shock("X", 1.0, &matrix, &graph).unwrap();
///
/// let sectors: SectorMap = [("A", "Energy")].into_iter().collect();
/// let grouped = get_affected_sectors(&sim, &sectors);
/// assert_eq!(grouped[0].sector, "Energy");
/// assert_eq!(grouped[1].sector, "Unknown");
/// ```
pub fn get_affected_sectors(simulation: &ShockSimulation, sectors: &SectorMap) -> Vec<SectorImpact> {
    let mut grouped: Vec<SectorImpact> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for impact in &simulation.impacts {
        let sector = sectors.get_or_unknown(&impact.symbol);
        let idx = *position.entry(sector).or_insert_with(|| {
            grouped.push(SectorImpact {
                sector: sector.to_string(),
                total_impact: 0.0,
                stock_count: 0,
            });
            grouped.len() - 1
        });
        grouped[idx].total_impact += impact.impact;
        grouped[idx].stock_count += 1;
    }

    grouped.sort_by(|a, b| b.total_impact.total_cmp(&a.total_impact));
    grouped
}
