//! Shock simulation.

use super::config::ShockConfig;
use crate::error::ShockError;
use structure_core::CorrelationMatrix;
use structure_network::NetworkGraph;

/// Estimated impact on one instrument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShockImpact {
    /// Affected instrument
    pub symbol: String,
    /// Estimated impact (same units as the shock magnitude)
    pub impact: f64,
    /// Signed correlation with the shocked instrument
    pub original_correlation: f64,
    /// Betweenness of the affected instrument (`0.0` if absent from the graph)
    pub centrality: f64,
}

/// Outcome of shocking one instrument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShockSimulation {
    /// Shocked instrument
    pub shock_symbol: String,
    /// Shock size as supplied
    pub shock_magnitude: f64,
    /// One entry per other instrument, highest impact first
    pub impacts: Vec<ShockImpact>,
    /// Impacts strictly above the materiality floor
    pub total_affected: usize,
    /// Largest impact, `0.0` when there are none
    pub max_impact: f64,
    /// Mean over all impacts, `0.0` when there are none
    pub average_impact: f64,
}

impl ShockSimulation {
    /// Impact entry for `symbol`.
    pub fn impact_on(&self, symbol: &str) -> Option<&ShockImpact> {
        self.impacts.iter().find(|i| i.symbol == symbol)
    }
}

/// Shock simulator parameterised by its calibration constants.
#[derive(Clone, Debug, Default)]
pub struct ShockEngine {
    config: ShockConfig,
}

impl ShockEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    /// Returns [`ShockError::InvalidConfig`] when `config` fails validation.
    pub fn new(config: ShockConfig) -> Result<Self, ShockError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Calibration constants in use.
    pub fn config(&self) -> &ShockConfig {
        &self.config
    }

    /// Propagates a shock of `magnitude` from `symbol` through the network.
    ///
    /// The magnitude is not bounds-checked; impacts are non-negative for any
    /// non-negative magnitude and scale linearly with it.
    ///
    /// # Errors
    /// Returns [`ShockError::UnknownSymbol`] if `symbol` is not in `matrix`.
    pub fn simulate(
        &self,
        symbol: &str,
        magnitude: f64,
        matrix: &CorrelationMatrix,
        graph: &NetworkGraph,
    ) -> Result<ShockSimulation, ShockError> {
        let source = matrix
            .index_of(symbol)
            .ok_or_else(|| ShockError::UnknownSymbol(symbol.to_string()))?;

        let amplification = self.config.amplification(graph.betweenness(symbol));

        let mut impacts: Vec<ShockImpact> = matrix
            .symbols
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != source)
            .map(|(i, other)| {
                let rho = matrix.get(source, i);
                ShockImpact {
                    symbol: other.clone(),
                    impact: rho.abs() * amplification * magnitude,
                    original_correlation: rho,
                    centrality: graph.betweenness(other),
                }
            })
            .collect();
        impacts.sort_by(|a, b| b.impact.total_cmp(&a.impact));

        let total_affected = impacts
            .iter()
            .filter(|i| i.impact > self.config.materiality_floor)
            .count();
        let max_impact = impacts.first().map_or(0.0, |i| i.impact);
        let average_impact = if impacts.is_empty() {
            0.0
        } else {
            impacts.iter().map(|i| i.impact).sum::<f64>() / impacts.len() as f64
        };

        tracing::debug!(
            symbol,
            magnitude,
            amplification,
            total_affected,
            max_impact,
            "shock simulated"
        );

        Ok(ShockSimulation {
            shock_symbol: symbol.to_string(),
            shock_magnitude: magnitude,
            impacts,
            total_affected,
            max_impact,
            average_impact,
        })
    }
}

/// Simulates a shock with the default constants.
///
/// # Errors
/// Returns [`ShockError::UnknownSymbol`] if `symbol` is not in `matrix`.
///
/// # Examples
/// ```
/// use structure_core::CorrelationMatrix;
/// use structure_network::build_network_graph;
/// use structure_risk::simulate_shock;
///
/// let matrix = CorrelationMatrix::new(
///     vec!["A".into(), "B".into()],
///     vec![vec![1.0, -0.6], vec![-0.6, 1.0]],
/// );
/// let graph = build_network_graph(&matrix, 0.5, None);
///
/// let sim = simulate_shock("A", 10.0, &matrix, &graph).unwrap();
/// assert_eq!(sim.impacts.len(), 1);
/// assert!((sim.impacts[0].impact - 6.0).abs() < 1e-12);
/// assert!(simulate_shock("Z", 10.0, &matrix, &graph).is_err());
/// ```
pub fn simulate_shock(
    symbol: &str,
    magnitude: f64,
    matrix: &CorrelationMatrix,
    graph: &NetworkGraph,
) -> Result<ShockSimulation, ShockError> {
    ShockEngine::default().simulate(symbol, magnitude, matrix, graph)
}
