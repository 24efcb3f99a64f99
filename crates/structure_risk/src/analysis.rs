//! End-to-end market structure analysis.
//!
//! Chains the correlation, network and shock engines over one snapshot of
//! return series and bundles every intermediate result into an
//! [`AnalysisReport`].

use crate::error::ShockError;
use crate::sectors::{get_affected_sectors, SectorImpact};
use crate::shock::{ShockConfig, ShockEngine, ShockSimulation};
use std::collections::HashMap;
use structure_core::correlation::build_correlation_matrix;
use structure_core::{CorrelatedPair, CorrelationMatrix, ReturnSeries, SectorMap};
use structure_network::{
    detect_communities_with, get_top_bridge_nodes, CommunityMethod, GraphNode, NetworkEngine,
    NetworkGraph, ParallelConfig,
};

/// Default edge threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default length of the ranked pair and bridge lists.
pub const DEFAULT_TOP_N: usize = 10;

/// Parameters of one analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Minimum absolute correlation for an edge
    pub threshold: f64,
    /// Length of ranked lists
    pub top_n: usize,
    /// Community detection strategy
    pub community_method: CommunityMethod,
    /// Shock model constants
    pub shock: ShockConfig,
    /// Betweenness parallelisation
    pub parallel: ParallelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            community_method: CommunityMethod::default(),
            shock: ShockConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// A shock to apply during the run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShockRequest {
    /// Instrument to shock
    pub symbol: String,
    /// Shock size
    pub magnitude: f64,
}

impl ShockRequest {
    /// Creates a shock request.
    pub fn new(symbol: impl Into<String>, magnitude: f64) -> Self {
        Self {
            symbol: symbol.into(),
            magnitude,
        }
    }
}

/// Everything computed in one run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AnalysisReport {
    /// Pairwise correlations
    pub matrix: CorrelationMatrix,
    /// Thresholded network with centralities
    pub graph: NetworkGraph,
    /// Strongest pairs by absolute correlation
    pub top_pairs: Vec<CorrelatedPair>,
    /// Highest-betweenness nodes
    pub bridges: Vec<GraphNode>,
    /// Community id per symbol
    pub communities: HashMap<String, usize>,
    /// Shock outcome, if one was requested
    pub shock: Option<ShockSimulation>,
    /// Sector breakdown of the shock, if one was requested
    pub sectors: Option<Vec<SectorImpact>>,
}

/// Runs the full pipeline with fixed settings.
#[derive(Clone, Debug)]
pub struct MarketStructureAnalysis {
    config: AnalysisConfig,
    network: NetworkEngine,
    shock: ShockEngine,
}

impl MarketStructureAnalysis {
    /// Creates an analysis after validating the shock constants.
    ///
    /// # Errors
    /// Returns [`ShockError::InvalidConfig`] if the shock constants are invalid.
    pub fn new(config: AnalysisConfig) -> Result<Self, ShockError> {
        let shock = ShockEngine::new(config.shock)?;
        let network = NetworkEngine::new(config.parallel.clone());
        Ok(Self {
            config,
            network,
            shock,
        })
    }

    /// Settings in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Correlation matrix and network for `series`.
    pub fn build(
        &self,
        series: &[ReturnSeries],
        sectors: &SectorMap,
    ) -> (CorrelationMatrix, NetworkGraph) {
        let matrix = build_correlation_matrix(series);
        let graph = self.network.build(&matrix, self.config.threshold, Some(sectors));
        (matrix, graph)
    }

    /// Runs correlation, network, communities and, optionally, a shock.
    ///
    /// # Errors
    /// Returns [`ShockError::UnknownSymbol`] if the requested shock symbol is
    /// not among `series`.
    pub fn run(
        &self,
        series: &[ReturnSeries],
        sectors: &SectorMap,
        shock: Option<&ShockRequest>,
    ) -> Result<AnalysisReport, ShockError> {
        tracing::info!(
            instruments = series.len(),
            threshold = self.config.threshold,
            "running market structure analysis"
        );

        let (matrix, graph) = self.build(series, sectors);
        let top_pairs = matrix.top_correlated_pairs(self.config.top_n);
        let bridges: Vec<GraphNode> = get_top_bridge_nodes(&graph, self.config.top_n)
            .into_iter()
            .cloned()
            .collect();
        let communities = detect_communities_with(&graph, self.config.community_method);

        let (shock, sector_impacts) = match shock {
            Some(request) => {
                let simulation =
                    self.shock
                        .simulate(&request.symbol, request.magnitude, &matrix, &graph)?;
                let grouped = get_affected_sectors(&simulation, sectors);
                (Some(simulation), Some(grouped))
            }
            None => (None, None),
        };

        Ok(AnalysisReport {
            matrix,
            graph,
            top_pairs,
            bridges,
            communities,
            shock,
            sectors: sector_impacts,
        })
    }
}

impl Default for MarketStructureAnalysis {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            network: NetworkEngine::default(),
            shock: ShockEngine::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Vec<ReturnSeries> {
        let base = [0.01, -0.02, 0.015, 0.005, -0.01, 0.02];
        let noise = [0.003, 0.001, -0.004, 0.002, 0.0, -0.001];
        vec![
            ReturnSeries::new("AAA", base.to_vec()),
            ReturnSeries::new(
                "BBB",
                base.iter().zip(noise).map(|(b, n)| b + n).collect(),
            ),
            ReturnSeries::new("CCC", base.iter().map(|b| -b).collect()),
            ReturnSeries::new("DDD", vec![0.01, 0.01, -0.01, -0.01, 0.01, 0.01]),
        ]
    }

    #[test]
    fn test_run_without_shock() {
        let analysis = MarketStructureAnalysis::default();
        let report = analysis.run(&universe(), &SectorMap::new(), None).unwrap();
        assert_eq!(report.matrix.len(), 4);
        assert_eq!(report.graph.node_count(), 4);
        assert_eq!(report.communities.len(), 4);
        assert!(report.shock.is_none());
        assert!(report.sectors.is_none());
        assert_eq!(report.top_pairs.len(), 6);
        assert_eq!(report.bridges.len(), 4);
    }

    #[test]
    fn test_run_with_shock() {
        let analysis = MarketStructureAnalysis::default();
        let sectors: SectorMap = [("BBB", "Tech"), ("CCC", "Tech")].into_iter().collect();
        let request = ShockRequest::new("AAA", 5.0);
        let report = analysis.run(&universe(), &sectors, Some(&request)).unwrap();

        let sim = report.shock.unwrap();
        assert_eq!(sim.shock_symbol, "AAA");
        assert_eq!(sim.impacts.len(), 3);
        let grouped = report.sectors.unwrap();
        assert_eq!(grouped[0].sector, "Tech");
        assert_eq!(grouped[0].stock_count, 2);
    }

    #[test]
    fn test_run_with_unknown_shock_symbol() {
        let analysis = MarketStructureAnalysis::default();
        let request = ShockRequest::new("ZZZ", 5.0);
        let err = analysis
            .run(&universe(), &SectorMap::new(), Some(&request))
            .unwrap_err();
        assert_eq!(err, ShockError::UnknownSymbol("ZZZ".into()));
    }

    #[test]
    fn test_invalid_shock_config_rejected() {
        let config = AnalysisConfig {
            shock: ShockConfig {
                centrality_scale: -1.0,
                ..ShockConfig::default()
            },
            ..AnalysisConfig::default()
        };
        assert!(MarketStructureAnalysis::new(config).is_err());
    }

    #[test]
    fn test_top_n_limits_lists() {
        let config = AnalysisConfig {
            top_n: 2,
            ..AnalysisConfig::default()
        };
        let analysis = MarketStructureAnalysis::new(config).unwrap();
        let report = analysis.run(&universe(), &SectorMap::new(), None).unwrap();
        assert_eq!(report.top_pairs.len(), 2);
        assert_eq!(report.bridges.len(), 2);
    }
}
