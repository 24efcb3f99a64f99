//! Shock model constants.

use crate::error::ShockError;

/// Default divisor applied to the shocked node's betweenness.
pub const DEFAULT_CENTRALITY_SCALE: f64 = 100.0;

/// Default baseline multiplier independent of centrality.
pub const DEFAULT_CENTRALITY_OFFSET: f64 = 1.0;

/// Default impact above which an instrument counts as affected.
pub const DEFAULT_MATERIALITY_FLOOR: f64 = 0.01;

/// Calibration constants of the shock-impact heuristic.
///
/// ```text
/// impact(x) = |corr(shock, x)| · (centrality_offset + betweenness(shock) / centrality_scale) · magnitude
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ShockConfig {
    /// Divisor for the shocked node's betweenness
    pub centrality_scale: f64,
    /// Baseline multiplier
    pub centrality_offset: f64,
    /// `totalAffected` counts impacts strictly above this value
    pub materiality_floor: f64,
}

impl Default for ShockConfig {
    fn default() -> Self {
        Self {
            centrality_scale: DEFAULT_CENTRALITY_SCALE,
            centrality_offset: DEFAULT_CENTRALITY_OFFSET,
            materiality_floor: DEFAULT_MATERIALITY_FLOOR,
        }
    }
}

impl ShockConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// Returns [`ShockError::InvalidConfig`] if any constant is non-finite or
    /// `centrality_scale` is not positive.
    pub fn new(
        centrality_scale: f64,
        centrality_offset: f64,
        materiality_floor: f64,
    ) -> Result<Self, ShockError> {
        let config = Self {
            centrality_scale,
            centrality_offset,
            materiality_floor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ShockError> {
        if !self.centrality_scale.is_finite() || self.centrality_scale <= 0.0 {
            return Err(ShockError::InvalidConfig(format!(
                "centrality_scale must be positive and finite, got {}",
                self.centrality_scale
            )));
        }
        if !self.centrality_offset.is_finite() {
            return Err(ShockError::InvalidConfig(format!(
                "centrality_offset must be finite, got {}",
                self.centrality_offset
            )));
        }
        if !self.materiality_floor.is_finite() {
            return Err(ShockError::InvalidConfig(format!(
                "materiality_floor must be finite, got {}",
                self.materiality_floor
            )));
        }
        Ok(())
    }

    /// Multiplier applied to `|correlation| · magnitude` for a given source betweenness.
    #[inline]
    pub fn amplification(&self, betweenness: f64) -> f64 {
        self.centrality_offset + betweenness / self.centrality_scale
    }
}
