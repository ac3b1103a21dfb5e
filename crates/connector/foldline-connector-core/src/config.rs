//! Connector configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default vertical offset applied to Bézier control points.
pub const DEFAULT_CONTROL_OFFSET: f64 = 200.0;
/// Viewport fraction at which the reveal begins.
pub const DEFAULT_REVEAL_START_RATIO: f64 = 0.8;
/// Upper clamp of the reveal fraction. Deliberately above 1.0 so the fully
/// drawn state holds a little past the end of the container.
pub const DEFAULT_MAX_FRACTION: f64 = 1.05;
/// Arc length accuracy (in layout units) used when measuring paths.
pub const DEFAULT_ARCLEN_ACCURACY: f64 = 1e-3;

/// Tunables for path construction and reveal math.
///
/// Every field has a default, so partial JSON objects deserialize fine:
/// `{ "control_offset": 120 }` keeps the remaining defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Vertical control-point offset `K` for each S-curve segment.
    pub control_offset: f64,
    /// `start = viewport_height * reveal_start_ratio`.
    pub reveal_start_ratio: f64,
    /// Clamp ceiling for the reveal fraction.
    pub max_fraction: f64,
    /// Accuracy passed to the arc length solver.
    pub arclen_accuracy: f64,
    /// Anchor element ids, in path order.
    pub anchor_ids: Vec<String>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            control_offset: DEFAULT_CONTROL_OFFSET,
            reveal_start_ratio: DEFAULT_REVEAL_START_RATIO,
            max_fraction: DEFAULT_MAX_FRACTION,
            arclen_accuracy: DEFAULT_ARCLEN_ACCURACY,
            anchor_ids: vec![
                "mockup-1".to_string(),
                "mockup-2".to_string(),
                "mockup-3".to_string(),
            ],
        }
    }
}

impl ConnectorConfig {
    /// Parse a JSON config object and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ConnectorConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges. Defaults always validate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.control_offset.is_finite() {
            return Err(ConfigError::NonFinite("control_offset"));
        }
        if !self.reveal_start_ratio.is_finite() {
            return Err(ConfigError::NonFinite("reveal_start_ratio"));
        }
        if !self.max_fraction.is_finite() || self.max_fraction <= 0.0 {
            return Err(ConfigError::MaxFraction(self.max_fraction));
        }
        if !self.arclen_accuracy.is_finite() || self.arclen_accuracy <= 0.0 {
            return Err(ConfigError::Accuracy(self.arclen_accuracy));
        }
        if self.anchor_ids.len() < 2 {
            return Err(ConfigError::TooFewAnchors(self.anchor_ids.len()));
        }
        Ok(())
    }
}
