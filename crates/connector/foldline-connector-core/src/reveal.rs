//! Scroll-driven reveal math.
//!
//! The reveal starts when the top of the container crosses
//! `viewport_height * start_ratio` and completes after the container has
//! scrolled its full height past that line:
//!
//! ```text
//! start    = viewport_height * 0.8
//! scrolled = start - container_top
//! fraction = clamp(scrolled / container_height, 0, 1.05)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_FRACTION, DEFAULT_REVEAL_START_RATIO};

/// Reveal parameters; see [`crate::ConnectorConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealParams {
    pub start_ratio: f64,
    pub max_fraction: f64,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            start_ratio: DEFAULT_REVEAL_START_RATIO,
            max_fraction: DEFAULT_MAX_FRACTION,
        }
    }
}

impl RevealParams {
    /// Fraction of the connector to draw. Always within `[0, max_fraction]`.
    ///
    /// Degenerate inputs (non-positive height, non-finite values, no path
    /// length yet) yield `0`.
    pub fn fraction(
        &self,
        container_top: f64,
        container_height: f64,
        viewport_height: f64,
        total_length: f64,
    ) -> f64 {
        if !(total_length.is_finite() && total_length > 0.0) {
            return 0.0;
        }
        if !(container_height.is_finite() && container_height > 0.0) {
            return 0.0;
        }
        let start = viewport_height * self.start_ratio;
        let scrolled = start - container_top;
        let fraction = scrolled / container_height;
        if fraction.is_nan() {
            return 0.0;
        }
        fraction.clamp(0.0, self.max_fraction)
    }
}

/// Reveal fraction with the default parameters (start at 80% of the
/// viewport, clamp to 1.05).
pub fn compute_reveal(
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
    total_length: f64,
) -> f64 {
    RevealParams::default().fraction(container_top, container_height, viewport_height, total_length)
}

/// Derived stroke state for one reveal computation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealState {
    pub fraction: f64,
    pub total_length: f64,
}

impl RevealState {
    pub fn new(fraction: f64, total_length: f64) -> Self {
        Self {
            fraction,
            total_length,
        }
    }

    /// Length of the drawn part. May exceed `total_length` by the clamp
    /// allowance, which the mask treats as fully drawn.
    #[inline]
    pub fn visible_length(&self) -> f64 {
        self.total_length * self.fraction
    }

    /// Dash offset for the mask track.
    #[inline]
    pub fn hidden_length(&self) -> f64 {
        self.total_length - self.visible_length()
    }
}
