//! Error types.
//!
//! Only configuration can fail. Missing anchors and stale geometry are
//! ordinary transient states and are modelled as `None` / forced rebuilds
//! instead of errors.

use thiserror::Error;

/// Errors produced while loading or validating a [`crate::ConnectorConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config field `{0}` must be finite")]
    NonFinite(&'static str),
    #[error("max_fraction must be positive and finite, got {0}")]
    MaxFraction(f64),
    #[error("arclen_accuracy must be positive and finite, got {0}")]
    Accuracy(f64),
    #[error("at least 2 anchor ids are required, got {0}")]
    TooFewAnchors(usize),
}
