//! Site error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteError {
    #[error("site config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid site config: {0}")]
    InvalidConfig(String),
    #[error("tab {tab} out of range (1..={count})")]
    InvalidTab { tab: usize, count: usize },
    #[error("demo step {step} out of range (1..={count})")]
    InvalidStep { step: usize, count: usize },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("no category selected")]
    NoCategory,
    #[error("classifier model is still loading")]
    ModelNotReady,
    #[error("classifier returned no predictions")]
    NoPredictions,
}
