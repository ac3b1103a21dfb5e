//! Foldline Site Core
//!
//! Host-agnostic logic for the page around the connector line: the landing
//! sequence, tab navigation and the AI-lab verdicts. Adapters own timers,
//! DOM writes and the classifier; this crate only decides what happens.

pub mod config;
pub mod error;
pub mod lab;
pub mod landing;
pub mod tabs;

pub use config::{CategoryRule, LandingTimings, SiteConfig};
pub use error::SiteError;
pub use lab::{evaluate, AiLab, LabPhase, ModelStatus, Prediction, Verdict, VerdictKind};
pub use landing::{build_timeline, Cue, LandingAction, LandingPlayer};
pub use tabs::{TabBar, TabEffects};
