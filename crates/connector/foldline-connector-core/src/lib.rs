//! Foldline Connector Core (engine-agnostic)
//!
//! Geometry and reveal math for the scroll-synchronized connector line that
//! links the demo mockups. The crate is split into:
//! - [`path`]: anchors → chained cubic S-curves with exact arc length,
//! - [`reveal`]: scroll position → clamped reveal fraction,
//! - [`connector`]: a small controller owning the single-slot path cache,
//! - [`layout`] / [`signal`]: the contracts adapters (wasm, tests) plug into.

pub mod anchor;
pub mod config;
pub mod connector;
pub mod error;
pub mod layout;
pub mod path;
pub mod reveal;
pub mod signal;

// Re-exports for consumers (adapters)
pub use anchor::{AnchorPoint, BoundingBox};
pub use config::ConnectorConfig;
pub use connector::{Connector, ConnectorState};
pub use error::ConfigError;
pub use layout::{DashState, LayoutProvider, LayoutSnapshot, RenderSink, RenderUpdate, Track};
pub use path::{PathBuilder, PathSpec};
pub use reveal::{compute_reveal, RevealParams, RevealState};
pub use signal::{Dispatcher, Signal, SignalQueue};
