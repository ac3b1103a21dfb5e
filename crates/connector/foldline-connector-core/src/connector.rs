//! Connector controller: lifecycle state plus the single-slot path cache.
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized --(anchors measurable)--> PathBuilt --(scroll/resize)--> Revealed(f)
//!       ^                                                                     |
//!       +------------------(anchors moved, hidden or view left)---------------+
//! ```
//!
//! A reveal is never computed against a cached path whose anchors no longer
//! match the live layout; the path is rebuilt first, and if that fails the
//! fraction is 0.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPoint;
use crate::config::ConnectorConfig;
use crate::error::ConfigError;
use crate::layout::{DashState, LayoutProvider, RenderSink, Track};
use crate::path::{PathBuilder, PathSpec};
use crate::reveal::{RevealParams, RevealState};

/// Anchor drift (layout units) below which a cached path is still current.
pub const STALE_TOLERANCE: f64 = 1e-3;

/// Lifecycle label of a [`Connector`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "fraction", rename_all = "snake_case")]
pub enum ConnectorState {
    Uninitialized,
    PathBuilt,
    Revealed(f64),
}

#[derive(Debug)]
pub struct Connector {
    cfg: ConnectorConfig,
    builder: PathBuilder,
    reveal: RevealParams,
    active: bool,
    path: Option<PathSpec>,
    state: ConnectorState,
}

impl Connector {
    pub fn new(cfg: ConnectorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            builder: PathBuilder::new(cfg.control_offset, cfg.arclen_accuracy),
            reveal: RevealParams {
                start_ratio: cfg.reveal_start_ratio,
                max_fraction: cfg.max_fraction,
            },
            cfg,
            active: false,
            path: None,
            state: ConnectorState::Uninitialized,
        })
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.cfg
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }

    /// Last built path, if still cached.
    pub fn path(&self) -> Option<&PathSpec> {
        self.path.as_ref()
    }

    /// Whether the connector's view is currently shown.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// View became visible: build from scratch and reveal.
    pub fn activate(&mut self, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> f64 {
        self.active = true;
        self.invalidate();
        self.update_reveal(layout, sink)
    }

    /// View hidden: drop cached geometry and clear the strokes.
    pub fn deactivate(&mut self, sink: &mut dyn RenderSink) {
        self.active = false;
        self.invalidate();
        sink.clear();
    }

    /// Discard the cached path. Always safe; the next reveal rebuilds.
    pub fn invalidate(&mut self) {
        self.path = None;
        self.state = ConnectorState::Uninitialized;
    }

    /// Measure anchors and rebuild the path. Returns `false` when anchors are
    /// not measurable yet.
    pub fn rebuild(&mut self, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> bool {
        let anchors = layout.measure_anchors(&self.cfg.anchor_ids);
        self.rebuild_from(&anchors, sink)
    }

    fn rebuild_from(&mut self, anchors: &[Option<AnchorPoint>], sink: &mut dyn RenderSink) -> bool {
        let Some(spec) = self.builder.build_measured(anchors) else {
            debug!(
                "connector anchors not measurable ({} of {} present); skipping draw",
                anchors.iter().filter(|a| a.is_some()).count(),
                anchors.len()
            );
            self.invalidate();
            return false;
        };

        for track in Track::ALL {
            sink.set_path(track, spec.descriptor());
        }
        // Mask starts fully hidden until the first reveal lands.
        sink.set_dash(DashState {
            total_length: spec.total_length(),
            hidden_length: spec.total_length(),
        });
        debug!(
            "connector path rebuilt: {} segments, length {:.2}",
            spec.anchors().len() - 1,
            spec.total_length()
        );
        self.path = Some(spec);
        self.state = ConnectorState::PathBuilt;
        true
    }

    /// Compute and apply the reveal for the current scroll position.
    ///
    /// Rebuilds first when no path is cached or the anchors have moved;
    /// returns 0 when a rebuild is impossible.
    pub fn update_reveal(&mut self, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> f64 {
        let anchors = layout.measure_anchors(&self.cfg.anchor_ids);
        let current = match (&self.path, all_present(&anchors)) {
            (Some(spec), Some(live)) => spec.matches(&live, STALE_TOLERANCE),
            _ => false,
        };
        if !current && !self.rebuild_from(&anchors, sink) {
            return 0.0;
        }

        let (Some(spec), Some(container)) = (&self.path, layout.container_box()) else {
            return 0.0;
        };
        let total = spec.total_length();
        let fraction = self.reveal.fraction(
            container.top,
            container.height,
            layout.viewport_height(),
            total,
        );
        let state = RevealState::new(fraction, total);
        sink.set_dash(DashState {
            total_length: total,
            hidden_length: state.hidden_length(),
        });
        trace!("connector reveal {fraction:.4} ({:.1}/{total:.1})", state.visible_length());
        self.state = ConnectorState::Revealed(fraction);
        fraction
    }
}

fn all_present(anchors: &[Option<AnchorPoint>]) -> Option<Vec<AnchorPoint>> {
    anchors.iter().copied().collect()
}
