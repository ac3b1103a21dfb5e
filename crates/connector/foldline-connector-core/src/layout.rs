//! Layout provider and render sink contracts.
//!
//! Adapters (wasm, tests) implement these and pass them into
//! [`crate::Connector`]. The core never touches the DOM itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorPoint, BoundingBox};

/// Source of live layout measurements.
pub trait LayoutProvider {
    /// Viewport-space box of a named anchor, or `None` when it is not rendered.
    fn anchor_box(&self, id: &str) -> Option<BoundingBox>;
    /// Viewport-space box of the connector container.
    fn container_box(&self) -> Option<BoundingBox>;
    fn viewport_height(&self) -> f64;

    /// Container-relative anchor positions for `ids`, in order.
    fn measure_anchors(&self, ids: &[String]) -> Vec<Option<AnchorPoint>> {
        let Some(container) = self.container_box() else {
            return vec![None; ids.len()];
        };
        ids.iter()
            .map(|id| self.anchor_box(id).and_then(|b| b.anchor_in(&container)))
            .collect()
    }
}

/// The three parallel strokes that share one path descriptor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Background,
    Active,
    Mask,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::Background, Track::Active, Track::Mask];
}

/// Mask dash state: `stroke-dasharray = total_length`,
/// `stroke-dashoffset = hidden_length`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub total_length: f64,
    pub hidden_length: f64,
}

/// Receiver of render state.
pub trait RenderSink {
    fn set_path(&mut self, track: Track, descriptor: &str);
    fn set_dash(&mut self, dash: DashState);
    /// Called when the connector has nothing to draw.
    fn clear(&mut self) {}
}

/// Serializable layout measurements captured by the host for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    #[serde(default)]
    pub container: Option<BoundingBox>,
    #[serde(default)]
    pub viewport_height: f64,
    #[serde(default)]
    pub anchors: HashMap<String, BoundingBox>,
}

impl LayoutSnapshot {
    pub fn new(container: BoundingBox, viewport_height: f64) -> Self {
        Self {
            container: Some(container),
            viewport_height,
            anchors: HashMap::new(),
        }
    }

    pub fn with_anchor(mut self, id: impl Into<String>, bbox: BoundingBox) -> Self {
        self.anchors.insert(id.into(), bbox);
        self
    }

    /// Shift everything vertically, as scrolling the page by `dy` would.
    pub fn scrolled_by(&self, dy: f64) -> Self {
        let shift = |b: &BoundingBox| BoundingBox::new(b.left, b.top - dy, b.width, b.height);
        Self {
            container: self.container.as_ref().map(shift),
            viewport_height: self.viewport_height,
            anchors: self
                .anchors
                .iter()
                .map(|(k, b)| (k.clone(), shift(b)))
                .collect(),
        }
    }
}

impl LayoutProvider for LayoutSnapshot {
    fn anchor_box(&self, id: &str) -> Option<BoundingBox> {
        self.anchors.get(id).copied()
    }

    fn container_box(&self) -> Option<BoundingBox> {
        self.container
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

/// Render state accumulated during one signal; returned to hosts as JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderUpdate {
    /// New descriptor for all three tracks, present only when rebuilt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<DashState>,
    #[serde(default)]
    pub cleared: bool,
    #[serde(default)]
    pub fraction: f64,
}

impl RenderUpdate {
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.dash.is_none() && !self.cleared
    }
}

impl RenderSink for RenderUpdate {
    fn set_path(&mut self, _track: Track, descriptor: &str) {
        if self.path.as_deref() != Some(descriptor) {
            self.path = Some(descriptor.to_string());
        }
    }

    fn set_dash(&mut self, dash: DashState) {
        self.dash = Some(dash);
    }

    fn clear(&mut self) {
        self.path = None;
        self.dash = None;
        self.cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_without_container_is_all_none() {
        let snap = LayoutSnapshot::default().with_anchor("a", BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(snap.measure_anchors(&ids), vec![None, None]);
    }

    #[test]
    fn measure_reports_missing_ids() {
        let snap = LayoutSnapshot::new(BoundingBox::new(0.0, 100.0, 500.0, 900.0), 800.0)
            .with_anchor("a", BoundingBox::new(0.0, 100.0, 100.0, 100.0));
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            snap.measure_anchors(&ids),
            vec![Some(AnchorPoint::new(50.0, 50.0)), None]
        );
    }

    #[test]
    fn scrolling_moves_boxes_not_anchors() {
        let snap = LayoutSnapshot::new(BoundingBox::new(0.0, 100.0, 500.0, 900.0), 800.0)
            .with_anchor("a", BoundingBox::new(0.0, 300.0, 100.0, 100.0));
        let moved = snap.scrolled_by(250.0);
        assert_eq!(moved.container.unwrap().top, -150.0);
        let ids = vec!["a".to_string()];
        assert_eq!(snap.measure_anchors(&ids), moved.measure_anchors(&ids));
    }

    #[test]
    fn snapshot_parses_from_json() {
        let snap: LayoutSnapshot = serde_json::from_str(
            r#"{
                "container": { "left": 0, "top": 10, "width": 100, "height": 200 },
                "viewport_height": 900,
                "anchors": { "m1": { "left": 0, "top": 10, "width": 20, "height": 20 } }
            }"#,
        )
        .unwrap();
        assert_eq!(snap.viewport_height, 900.0);
        assert!(snap.anchor_box("m1").is_some());
    }

    #[test]
    fn render_update_serializes_sparse() {
        let upd = RenderUpdate {
            fraction: 0.5,
            ..RenderUpdate::default()
        };
        let v = serde_json::to_value(&upd).unwrap();
        assert!(v.get("path").is_none());
        assert_eq!(v["fraction"], 0.5);
    }
}
