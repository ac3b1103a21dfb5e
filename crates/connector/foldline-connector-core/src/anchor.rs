//! Anchor points and bounding-box measurement.
//!
//! Anchors are always expressed relative to the connector container's origin
//! so the resulting path can be drawn inside an SVG that overlays the
//! container.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A point the connector must pass through, in container coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<AnchorPoint> for Point {
    fn from(p: AnchorPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for AnchorPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Viewport-space bounding box as reported by the layout engine
/// (`getBoundingClientRect()` shape).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A box is measurable when all fields are finite and it has a non-zero
    /// area. Hidden elements report an all-zero box.
    pub fn is_measurable(&self) -> bool {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        finite && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Center of `self` relative to `container`'s top-left corner, or `None`
    /// when either box cannot be measured.
    pub fn anchor_in(&self, container: &BoundingBox) -> Option<AnchorPoint> {
        if !self.is_measurable() || !container.left.is_finite() || !container.top.is_finite() {
            return None;
        }
        let c = self.center();
        Some(AnchorPoint::new(c.x - container.left, c.y - container.top))
    }
}
