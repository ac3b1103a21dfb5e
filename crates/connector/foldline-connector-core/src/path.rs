//! Path construction: anchors → chained S-curve cubics + exact arc length.
//!
//! Each consecutive anchor pair `(a, b)` becomes one cubic Bézier with
//! control points `(a.x, a.y + K)` and `(b.x, b.y - K)`. Segments share
//! endpoints, so the whole connector is one continuous subpath that starts
//! with a move-to at the first anchor.

use std::fmt::Write as _;

use kurbo::{BezPath, CubicBez, ParamCurveArclen, PathEl, Point};

use crate::anchor::AnchorPoint;
use crate::config::{DEFAULT_ARCLEN_ACCURACY, DEFAULT_CONTROL_OFFSET};

/// Immutable geometry for one layout. Rebuilt wholesale whenever anchors move.
#[derive(Clone, Debug)]
pub struct PathSpec {
    anchors: Vec<AnchorPoint>,
    path: BezPath,
    descriptor: String,
    total_length: f64,
}

impl PathSpec {
    /// Anchors the path was built from, in order.
    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    /// Underlying kurbo path.
    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    /// SVG `d` attribute. The same string goes to every visual track.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// One cubic per anchor pair.
    pub fn segments(&self) -> Vec<CubicBez> {
        self.path
            .elements()
            .windows(2)
            .filter_map(|w| match (w[0], w[1]) {
                (PathEl::MoveTo(p0), PathEl::CurveTo(p1, p2, p3))
                | (PathEl::CurveTo(_, _, p0), PathEl::CurveTo(p1, p2, p3)) => {
                    Some(CubicBez::new(p0, p1, p2, p3))
                }
                _ => None,
            })
            .collect()
    }

    pub fn start(&self) -> AnchorPoint {
        self.anchors[0]
    }

    pub fn end(&self) -> AnchorPoint {
        self.anchors[self.anchors.len() - 1]
    }

    /// True when `anchors` are within `tolerance` of the anchors this path
    /// was built from, per coordinate.
    pub fn matches(&self, anchors: &[AnchorPoint], tolerance: f64) -> bool {
        self.anchors.len() == anchors.len()
            && self.anchors.iter().zip(anchors).all(|(a, b)| {
                (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
            })
    }
}

/// Builds [`PathSpec`]s for a fixed control offset and arc length accuracy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathBuilder {
    control_offset: f64,
    accuracy: f64,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_OFFSET, DEFAULT_ARCLEN_ACCURACY)
    }
}

impl PathBuilder {
    pub fn new(control_offset: f64, accuracy: f64) -> Self {
        Self {
            control_offset,
            accuracy,
        }
    }

    pub fn control_offset(&self) -> f64 {
        self.control_offset
    }

    /// Build the connector through `anchors`.
    ///
    /// Returns `None` ("nothing to draw yet") for fewer than two anchors or
    /// any non-finite coordinate. Callers retry on the next layout event.
    pub fn build(&self, anchors: &[AnchorPoint]) -> Option<PathSpec> {
        if anchors.len() < 2 || anchors.iter().any(|a| !a.is_finite()) {
            return None;
        }
        let k = self.control_offset;

        let mut path = BezPath::new();
        let mut descriptor = String::new();
        let first = anchors[0];
        path.move_to(Point::from(first));
        let _ = write!(descriptor, "M {} {}", first.x, first.y);

        for pair in anchors.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let c1 = Point::new(a.x, a.y + k);
            let c2 = Point::new(b.x, b.y - k);
            path.curve_to(c1, c2, Point::from(b));
            let _ = write!(
                descriptor,
                " C {} {}, {} {}, {} {}",
                c1.x, c1.y, c2.x, c2.y, b.x, b.y
            );
        }

        let total_length = path
            .segments()
            .map(|seg| seg.arclen(self.accuracy))
            .sum::<f64>();

        Some(PathSpec {
            anchors: anchors.to_vec(),
            path,
            descriptor,
            total_length,
        })
    }

    /// Like [`PathBuilder::build`], but for anchors that may be unmeasurable.
    pub fn build_measured(&self, anchors: &[Option<AnchorPoint>]) -> Option<PathSpec> {
        let resolved: Option<Vec<AnchorPoint>> = anchors.iter().copied().collect();
        self.build(&resolved?)
    }
}
