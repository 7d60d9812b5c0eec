//! # Connection geometry
//!
//! A connection is rendered as a cubic Bézier between two port anchors.
//! The tangent rule is deliberately asymmetric: the start control point is
//! displaced horizontally so the curve leaves the source port with a
//! horizontal tangent, while the end control point is pulled back along the
//! straight-line direction so the arrowhead points along the approach
//! rather than always vertically. The same rule produces the transient
//! preview curve while a connection is being drawn.
//!
//! Every wire also carries a wide invisible hit corridor along the curve,
//! independent of the visible stroke width, so thin connections stay easy
//! to select.

use graph::{Connection, GraphModel};
use node::PortSide;
use smallvec::SmallVec;
use wireflow_core::CanvasPoint;

/// Fraction of the straight-line distance used as curvature magnitude.
pub const CURVATURE_FACTOR: f32 = 0.4;
/// Cap on the curvature magnitude.
pub const CURVATURE_MAX: f32 = 80.0;
/// Cap on how far the end control point is pulled back along the approach.
pub const END_TANGENT_MAX: f32 = 40.0;
/// Width of the invisible hit corridor, in canvas units.
pub const HIT_CORRIDOR_WIDTH: f32 = 12.0;

/// Number of segments used when flattening a wire for hit testing.
const FLATTEN_SEGMENTS: usize = 24;

/// A cubic Bézier from an output-port anchor to an input-port anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WirePath {
    pub from: CanvasPoint,
    pub c1: CanvasPoint,
    pub c2: CanvasPoint,
    pub to: CanvasPoint,
}

impl WirePath {
    /// Build the curve between two anchors.
    pub fn between(from: CanvasPoint, to: CanvasPoint) -> Self {
        let distance = from.distance(to);
        let curvature = (distance * CURVATURE_FACTOR).min(CURVATURE_MAX);

        let c1 = CanvasPoint::new(from.x() + curvature, from.y());

        // Pull the end control point back along the approach direction; a
        // zero-length connection keeps its control point on the anchor.
        let c2 = if distance > f32::EPSILON {
            let direction = (to - from) / distance;
            to - direction * curvature.min(END_TANGENT_MAX)
        } else {
            to
        };

        Self { from, c1, c2, to }
    }

    /// Curve for a committed connection, if both endpoints still resolve.
    pub fn for_connection(model: &GraphModel, connection: &Connection) -> Option<Self> {
        let from = model
            .node(connection.source)?
            .port_anchor(PortSide::Output, &connection.source_port)?;
        let to = model
            .node(connection.target)?
            .port_anchor(PortSide::Input, &connection.target_port)?;
        Some(Self::between(from, to))
    }

    /// Curvature magnitude of this wire
    pub fn curvature(&self) -> f32 {
        self.c1.x() - self.from.x()
    }

    /// Evaluate the cubic at `t` in 0..=1
    pub fn point(&self, t: f32) -> CanvasPoint {
        let u = 1.0 - t;
        let p = self.from.as_vec2() * (u * u * u)
            + self.c1.as_vec2() * (3.0 * u * u * t)
            + self.c2.as_vec2() * (3.0 * u * t * t)
            + self.to.as_vec2() * (t * t * t);
        CanvasPoint::from_vec2(p)
    }

    /// Flatten the curve into a polyline for hit testing
    pub fn flatten(&self) -> SmallVec<[CanvasPoint; FLATTEN_SEGMENTS + 1]> {
        (0..=FLATTEN_SEGMENTS)
            .map(|i| self.point(i as f32 / FLATTEN_SEGMENTS as f32))
            .collect()
    }

    /// Whether a canvas point falls inside the hit corridor.
    pub fn hits(&self, point: CanvasPoint) -> bool {
        let half_width = HIT_CORRIDOR_WIDTH / 2.0;
        let polyline = self.flatten();
        polyline
            .windows(2)
            .any(|segment| distance_to_segment(point, segment[0], segment[1]) <= half_width)
    }
}

/// Distance from a point to a line segment
fn distance_to_segment(point: CanvasPoint, a: CanvasPoint, b: CanvasPoint) -> f32 {
    let ab = b.as_vec2() - a.as_vec2();
    let ap = point.as_vec2() - a.as_vec2();
    let length_squared = ab.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(a);
    }
    let t = (ap.dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(CanvasPoint::from_vec2(a.as_vec2() + ab * t))
}
