//! Plane geometry shared by hit-testing and drag construction.
//!
//! All coordinates are canvas-local: the origin is the top-left corner of the
//! base image and one unit is one image pixel.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::SNAP_ANGLE;

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Distance from `p` to the segment `a`–`b`, projecting onto the segment and
/// clamping to its endpoints. A degenerate segment measures to `a`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq;
    let closest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        Point::new(a.x + t * cx, a.y + t * cy)
    };
    p.distance(closest)
}

/// Rotate `end` around `start` to the nearest multiple of 45°, keeping the
/// distance between them.
#[must_use]
pub fn snap_to_angle(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let angle = dy.atan2(dx);
    let snapped = (angle / SNAP_ANGLE).round() * SNAP_ANGLE;
    let length = dx.hypot(dy);
    Point::new(start.x + snapped.cos() * length, start.y + snapped.sin() * length)
}

/// Force a drag delta to equal magnitudes: both sides become
/// `max(|dx|, |dy|)`, keeping the sign of the drag. A zero delta counts as
/// positive so a purely horizontal drag still grows downward.
#[must_use]
pub fn square_extents(dx: f64, dy: f64) -> (f64, f64) {
    let side = dx.abs().max(dy.abs());
    (side * sign_or_positive(dx), side * sign_or_positive(dy))
}

fn sign_or_positive(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
