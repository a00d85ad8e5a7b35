//! Hit-testing for the delete tool.
//!
//! Every variant answers the same question: how far is the query point from
//! this element, and is it close enough to be deleted? [`measure`] is the one
//! place that dispatches over [`Element`]; [`nearest`] scans a collection and
//! picks the closest candidate.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::ELLIPSE_HIT_TOLERANCE;
use crate::element::{Element, Ellipse, Rect, Segment, Text};
use crate::geom::{Point, distance_to_segment};

/// Distance from a query point to one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Tie-breaking distance; lower wins among candidates.
    pub distance: f64,
    /// Close enough to be deleted.
    pub candidate: bool,
}

impl Proximity {
    fn miss() -> Self {
        Self { distance: f64::INFINITY, candidate: false }
    }
}

/// Result of a hit test over a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the element in the collection.
    pub index: usize,
    pub distance: f64,
}

/// Measure `p` against one element. `threshold` is the deletion radius used
/// by text, lines and arrows.
#[must_use]
pub fn measure(p: Point, element: &Element, threshold: f64) -> Proximity {
    match element {
        Element::Text(text) => measure_text(p, text, threshold),
        Element::Rectangle(rect) => measure_rect(p, rect),
        Element::Ellipse(ellipse) => measure_ellipse(p, ellipse),
        Element::Line(seg) | Element::Arrow(seg) => measure_segment(p, seg, threshold),
    }
}

/// The candidate closest to `p`, first in collection order on ties.
#[must_use]
pub fn nearest(p: Point, elements: &[Element], threshold: f64) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (index, element) in elements.iter().enumerate() {
        let prox = measure(p, element, threshold);
        if !prox.candidate {
            continue;
        }
        if best.map_or(true, |b| prox.distance < b.distance) {
            best = Some(Hit { index, distance: prox.distance });
        }
    }
    best
}

fn measure_text(p: Point, text: &Text, threshold: f64) -> Proximity {
    let distance = p.distance(Point::new(text.x, text.y));
    Proximity { distance, candidate: distance < threshold }
}

// Interior only: a click just outside the border never deletes a rectangle.
fn measure_rect(p: Point, rect: &Rect) -> Proximity {
    let inside = p.x >= rect.x && p.x <= rect.x + rect.width && p.y >= rect.y && p.y <= rect.y + rect.height;
    if !inside {
        return Proximity::miss();
    }
    Proximity { distance: p.distance(rect.center()), candidate: true }
}

// Approximate ring distance from the normalized radial value. A zero radius
// yields an infinite or NaN value, which is never a candidate.
fn measure_ellipse(p: Point, ellipse: &Ellipse) -> Proximity {
    let nx = (p.x - ellipse.x) / ellipse.radius_x;
    let ny = (p.y - ellipse.y) / ellipse.radius_y;
    let norm = nx * nx + ny * ny;
    if norm.is_nan() {
        return Proximity::miss();
    }
    let distance = (norm - 1.0).abs() * ellipse.radius_x.max(ellipse.radius_y);
    Proximity { distance, candidate: norm <= ELLIPSE_HIT_TOLERANCE }
}

fn measure_segment(p: Point, seg: &Segment, threshold: f64) -> Proximity {
    let distance = distance_to_segment(p, seg.start, seg.end);
    Proximity { distance, candidate: distance < threshold }
}
