//! Rendering seams: how the engine hands frames to the host, and the single
//! place elements are turned into paint calls.
//!
//! Two traits split the host's side:
//!
//! - [`Renderer`] receives whole frames (`base`, committed elements, optional
//!   preview) from [`crate::engine::Engine`] after every change. It also
//!   measures text, since only the host knows its fonts.
//! - [`Painter`] is the primitive surface (stroke a rectangle, fill text, ...).
//!   A renderer that has one can delegate the per-element work to
//!   [`draw_scene`], which is the only element dispatch on the paint path.
//!
//! Nothing here mutates engine state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::EngineConfig;
use crate::consts::{APPROX_ADVANCE_RATIO, ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH};
use crate::element::{Color, Element, Text};
use crate::geom::Point;

/// Text measurement supplied by the host.
pub trait TextMetrics {
    /// Advance width of `text` at `size` in surface units. `font` is the
    /// full shorthand the text will be painted with, e.g. `24px Arial`.
    fn text_width(&self, text: &str, size: f64, font: &str) -> f64;
}

/// Fixed per-character advance. Used when the host has no font metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl TextMetrics for ApproxMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, size: f64, _font: &str) -> f64 {
        text.chars().count() as f64 * size * APPROX_ADVANCE_RATIO
    }
}

/// Frame sink driven by [`crate::engine::Engine`].
///
/// `render` is a full redraw: the base image, then `elements` in insertion
/// order, then `preview` on top.
pub trait Renderer: TextMetrics {
    /// Decoded base image handle. Opaque to the engine.
    type Image;

    fn render(&mut self, base: &Self::Image, elements: &[Element], preview: Option<&Element>);
}

/// Outline style for stroked shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Primitive drawing surface.
pub trait Painter {
    type Error;

    /// Outline an axis-aligned rectangle. `width` and `height` are never
    /// negative.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: Stroke) -> Result<(), Self::Error>;

    fn stroke_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64, stroke: Stroke) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error>;

    /// Fill `text` with its baseline-left corner at (`text.x`, `text.y`).
    /// `font` is CSS shorthand, e.g. `24px Arial`.
    fn fill_text(&mut self, text: &Text, font: &str) -> Result<(), Self::Error>;
}

/// Paint committed elements in order, then the preview.
///
/// # Errors
///
/// Stops at and returns the first painter error.
pub fn draw_scene<P: Painter>(
    painter: &mut P,
    elements: &[Element],
    preview: Option<&Element>,
    config: &EngineConfig,
) -> Result<(), P::Error> {
    for element in elements {
        draw_element(painter, element, config)?;
    }
    if let Some(preview) = preview {
        // Drag previews can carry negative rectangle extents.
        draw_element(painter, &preview.clone().normalize(), config)?;
    }
    Ok(())
}

/// Paint one element.
///
/// # Errors
///
/// Returns the painter's error.
pub fn draw_element<P: Painter>(painter: &mut P, element: &Element, config: &EngineConfig) -> Result<(), P::Error> {
    let stroke = Stroke { color: element.color(), width: config.stroke_width };
    match element {
        Element::Text(text) => painter.fill_text(text, &config.font(text.size)),
        Element::Rectangle(r) => painter.stroke_rect(r.x, r.y, r.width, r.height, stroke),
        Element::Ellipse(e) => painter.stroke_ellipse(e.center(), e.radius_x, e.radius_y, stroke),
        Element::Line(s) => painter.stroke_line(s.start, s.end, stroke),
        Element::Arrow(s) => {
            painter.stroke_line(s.start, s.end, stroke)?;
            for barb in arrowhead(s.start, s.end) {
                painter.stroke_line(s.end, barb, stroke)?;
            }
            Ok(())
        }
    }
}

/// Free ends of the two arrowhead barbs at `end`, for a shaft drawn from
/// `start`.
#[must_use]
pub fn arrowhead(start: Point, end: Point) -> [Point; 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE].map(|offset| {
        Point::new(
            end.x - ARROW_HEAD_LENGTH * (angle + offset).cos(),
            end.y - ARROW_HEAD_LENGTH * (angle + offset).sin(),
        )
    })
}

/// Download name for an exported image: `photo.jpg` becomes
/// `photo_edited.jpg`. Names without an extension get `.png`.
#[must_use]
pub fn export_file_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => format!("{stem}_edited.{ext}"),
        Some((stem, _)) => format!("{stem}_edited.png"),
        None => format!("{original}_edited.png"),
    }
}
