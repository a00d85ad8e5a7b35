//! SVG overlay renderer for replayed sessions.
//!
//! Each repaint serializes the whole frame: an `<image>` reference to the
//! base picture followed by one SVG node per element, painted through
//! [`annotate::render::draw_scene`].

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::{self, Write as _};

use annotate::config::EngineConfig;
use annotate::element::{Element, Text};
use annotate::geom::Point;
use annotate::render::{ApproxMetrics, Painter, Renderer, Stroke, TextMetrics, draw_scene};
use tracing::{trace, warn};

/// Base picture as the replay knows it: a file name and its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseImage {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

/// Writes SVG nodes into a string buffer.
pub struct SvgPainter<'a> {
    out: &'a mut String,
}

impl<'a> SvgPainter<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }
}

impl Painter for SvgPainter<'_> {
    type Error = fmt::Error;

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: Stroke) -> fmt::Result {
        writeln!(
            self.out,
            r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            stroke.color, stroke.width
        )
    }

    fn stroke_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64, stroke: Stroke) -> fmt::Result {
        writeln!(
            self.out,
            r#"  <ellipse cx="{}" cy="{}" rx="{radius_x}" ry="{radius_y}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            center.x, center.y, stroke.color, stroke.width
        )
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) -> fmt::Result {
        writeln!(
            self.out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            from.x, from.y, to.x, to.y, stroke.color, stroke.width
        )
    }

    fn fill_text(&mut self, text: &Text, font: &str) -> fmt::Result {
        writeln!(
            self.out,
            r#"  <text x="{}" y="{}" fill="{}" style="font: {}">{}</text>"#,
            text.x,
            text.y,
            text.color,
            escape(font),
            escape(&text.text)
        )
    }
}

/// Serialize one frame as a standalone SVG document.
///
/// # Errors
///
/// Only if formatting into the buffer fails.
pub fn frame(
    base: &BaseImage,
    elements: &[Element],
    preview: Option<&Element>,
    config: &EngineConfig,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = base.width,
        h = base.height
    )?;
    writeln!(out, r#"  <image href="{}" width="{}" height="{}"/>"#, escape(&base.name), base.width, base.height)?;
    draw_scene(&mut SvgPainter::new(&mut out), elements, preview, config)?;
    out.push_str("</svg>\n");
    Ok(out)
}

/// Keeps the most recent frame as SVG text.
pub struct SvgRenderer {
    config: EngineConfig,
    metrics: ApproxMetrics,
    last: Option<String>,
    frames: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config, metrics: ApproxMetrics, last: None, frames: 0 }
    }

    /// Most recent frame, if anything has been rendered.
    #[must_use]
    pub fn last_frame(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Number of repaints so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl TextMetrics for SvgRenderer {
    fn text_width(&self, text: &str, size: f64, font: &str) -> f64 {
        self.metrics.text_width(text, size, font)
    }
}

impl Renderer for SvgRenderer {
    type Image = BaseImage;

    fn render(&mut self, base: &BaseImage, elements: &[Element], preview: Option<&Element>) {
        self.frames += 1;
        match frame(base, elements, preview, &self.config) {
            Ok(svg) => {
                trace!(frame = self.frames, elements = elements.len(), "svg: frame rendered");
                self.last = Some(svg);
            }
            Err(error) => warn!(%error, frame = self.frames, "svg: frame dropped"),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
