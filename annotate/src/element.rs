//! Element model: the annotations drawn over the base image.
//!
//! An [`Element`] is one committed annotation. Elements are plain values:
//! equality is structural over every field, and a committed element is never
//! edited in place (removing and re-adding is the only way to change one).
//! That is what lets [`crate::history::History`] keep whole-collection
//! snapshots and compare them by value.
//!
//! Geometry validity (non-negative rectangle extents, minimum drag size) is
//! not checked here. Drag previews legitimately carry negative extents; the
//! history normalizes at commit time via [`Element::normalize`].

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string did not start with `#`.
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    /// The string had a length other than `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("color `{0}` must be #rgb, #rrggbb or #rrggbbaa")]
    BadLength(String),
    /// A digit was not hexadecimal.
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// An sRGB color with straight alpha.
///
/// Serialized as a CSS hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorError`] describing the first problem found.
    pub fn from_hex(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorError::MissingHash(raw.to_string()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(raw.to_string()));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::BadDigit(raw.to_string()));
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..=i], 16)
                        .map(|n| n * 0x11)
                        .map_err(|_| ColorError::BadDigit(raw.to_string()))
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => Err(ColorError::BadLength(raw.to_string())),
        }
    }

    /// Lowercase CSS hex form; alpha is only written when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// A run of text anchored at its baseline-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    /// Font size in the configured font unit.
    pub size: f64,
}

/// Axis-aligned rectangle outline. `x`/`y` is the top-left corner once
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Rect {
    /// Equivalent rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 { (self.x + self.width, -self.width) } else { (self.x, self.width) };
        let (y, height) = if self.height < 0.0 { (self.y + self.height, -self.height) } else { (self.y, self.height) };
        Self { x, y, width, height, color: self.color }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis-aligned ellipse outline around a center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub color: Color,
}

impl Ellipse {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A straight segment. Used undirected by lines and directed (start to end)
/// by arrows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Color,
}

/// One annotation on the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(Text),
    Rectangle(Rect),
    Ellipse(Ellipse),
    Line(Segment),
    Arrow(Segment),
}

impl Element {
    #[must_use]
    pub fn text(text: impl Into<String>, at: Point, size: f64, color: Color) -> Self {
        Self::Text(Text { text: text.into(), color, x: at.x, y: at.y, size })
    }

    #[must_use]
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self::Rectangle(Rect { x, y, width, height, color })
    }

    #[must_use]
    pub fn ellipse(center: Point, radius_x: f64, radius_y: f64, color: Color) -> Self {
        Self::Ellipse(Ellipse { x: center.x, y: center.y, radius_x, radius_y, color })
    }

    #[must_use]
    pub fn line(start: Point, end: Point, color: Color) -> Self {
        Self::Line(Segment { start, end, color })
    }

    #[must_use]
    pub fn arrow(start: Point, end: Point, color: Color) -> Self {
        Self::Arrow(Segment { start, end, color })
    }

    /// Resolve sign conventions so the element can be committed. Rectangles
    /// with negative extents are flipped into an equivalent rectangle with a
    /// top-left origin; every other variant is returned unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Rectangle(rect) => Self::Rectangle(rect.normalized()),
            other => other,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Text(t) => t.color,
            Self::Rectangle(r) => r.color,
            Self::Ellipse(e) => e.color,
            Self::Line(s) | Self::Arrow(s) => s.color,
        }
    }

    /// Lowercase variant name, matching the serialized `type` tag.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Rectangle(_) => "rectangle",
            Self::Ellipse(_) => "ellipse",
            Self::Line(_) => "line",
            Self::Arrow(_) => "arrow",
        }
    }
}
