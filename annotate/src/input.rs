//! Input model: tools, modifier keys, and the interaction mode state machine.
//!
//! `Tool` is what the palette asks for; `Mode` is what the engine is doing
//! with it. Each `Mode` variant carries exactly the context its tool needs
//! (color, glyph, pending anchor), so combinations like "drawing a rectangle
//! while deleting" cannot be represented.
//!
//! Shape construction from a drag (`ShapeKind::build`) lives here too: the
//! same function produces the live preview and the committed element, so the
//! two never disagree.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::element::{Color, Element};
use crate::geom::{Point, snap_to_angle, square_extents};

/// Which glyph a symbol tool stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Check mark.
    Check,
    /// Cross mark.
    #[serde(rename = "x")]
    Cross,
}

/// Shapes drawn by dragging from an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
}

/// A palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Nothing selected.
    #[default]
    None,
    /// Stamp a check or cross glyph on click.
    Symbol(SymbolKind),
    /// Prompt for text at the clicked point.
    FreeText,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    /// Remove the element nearest the click. Selecting it again deselects.
    Delete,
}

impl Tool {
    /// The shape this tool drags out, if it is a drag tool.
    #[must_use]
    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Line => Some(ShapeKind::Line),
            Self::Arrow => Some(ShapeKind::Arrow),
            Self::None | Self::Symbol(_) | Self::FreeText | Self::Delete => None,
        }
    }
}

/// Modifier state attached to a pointer event by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift is held: constrain the shape being dragged.
    pub shift: bool,
    /// More than one touch pointer is down. The host forwards the event
    /// tagged so the engine can ignore it; such events never draw.
    pub multi_pointer: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// What a tool selection does to the current mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolChoice {
    pub tool: Tool,
    pub color: Color,
    pub size: f64,
    /// Text stamped by a symbol tool.
    pub glyph: String,
}

/// The interaction mode state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    /// No tool active. Initial state.
    #[default]
    Idle,
    /// Each click stamps `glyph`, centered on the click point.
    PlacingSymbol { symbol: SymbolKind, glyph: String, color: Color, size: f64 },
    /// A click records `pending` and asks the host for text.
    PlacingFreeText { color: Color, size: f64, pending: Option<Point> },
    /// Drag tool selected; `anchor` is set between pointer-down and pointer-up.
    DraggingShape { kind: ShapeKind, anchor: Option<Point>, color: Color },
    /// Clicks delete the nearest element.
    Deleting,
}

impl Mode {
    /// Transition for a palette selection. Any pending anchor or text prompt
    /// is dropped. Choosing delete while already deleting returns to `Idle`.
    #[must_use]
    pub fn select(&self, choice: ToolChoice) -> Mode {
        match choice.tool {
            Tool::None => Mode::Idle,
            Tool::Delete if matches!(self, Mode::Deleting) => Mode::Idle,
            Tool::Delete => Mode::Deleting,
            Tool::Symbol(symbol) => {
                Mode::PlacingSymbol { symbol, glyph: choice.glyph, color: choice.color, size: choice.size }
            }
            Tool::FreeText => Mode::PlacingFreeText { color: choice.color, size: choice.size, pending: None },
            shape_tool => shape_tool
                .shape()
                .map_or(Mode::Idle, |kind| Mode::DraggingShape { kind, anchor: None, color: choice.color }),
        }
    }

    /// The palette tool this mode corresponds to.
    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Mode::Idle => Tool::None,
            Mode::PlacingSymbol { symbol, .. } => Tool::Symbol(*symbol),
            Mode::PlacingFreeText { .. } => Tool::FreeText,
            Mode::DraggingShape { kind, .. } => match kind {
                ShapeKind::Rectangle => Tool::Rectangle,
                ShapeKind::Ellipse => Tool::Ellipse,
                ShapeKind::Line => Tool::Line,
                ShapeKind::Arrow => Tool::Arrow,
            },
            Mode::Deleting => Tool::Delete,
        }
    }

    /// Drag anchor, if a drag is in progress.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Mode::DraggingShape { anchor, .. } => *anchor,
            _ => None,
        }
    }

    /// Point awaiting free text from the host, if a prompt is open.
    #[must_use]
    pub fn pending_text(&self) -> Option<Point> {
        match self {
            Mode::PlacingFreeText { pending, .. } => *pending,
            _ => None,
        }
    }

    /// Drop any in-progress drag or open text prompt, keeping the tool.
    /// Returns `true` if something was dropped.
    pub fn clear_transient(&mut self) -> bool {
        match self {
            Mode::DraggingShape { anchor, .. } => anchor.take().is_some(),
            Mode::PlacingFreeText { pending, .. } => pending.take().is_some(),
            _ => false,
        }
    }

    /// Replace the color bound to the active tool. Clears any drag anchor.
    pub fn retint(&mut self, new_color: Color) {
        match self {
            Mode::PlacingSymbol { color, .. } | Mode::PlacingFreeText { color, .. } => *color = new_color,
            Mode::DraggingShape { color, anchor, .. } => {
                *color = new_color;
                *anchor = None;
            }
            Mode::Idle | Mode::Deleting => {}
        }
    }

    /// Replace the font size bound to a text tool.
    pub fn resize_text(&mut self, new_size: f64) {
        match self {
            Mode::PlacingSymbol { size, .. } | Mode::PlacingFreeText { size, .. } => *size = new_size,
            Mode::Idle | Mode::DraggingShape { .. } | Mode::Deleting => {}
        }
    }
}

impl ShapeKind {
    /// Build the shape for a drag from `anchor` to `end`.
    ///
    /// With `constrain` set, rectangles become squares, ellipses become
    /// circles, and lines/arrows snap to the nearest 45°. Rectangles keep the
    /// drag's signed extents; they are normalized when committed.
    #[must_use]
    pub fn build(self, anchor: Point, end: Point, constrain: bool, color: Color) -> Element {
        let dx = end.x - anchor.x;
        let dy = end.y - anchor.y;
        match self {
            ShapeKind::Rectangle => {
                let (width, height) = if constrain { square_extents(dx, dy) } else { (dx, dy) };
                Element::rectangle(anchor.x, anchor.y, width, height, color)
            }
            ShapeKind::Ellipse => {
                let center = Point::new(anchor.x + dx / 2.0, anchor.y + dy / 2.0);
                let (mut rx, mut ry) = (dx.abs() / 2.0, dy.abs() / 2.0);
                if constrain {
                    rx = rx.max(ry);
                    ry = rx;
                }
                Element::ellipse(center, rx, ry, color)
            }
            ShapeKind::Line | ShapeKind::Arrow => {
                let end = if constrain { snap_to_angle(anchor, end) } else { end };
                if self == ShapeKind::Line {
                    Element::line(anchor, end, color)
                } else {
                    Element::arrow(anchor, end, color)
                }
            }
        }
    }
}

/// Whether a dragged shape is big enough to keep. Rectangles need both
/// extents and ellipses both radii above `min`; lines and arrows need
/// movement above `min` on either axis.
#[must_use]
pub fn clears_minimum(element: &Element, min: f64) -> bool {
    match element {
        Element::Rectangle(r) => r.width.abs() > min && r.height.abs() > min,
        Element::Ellipse(e) => e.radius_x > min && e.radius_y > min,
        Element::Line(s) | Element::Arrow(s) => (s.end.x - s.start.x).abs() > min || (s.end.y - s.start.y).abs() > min,
        Element::Text(_) => true,
    }
}
