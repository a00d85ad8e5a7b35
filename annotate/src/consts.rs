//! Shared numeric constants for the annotate crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Distance under which a click can delete text, lines and arrows.
pub const DELETION_THRESHOLD: f64 = 100.0;

/// Normalized radial value up to which a point still hits an ellipse.
pub const ELLIPSE_HIT_TOLERANCE: f64 = 1.05;

// ── Drawing ─────────────────────────────────────────────────────

/// A drag extent must exceed this to produce a shape.
pub const MIN_DRAG_EXTENT: f64 = 5.0;

/// Angular step for shift-constrained lines and arrows (45°).
pub const SNAP_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Vertical nudge applied when a symbol glyph is placed.
pub const SYMBOL_BASELINE_OFFSET: f64 = 10.0;

/// Outline width for rectangles, ellipses, lines and arrows.
pub const STROKE_WIDTH: f64 = 2.0;

// ── Arrowheads ──────────────────────────────────────────────────

/// Length of each arrowhead barb.
pub const ARROW_HEAD_LENGTH: f64 = 18.0;

/// Angle between the shaft and each barb (π / 7).
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 7.0;

// ── Text ────────────────────────────────────────────────────────

/// Default glyph size for symbols and free text.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Average advance per character, as a fraction of the font size, used when
/// no real text metrics are available.
pub const APPROX_ADVANCE_RATIO: f64 = 0.6;
