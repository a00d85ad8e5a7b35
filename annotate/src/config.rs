//! Palette and tuning values supplied when an engine is constructed.
//!
//! Everything here has a sensible default. Hosts that want to tune the
//! editor without recompiling can layer `ANNOTATE_*` environment variables
//! on top with [`EngineConfig::from_env`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FONT_SIZE, DELETION_THRESHOLD, MIN_DRAG_EXTENT, STROKE_WIDTH, SYMBOL_BASELINE_OFFSET};
use crate::element::{Color, ColorError};
use crate::input::SymbolKind;

pub const DEFAULT_CHECK_GLYPH: &str = "✔";
pub const DEFAULT_CROSS_GLYPH: &str = "✘";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_UNIT: &str = "px";

/// Errors produced while reading configuration overrides.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Color {
        var: &'static str,
        #[source]
        source: ColorError,
    },
    #[error("{var}: `{value}` is not a number")]
    NotANumber { var: &'static str, value: String },
    #[error("{var}: must be positive, got {value}")]
    NotPositive { var: &'static str, value: f64 },
    #[error("{var}: must not be empty")]
    Empty { var: &'static str },
}

/// Palette, text and tuning values for one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Colors offered by the host's palette, in display order.
    pub palette: Vec<Color>,
    /// Color bound to a tool when the host does not pick one.
    pub default_color: Color,
    pub check_glyph: String,
    pub cross_glyph: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_unit: String,
    /// Distance under which text, lines and arrows are delete candidates.
    pub deletion_threshold: f64,
    /// Drag extent a shape must exceed to be kept.
    pub min_drag_extent: f64,
    /// Added to y when a symbol is stamped.
    pub symbol_baseline_offset: f64,
    pub stroke_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: vec![Color::RED, Color::GREEN, Color::BLUE, Color::BLACK, Color::WHITE],
            default_color: Color::RED,
            check_glyph: DEFAULT_CHECK_GLYPH.to_string(),
            cross_glyph: DEFAULT_CROSS_GLYPH.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_unit: DEFAULT_FONT_UNIT.to_string(),
            deletion_threshold: DELETION_THRESHOLD,
            min_drag_extent: MIN_DRAG_EXTENT,
            symbol_baseline_offset: SYMBOL_BASELINE_OFFSET,
            stroke_width: STROKE_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Optional:
    /// - `ANNOTATE_PALETTE`: comma-separated hex colors
    /// - `ANNOTATE_DEFAULT_COLOR`: hex color
    /// - `ANNOTATE_CHECK_GLYPH` / `ANNOTATE_CROSS_GLYPH`
    /// - `ANNOTATE_FONT_SIZE`, `ANNOTATE_FONT_FAMILY`, `ANNOTATE_FONT_UNIT`
    /// - `ANNOTATE_DELETION_THRESHOLD`, `ANNOTATE_MIN_DRAG_EXTENT`
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found among the set variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but reads variables through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found among the values `lookup`
    /// yields.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("ANNOTATE_PALETTE") {
            cfg.palette = parse_palette("ANNOTATE_PALETTE", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_DEFAULT_COLOR") {
            cfg.default_color = parse_color("ANNOTATE_DEFAULT_COLOR", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_CHECK_GLYPH") {
            cfg.check_glyph = parse_text("ANNOTATE_CHECK_GLYPH", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_CROSS_GLYPH") {
            cfg.cross_glyph = parse_text("ANNOTATE_CROSS_GLYPH", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_FONT_SIZE") {
            cfg.font_size = parse_positive("ANNOTATE_FONT_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_FONT_FAMILY") {
            cfg.font_family = parse_text("ANNOTATE_FONT_FAMILY", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_FONT_UNIT") {
            cfg.font_unit = parse_text("ANNOTATE_FONT_UNIT", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_DELETION_THRESHOLD") {
            cfg.deletion_threshold = parse_positive("ANNOTATE_DELETION_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("ANNOTATE_MIN_DRAG_EXTENT") {
            cfg.min_drag_extent = parse_positive("ANNOTATE_MIN_DRAG_EXTENT", &raw)?;
        }

        Ok(cfg)
    }

    /// Glyph stamped by a symbol tool.
    #[must_use]
    pub fn glyph(&self, symbol: SymbolKind) -> &str {
        match symbol {
            SymbolKind::Check => &self.check_glyph,
            SymbolKind::Cross => &self.cross_glyph,
        }
    }

    /// CSS-style font shorthand, e.g. `24px Arial`.
    #[must_use]
    pub fn font(&self, size: f64) -> String {
        format!("{size}{} {}", self.font_unit, self.font_family)
    }
}

fn parse_color(var: &'static str, raw: &str) -> Result<Color, ConfigError> {
    Color::from_hex(raw).map_err(|source| ConfigError::Color { var, source })
}

fn parse_palette(var: &'static str, raw: &str) -> Result<Vec<Color>, ConfigError> {
    let palette = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_color(var, part))
        .collect::<Result<Vec<_>, _>>()?;
    if palette.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(palette)
}

fn parse_positive(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber { var, value: raw.to_string() })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NotPositive { var, value });
    }
    Ok(value)
}

fn parse_text(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_string())
}
