//! Session scripts: one JSON object per line, replayed through an
//! [`Engine`] as if a user had produced the events.
//!
//! ```text
//! {"op":"load","name":"photo.jpg","width":800,"height":600}
//! {"op":"tool","tool":"rectangle","color":"#0000ff"}
//! {"op":"down","x":10,"y":10}
//! {"op":"move","x":120,"y":80,"shift":true}
//! {"op":"up","x":120,"y":80,"shift":true}
//! {"op":"tool","tool":{"symbol":"check"}}
//! {"op":"click","x":300,"y":200}
//! {"op":"undo"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::{self, BufRead};

use annotate::config::EngineConfig;
use annotate::element::Color;
use annotate::engine::{Action, Engine};
use annotate::geom::Point;
use annotate::history::Snapshot;
use annotate::input::{Modifiers, Tool};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::svg::{BaseImage, SvgRenderer};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Pointer position plus modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub multi_pointer: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers { shift: self.shift, multi_pointer: self.multi_pointer }
    }
}

/// One scripted UI event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Load the base image. Missing fields fall back to the session defaults.
    Load { name: Option<String>, width: Option<f64>, height: Option<f64> },
    /// Select a tool. Without `color` the current color is kept.
    Tool { tool: Tool, color: Option<Color>, size: Option<f64> },
    Color { color: Color },
    FontSize { size: f64 },
    Down(PointerEvent),
    Move(PointerEvent),
    Up(PointerEvent),
    Click(PointerEvent),
    /// Answer the open free-text prompt.
    Text { text: String },
    CancelText,
    Undo,
    Redo,
    Suspend,
    Resume,
    CancelDrag,
}

/// Counters collected while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub ops: usize,
    pub added: usize,
    pub removed: usize,
    pub prompts: usize,
}

/// An engine with an SVG renderer plus replay bookkeeping.
pub struct Session {
    engine: Engine<SvgRenderer>,
    defaults: BaseImage,
    base_name: Option<String>,
    stats: Stats,
}

impl Session {
    #[must_use]
    pub fn new(config: EngineConfig, defaults: BaseImage) -> Self {
        let renderer = SvgRenderer::new(config.clone());
        Self { engine: Engine::new(renderer, config), defaults, base_name: None, stats: Stats::default() }
    }

    /// Feed one event to the engine.
    pub fn apply(&mut self, op: Op) -> Vec<Action> {
        trace!(?op, "script: op");
        self.stats.ops += 1;
        let actions = match op {
            Op::Load { name, width, height } => {
                let image = BaseImage {
                    name: name.unwrap_or_else(|| self.defaults.name.clone()),
                    width: width.unwrap_or(self.defaults.width),
                    height: height.unwrap_or(self.defaults.height),
                };
                self.base_name = Some(image.name.clone());
                let (width, height) = (image.width, image.height);
                self.engine.load_base(image, width, height)
            }
            Op::Tool { tool, color, size } => {
                let color = color.unwrap_or_else(|| self.engine.core().color());
                self.engine.set_tool(tool, color, size)
            }
            Op::Color { color } => self.engine.set_color(color),
            Op::FontSize { size } => {
                self.engine.set_font_size(size);
                Vec::new()
            }
            Op::Down(ev) => self.engine.pointer_down(ev.point(), ev.modifiers()),
            Op::Move(ev) => self.engine.pointer_move(ev.point(), ev.modifiers()),
            Op::Up(ev) => self.engine.pointer_up(ev.point(), ev.modifiers()),
            Op::Click(ev) => self.engine.click(ev.point(), ev.modifiers()),
            Op::Text { text } => self.engine.submit_text(&text),
            Op::CancelText => {
                self.engine.cancel_text();
                Vec::new()
            }
            Op::Undo => self.engine.undo(),
            Op::Redo => self.engine.redo(),
            Op::Suspend => self.engine.suspend_input(),
            Op::Resume => {
                self.engine.resume_input();
                Vec::new()
            }
            Op::CancelDrag => self.engine.cancel_drag(),
        };
        self.tally(&actions);
        actions
    }

    #[must_use]
    pub fn elements(&self) -> Snapshot {
        self.engine.current_elements()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&str> {
        self.engine.renderer().last_frame()
    }

    /// Number of frames the renderer has painted.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.engine.renderer().frames()
    }

    /// Name of the most recently loaded base image.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn tally(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::ElementAdded(_) => self.stats.added += 1,
                Action::ElementRemoved { .. } => self.stats.removed += 1,
                Action::TextEntryRequested { .. } => self.stats.prompts += 1,
                Action::RenderNeeded => {}
            }
        }
    }
}

/// Decode one script line. Blank and `#` comment lines yield `None`.
///
/// # Errors
///
/// Returns [`ScriptError::Decode`] tagged with `number` when the line is not
/// a valid op.
pub fn parse_line(line: &str, number: usize) -> Result<Option<Op>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ScriptError::Decode { line: number, source })
}

/// Replay every line of `reader` into `session`. Stops at the first bad line.
///
/// # Errors
///
/// Returns the first read or decode failure.
pub fn replay(reader: impl BufRead, session: &mut Session) -> Result<(), ScriptError> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(op) = parse_line(&line, index + 1)? {
            session.apply(op);
        }
    }
    debug!(stats = ?session.stats(), "script: replay finished");
    Ok(())
}
