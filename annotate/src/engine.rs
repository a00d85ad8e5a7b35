//! Annotation engine: routes pointer input through the mode state machine
//! into history commits.
//!
//! [`EngineCore`] holds every piece of state and no host resources, so it can
//! be driven and tested headless. Each input handler returns the
//! [`Action`]s the host should react to. [`Engine`] wraps a core together
//! with a [`Renderer`] and the decoded base image, and repaints whenever a
//! handler reports [`Action::RenderNeeded`].
//!
//! Every handler is total: events that do not apply to the current state
//! (no image loaded, outside the surface, input suspended, a text prompt
//! open, a multi-pointer touch) are dropped and return no actions.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::element::{Color, Element};
use crate::geom::Point;
use crate::history::{History, Snapshot};
use crate::hit;
use crate::input::{Mode, Modifiers, Tool, ToolChoice, clears_minimum};
use crate::render::{Renderer, TextMetrics};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An element was appended and committed.
    ElementAdded(Element),
    /// The element at `index` was removed and the removal committed.
    ElementRemoved { index: usize, element: Element },
    /// Free-text tool clicked: the host should prompt for text and answer
    /// with [`EngineCore::submit_text`] or [`EngineCore::cancel_text`].
    TextEntryRequested { at: Point },
    /// Committed elements or the preview changed.
    RenderNeeded,
}

/// Pixel extent of the loaded base image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    /// Inclusive bounds test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Core engine state. Everything except the renderer and the image handle.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: EngineConfig,
    history: History,
    mode: Mode,
    preview: Option<Element>,
    surface: Option<Surface>,
    suspended: bool,
    color: Color,
    font_size: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            color: config.default_color,
            font_size: config.font_size,
            config,
            history: History::new(),
            mode: Mode::Idle,
            preview: None,
            surface: None,
            suspended: false,
        }
    }

    // --- Base image ---

    /// Start a fresh session on a `width` x `height` image. Elements and
    /// history are cleared and the mode drops back to `Idle`; the current
    /// color and font size carry over to the next tool.
    pub fn load_base(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.surface = Some(Surface { width, height });
        self.history.reset(Vec::new());
        self.mode = Mode::Idle;
        self.preview = None;
        debug!(width, height, "engine: base image loaded");
        vec![Action::RenderNeeded]
    }

    // --- Tool / palette ---

    /// Select a tool bound to `color`. `size` replaces the current font size
    /// when given. Any drag or text prompt in progress is dropped.
    pub fn set_tool(&mut self, tool: Tool, color: Color, size: Option<f64>) -> Vec<Action> {
        self.color = color;
        if let Some(size) = size {
            self.font_size = size;
        }
        let glyph = match tool {
            Tool::Symbol(symbol) => self.config.glyph(symbol).to_string(),
            _ => String::new(),
        };
        self.mode = self.mode.select(ToolChoice { tool, color, size: self.font_size, glyph });
        debug!(requested = ?tool, active = ?self.mode.tool(), %color, "engine: tool selected");
        self.drop_preview()
    }

    /// Change the color bound to the active tool. Drops a drag in progress.
    pub fn set_color(&mut self, color: Color) -> Vec<Action> {
        self.color = color;
        self.mode.retint(color);
        debug!(%color, "engine: color changed");
        self.drop_preview()
    }

    /// Change the font size used by symbol and free-text tools.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.mode.resize_text(size);
        debug!(size, "engine: font size changed");
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        if !self.accepts(point, modifiers) {
            return Vec::new();
        }
        if let Mode::DraggingShape { anchor, .. } = &mut self.mode {
            if anchor.is_none() {
                *anchor = Some(point);
                trace!(x = point.x, y = point.y, "engine: drag anchored");
            }
        }
        Vec::new()
    }

    /// Recompute the live preview. Never touches history.
    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        if !self.accepts(point, modifiers) {
            return Vec::new();
        }
        let Mode::DraggingShape { kind, anchor: Some(anchor), color } = self.mode else {
            return Vec::new();
        };
        self.preview = Some(kind.build(anchor, point, modifiers.shift, color));
        vec![Action::RenderNeeded]
    }

    /// Finish a drag. Shapes at or under the minimum extent are discarded.
    /// Releasing outside the surface aborts the drag.
    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        if !self.accepts_input(modifiers) {
            return Vec::new();
        }
        let Mode::DraggingShape { kind, anchor: Some(anchor), color } = self.mode else {
            return Vec::new();
        };
        self.mode.clear_transient();

        if !self.inside(point) {
            trace!(x = point.x, y = point.y, "engine: drag released outside surface, aborted");
            return self.drop_preview();
        }

        let shape = kind.build(anchor, point, modifiers.shift, color);
        if !clears_minimum(&shape, self.config.min_drag_extent) {
            trace!(kind = shape.kind_name(), "engine: drag under minimum extent, discarded");
            return self.drop_preview();
        }

        self.preview = None;
        self.append(shape)
    }

    /// A click: stamp a symbol, open a text prompt, or delete the nearest
    /// element, depending on the mode.
    pub fn click(&mut self, point: Point, modifiers: Modifiers, metrics: &dyn TextMetrics) -> Vec<Action> {
        if !self.accepts(point, modifiers) {
            return Vec::new();
        }
        match &mut self.mode {
            Mode::PlacingSymbol { glyph, color, size, .. } => {
                let width = metrics.text_width(glyph, *size, &self.config.font(*size));
                let at = Point::new(point.x - width / 2.0, point.y + self.config.symbol_baseline_offset);
                let symbol = Element::text(glyph.clone(), at, *size, *color);
                self.append(symbol)
            }
            Mode::PlacingFreeText { pending, .. } => {
                *pending = Some(point);
                debug!(x = point.x, y = point.y, "engine: text entry requested");
                vec![Action::TextEntryRequested { at: point }]
            }
            Mode::Deleting => self.delete_nearest(point),
            Mode::Idle | Mode::DraggingShape { .. } => Vec::new(),
        }
    }

    // --- Free-text prompt ---

    /// Answer an open text prompt. Text that is blank after trimming is
    /// refused and the prompt stays open.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        let Mode::PlacingFreeText { color, size, pending: Some(at) } = self.mode else {
            return Vec::new();
        };
        if text.trim().is_empty() {
            trace!("engine: blank text refused");
            return Vec::new();
        }
        self.mode.clear_transient();
        self.append(Element::text(text, at, size, color))
    }

    /// Close an open text prompt without inserting anything.
    pub fn cancel_text(&mut self) {
        if self.mode.pending_text().is_some() {
            self.mode.clear_transient();
            debug!("engine: text entry cancelled");
        }
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        let before = self.history.cursor();
        self.history.undo();
        self.moved_from(before)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let before = self.history.cursor();
        self.history.redo();
        self.moved_from(before)
    }

    // --- Suspension ---

    /// Ignore pointer input (e.g. while a color picker is open). A drag in
    /// progress is cancelled; the tool is kept.
    pub fn suspend_input(&mut self) -> Vec<Action> {
        self.suspended = true;
        debug!("engine: input suspended");
        self.cancel_drag()
    }

    pub fn resume_input(&mut self) {
        self.suspended = false;
        debug!("engine: input resumed");
    }

    /// Drop the drag anchor and preview, keeping the tool.
    pub fn cancel_drag(&mut self) -> Vec<Action> {
        if matches!(self.mode, Mode::DraggingShape { .. }) {
            self.mode.clear_transient();
        }
        self.drop_preview()
    }

    // --- Queries ---

    /// The committed elements. Empty before any image is loaded.
    #[must_use]
    pub fn current_elements(&self) -> Snapshot {
        self.history.current()
    }

    /// In-progress drag shape, if any. Never part of history.
    #[must_use]
    pub fn preview(&self) -> Option<&Element> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.mode.tool()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Internals ---

    fn inside(&self, point: Point) -> bool {
        self.surface.is_some_and(|s| s.contains(point))
    }

    /// Gate shared by every pointer handler, minus the bounds test.
    fn accepts_input(&self, modifiers: Modifiers) -> bool {
        let reason = if self.surface.is_none() {
            "no base image"
        } else if self.suspended {
            "input suspended"
        } else if modifiers.multi_pointer {
            "multi-pointer"
        } else if self.mode.pending_text().is_some() {
            "text prompt open"
        } else {
            return true;
        };
        trace!(reason, "engine: pointer event ignored");
        false
    }

    fn accepts(&self, point: Point, modifiers: Modifiers) -> bool {
        self.accepts_input(modifiers) && self.inside(point)
    }

    fn append(&mut self, element: Element) -> Vec<Action> {
        let mut next = self.history.current().to_vec();
        next.push(element);
        self.history.commit(next);
        // Report the element as committed, i.e. normalized.
        match self.history.current().last() {
            Some(added) => vec![Action::ElementAdded(added.clone()), Action::RenderNeeded],
            None => vec![Action::RenderNeeded],
        }
    }

    fn delete_nearest(&mut self, point: Point) -> Vec<Action> {
        let current = self.history.current();
        let Some(hit) = hit::nearest(point, &current, self.config.deletion_threshold) else {
            trace!(x = point.x, y = point.y, "engine: delete missed");
            return Vec::new();
        };
        let mut next = current.to_vec();
        let element = next.remove(hit.index);
        debug!(index = hit.index, kind = element.kind_name(), "engine: element deleted");
        self.history.commit(next);
        vec![Action::ElementRemoved { index: hit.index, element }, Action::RenderNeeded]
    }

    fn drop_preview(&mut self) -> Vec<Action> {
        if self.preview.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    fn moved_from(&self, before: usize) -> Vec<Action> {
        if self.history.cursor() == before { Vec::new() } else { vec![Action::RenderNeeded] }
    }
}

/// An [`EngineCore`] bound to a renderer and the decoded base image.
///
/// Every handler forwards to the core and repaints through the renderer when
/// the core asks for it. Nothing is painted until a base image is loaded.
pub struct Engine<R: Renderer> {
    core: EngineCore,
    renderer: R,
    base: Option<R::Image>,
}

impl<R: Renderer> Engine<R> {
    #[must_use]
    pub fn new(renderer: R, config: EngineConfig) -> Self {
        Self { core: EngineCore::new(config), renderer, base: None }
    }

    pub fn load_base(&mut self, image: R::Image, width: f64, height: f64) -> Vec<Action> {
        self.base = Some(image);
        let actions = self.core.load_base(width, height);
        self.process(actions)
    }

    pub fn set_tool(&mut self, tool: Tool, color: Color, size: Option<f64>) -> Vec<Action> {
        let actions = self.core.set_tool(tool, color, size);
        self.process(actions)
    }

    pub fn set_color(&mut self, color: Color) -> Vec<Action> {
        let actions = self.core.set_color(color);
        self.process(actions)
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.core.set_font_size(size);
    }

    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.pointer_down(point, modifiers);
        self.process(actions)
    }

    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.pointer_move(point, modifiers);
        self.process(actions)
    }

    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.pointer_up(point, modifiers);
        self.process(actions)
    }

    /// Symbols are centered using the renderer's text metrics.
    pub fn click(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.click(point, modifiers, &self.renderer);
        self.process(actions)
    }

    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        let actions = self.core.submit_text(text);
        self.process(actions)
    }

    pub fn cancel_text(&mut self) {
        self.core.cancel_text();
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let actions = self.core.undo();
        self.process(actions)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let actions = self.core.redo();
        self.process(actions)
    }

    pub fn suspend_input(&mut self) -> Vec<Action> {
        let actions = self.core.suspend_input();
        self.process(actions)
    }

    pub fn resume_input(&mut self) {
        self.core.resume_input();
    }

    pub fn cancel_drag(&mut self) -> Vec<Action> {
        let actions = self.core.cancel_drag();
        self.process(actions)
    }

    /// Full redraw of the current state.
    pub fn render(&mut self) {
        let Some(base) = &self.base else {
            return;
        };
        let elements = self.core.current_elements();
        self.renderer.render(base, &elements, self.core.preview());
    }

    #[must_use]
    pub fn current_elements(&self) -> Snapshot {
        self.core.current_elements()
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn process(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::RenderNeeded) {
            self.render();
        }
        actions
    }
}
