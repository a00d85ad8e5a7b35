//! Touch pointer gate for hosts that turn touch input into engine events.
//!
//! The engine itself only sees normalized pointer events. Hosts on touch
//! screens use [`TouchGate`] to decide, per raw touch event, whether it
//! should draw, be forwarded as multi-pointer (so the engine ignores it), or
//! be left to the platform for scrolling and pinch-zoom.

#[cfg(test)]
#[path = "touch_test.rs"]
mod touch_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Whether single-finger touches draw or scroll the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Draw,
    Scroll,
}

/// What the host should do with a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Forward to the engine as a normal pointer event.
    Draw,
    /// More than one finger is down. Forward with
    /// [`crate::input::Modifiers::multi_pointer`] set, or drop.
    Suppressed,
    /// Not ours: let the platform handle it.
    Pass,
}

/// Tracks active touch pointers and the draw/scroll toggle.
#[derive(Debug, Clone, Default)]
pub struct TouchGate {
    mode: InteractionMode,
    active: HashSet<i32>,
}

impl TouchGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Number of tracked touch pointers.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.len()
    }

    /// Flip between draw and scroll. Returns the new mode; the host should
    /// also cancel any in-progress drag on the engine.
    pub fn toggle_mode(&mut self) -> InteractionMode {
        self.mode = match self.mode {
            InteractionMode::Draw => InteractionMode::Scroll,
            InteractionMode::Scroll => InteractionMode::Draw,
        };
        trace!(mode = ?self.mode, "touch: interaction mode toggled");
        self.mode
    }

    pub fn down(&mut self, pointer: i32) -> Gate {
        if self.mode == InteractionMode::Scroll {
            return Gate::Pass;
        }
        self.active.insert(pointer);
        if self.active.len() > 1 {
            trace!(pointer, active = self.active.len(), "touch: down suppressed");
            return Gate::Suppressed;
        }
        Gate::Draw
    }

    #[must_use]
    pub fn moved(&self, pointer: i32) -> Gate {
        if self.mode == InteractionMode::Scroll || !self.active.contains(&pointer) {
            return Gate::Pass;
        }
        if self.active.len() > 1 {
            return Gate::Suppressed;
        }
        Gate::Draw
    }

    /// Lifting a tracked pointer always reaches the engine, even while other
    /// fingers are down; the engine only completes a drag it started.
    pub fn up(&mut self, pointer: i32) -> Gate {
        let tracked = self.active.remove(&pointer);
        if self.mode == InteractionMode::Scroll || !tracked {
            return Gate::Pass;
        }
        Gate::Draw
    }

    /// The platform cancelled the pointer.
    pub fn cancel(&mut self, pointer: i32) {
        self.active.remove(&pointer);
    }
}
