//! Linear undo/redo history over element-collection snapshots.
//!
//! Each snapshot is an immutable, shared copy of the whole collection at a
//! commit point. Snapshots are `Arc<[Element]>`, so handing the current one
//! to a renderer or keeping it across an undo costs a reference count, not a
//! copy. There is no branching: committing after an undo prunes the redo
//! tail.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::sync::Arc;

use tracing::debug;

use crate::element::Element;

/// An immutable element collection at one point in edit history.
pub type Snapshot = Arc<[Element]>;

/// Snapshot stack with a cursor.
///
/// Invariants: `snapshots` is never empty, and `cursor < snapshots.len()`.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// A history holding only the empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { snapshots: vec![empty()], cursor: 0 }
    }

    /// Normalize and record `candidate` as the newest state.
    ///
    /// Any redo tail beyond the cursor is discarded first. If the normalized
    /// collection equals the snapshot at the cursor nothing is pushed.
    /// Returns `true` when a snapshot was appended.
    pub fn commit(&mut self, candidate: Vec<Element>) -> bool {
        let normalized: Vec<Element> = candidate.into_iter().map(Element::normalize).collect();

        if self.cursor + 1 < self.snapshots.len() {
            debug!(pruned = self.snapshots.len() - self.cursor - 1, "history: dropping redo tail");
            self.snapshots.truncate(self.cursor + 1);
        }

        if *self.snapshots[self.cursor] == *normalized {
            debug!(cursor = self.cursor, "history: commit unchanged, skipped");
            return false;
        }

        self.snapshots.push(normalized.into());
        self.cursor = self.snapshots.len() - 1;
        debug!(cursor = self.cursor, elements = self.snapshots[self.cursor].len(), "history: committed");
        true
    }

    /// Step back one snapshot. At the oldest snapshot this is a no-op.
    pub fn undo(&mut self) -> Snapshot {
        if self.can_undo() {
            self.cursor -= 1;
            debug!(cursor = self.cursor, "history: undo");
        }
        self.current()
    }

    /// Step forward one snapshot. At the newest snapshot this is a no-op.
    pub fn redo(&mut self) -> Snapshot {
        if self.can_redo() {
            self.cursor += 1;
            debug!(cursor = self.cursor, "history: redo");
        }
        self.current()
    }

    /// Replace the whole history with `initial` as its only snapshot.
    pub fn reset(&mut self, initial: Vec<Element>) {
        let initial: Vec<Element> = initial.into_iter().map(Element::normalize).collect();
        self.snapshots = vec![initial.into()];
        self.cursor = 0;
        debug!("history: reset");
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.snapshots[self.cursor])
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; present for symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

fn empty() -> Snapshot {
    Arc::from(Vec::new())
}
