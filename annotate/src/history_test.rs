use super::*;
use crate::element::Color;
use crate::geom::Point;

fn symbol(x: f64) -> Element {
    Element::text("✔", Point::new(x, 0.0), 24.0, Color::GREEN)
}

/// Collections of 1, 2, .., n symbols.
fn states(n: usize) -> Vec<Vec<Element>> {
    (1..=n).map(|k| (0..k).map(|i| symbol(i as f64 * 10.0)).collect()).collect()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_history_holds_single_empty_snapshot() {
    let h = History::new();
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), 0);
    assert!(h.current().is_empty());
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(!h.is_empty());
}

// =============================================================
// commit
// =============================================================

#[test]
fn commit_appends_and_advances_cursor() {
    let mut h = History::new();
    assert!(h.commit(vec![symbol(0.0)]));
    assert_eq!(h.len(), 2);
    assert_eq!(h.cursor(), 1);
    assert_eq!(&*h.current(), &[symbol(0.0)]);
}

#[test]
fn commit_identical_collection_is_deduplicated() {
    let mut h = History::new();
    assert!(h.commit(vec![symbol(0.0)]));
    assert!(!h.commit(vec![symbol(0.0)]));
    assert_eq!(h.len(), 2);
}

#[test]
fn commit_empty_into_empty_history_is_noop() {
    let mut h = History::new();
    assert!(!h.commit(Vec::new()));
    assert_eq!(h.len(), 1);
}

#[test]
fn commit_normalizes_rectangles() {
    let mut h = History::new();
    h.commit(vec![Element::rectangle(50.0, 50.0, -30.0, -20.0, Color::RED)]);
    assert_eq!(&*h.current(), &[Element::rectangle(20.0, 30.0, 30.0, 20.0, Color::RED)]);
}

#[test]
fn commit_dedup_compares_after_normalization() {
    let mut h = History::new();
    h.commit(vec![Element::rectangle(20.0, 30.0, 30.0, 20.0, Color::RED)]);
    assert!(!h.commit(vec![Element::rectangle(50.0, 50.0, -30.0, -20.0, Color::RED)]));
}

#[test]
fn commit_after_undo_prunes_redo_branch() {
    let mut h = History::new();
    for state in states(3) {
        h.commit(state);
    }
    h.undo();
    h.undo();
    assert!(h.can_redo());

    h.commit(vec![symbol(999.0)]);
    assert!(!h.can_redo());
    assert_eq!(h.len(), 3);
    let before = h.current();
    assert_eq!(h.redo(), before);
}

// =============================================================
// undo / redo
// =============================================================

#[test]
fn undo_at_start_returns_current_unchanged() {
    let mut h = History::new();
    let snap = h.undo();
    assert!(snap.is_empty());
    assert_eq!(h.cursor(), 0);
}

#[test]
fn redo_at_end_returns_current_unchanged() {
    let mut h = History::new();
    h.commit(vec![symbol(0.0)]);
    let snap = h.redo();
    assert_eq!(&*snap, &[symbol(0.0)]);
    assert_eq!(h.cursor(), 1);
}

#[test]
fn undo_all_then_redo_all_round_trips() {
    let all = states(5);
    let mut h = History::new();
    for state in all.clone() {
        h.commit(state);
    }

    for _ in 0..all.len() {
        h.undo();
    }
    assert!(h.current().is_empty());

    for _ in 0..all.len() {
        h.redo();
    }
    assert_eq!(&*h.current(), all.last().unwrap().as_slice());
}

#[test]
fn each_undo_step_restores_previous_state() {
    let all = states(3);
    let mut h = History::new();
    for state in all.clone() {
        h.commit(state);
    }
    assert_eq!(&*h.undo(), all[1].as_slice());
    assert_eq!(&*h.undo(), all[0].as_slice());
    assert!(h.undo().is_empty());
}

#[test]
fn undo_then_redo_is_identity() {
    let mut h = History::new();
    for state in states(2) {
        h.commit(state);
    }
    let before = h.current();
    h.undo();
    assert_eq!(h.redo(), before);
}

#[test]
fn redo_then_undo_is_identity() {
    let mut h = History::new();
    for state in states(2) {
        h.commit(state);
    }
    h.undo();
    let before = h.current();
    h.redo();
    assert_eq!(h.undo(), before);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_collapses_to_single_snapshot() {
    let mut h = History::new();
    for state in states(4) {
        h.commit(state);
    }
    h.reset(Vec::new());
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), 0);
    assert!(h.current().is_empty());
    assert!(!h.can_redo());
}

#[test]
fn reset_with_initial_collection_keeps_it() {
    let mut h = History::new();
    h.reset(vec![symbol(1.0)]);
    assert_eq!(&*h.current(), &[symbol(1.0)]);
    assert!(!h.can_undo());
}
