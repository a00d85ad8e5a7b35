#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn choice(tool: Tool) -> ToolChoice {
    ToolChoice { tool, color: Color::RED, size: 24.0, glyph: "✔".into() }
}

fn dragging_with_anchor(kind: ShapeKind) -> Mode {
    Mode::DraggingShape { kind, anchor: Some(pt(1.0, 1.0)), color: Color::RED }
}

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_none() {
    assert_eq!(Tool::default(), Tool::None);
}

#[test]
fn tool_shape_only_for_drag_tools() {
    assert_eq!(Tool::Rectangle.shape(), Some(ShapeKind::Rectangle));
    assert_eq!(Tool::Ellipse.shape(), Some(ShapeKind::Ellipse));
    assert_eq!(Tool::Line.shape(), Some(ShapeKind::Line));
    assert_eq!(Tool::Arrow.shape(), Some(ShapeKind::Arrow));
    assert_eq!(Tool::Delete.shape(), None);
    assert_eq!(Tool::FreeText.shape(), None);
    assert_eq!(Tool::Symbol(SymbolKind::Check).shape(), None);
}

#[test]
fn tool_serde_names() {
    assert_eq!(serde_json::to_value(Tool::FreeText).unwrap(), serde_json::json!("free_text"));
    assert_eq!(serde_json::to_value(Tool::Symbol(SymbolKind::Cross)).unwrap(), serde_json::json!({ "symbol": "x" }));
    let t: Tool = serde_json::from_value(serde_json::json!({ "symbol": "check" })).unwrap();
    assert_eq!(t, Tool::Symbol(SymbolKind::Check));
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.multi_pointer);
}

#[test]
fn modifiers_deserialize_missing_fields_as_false() {
    let m: Modifiers = serde_json::from_str(r#"{"shift":true}"#).unwrap();
    assert_eq!(m, Modifiers::shift());
}

// =============================================================
// Mode::select
// =============================================================

#[test]
fn mode_default_is_idle() {
    assert_eq!(Mode::default(), Mode::Idle);
}

#[test]
fn select_shape_tool_enters_dragging_without_anchor() {
    let mode = Mode::Idle.select(choice(Tool::Ellipse));
    assert_eq!(mode, Mode::DraggingShape { kind: ShapeKind::Ellipse, anchor: None, color: Color::RED });
}

#[test]
fn select_clears_pending_anchor() {
    let mode = dragging_with_anchor(ShapeKind::Rectangle).select(choice(Tool::Rectangle));
    assert_eq!(mode.anchor(), None);
}

#[test]
fn select_symbol_binds_glyph_color_and_size() {
    let mode = Mode::Deleting.select(choice(Tool::Symbol(SymbolKind::Check)));
    assert_eq!(
        mode,
        Mode::PlacingSymbol { symbol: SymbolKind::Check, glyph: "✔".into(), color: Color::RED, size: 24.0 }
    );
}

#[test]
fn select_free_text_has_no_pending_prompt() {
    let mode = Mode::Idle.select(choice(Tool::FreeText));
    assert_eq!(mode.pending_text(), None);
    assert_eq!(mode.tool(), Tool::FreeText);
}

#[test]
fn select_delete_toggles() {
    let on = Mode::Idle.select(choice(Tool::Delete));
    assert_eq!(on, Mode::Deleting);
    let off = on.select(choice(Tool::Delete));
    assert_eq!(off, Mode::Idle);
}

#[test]
fn select_delete_from_other_tool_enters_deleting() {
    let mode = dragging_with_anchor(ShapeKind::Line).select(choice(Tool::Delete));
    assert_eq!(mode, Mode::Deleting);
}

#[test]
fn select_none_returns_to_idle_from_anywhere() {
    let modes = [
        Mode::Deleting,
        dragging_with_anchor(ShapeKind::Arrow),
        Mode::PlacingFreeText { color: Color::RED, size: 24.0, pending: Some(pt(3.0, 3.0)) },
    ];
    for mode in modes {
        assert_eq!(mode.select(choice(Tool::None)), Mode::Idle);
    }
}

#[test]
fn mode_tool_round_trips_through_select() {
    let tools = [
        Tool::None,
        Tool::Symbol(SymbolKind::Cross),
        Tool::FreeText,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Line,
        Tool::Arrow,
        Tool::Delete,
    ];
    for tool in tools {
        assert_eq!(Mode::Idle.select(choice(tool)).tool(), tool);
    }
}

// =============================================================
// Mode: transient state
// =============================================================

#[test]
fn clear_transient_drops_anchor_and_keeps_tool() {
    let mut mode = dragging_with_anchor(ShapeKind::Rectangle);
    assert!(mode.clear_transient());
    assert_eq!(mode.anchor(), None);
    assert_eq!(mode.tool(), Tool::Rectangle);
    assert!(!mode.clear_transient());
}

#[test]
fn clear_transient_drops_pending_text() {
    let mut mode = Mode::PlacingFreeText { color: Color::RED, size: 24.0, pending: Some(pt(1.0, 2.0)) };
    assert!(mode.clear_transient());
    assert_eq!(mode.pending_text(), None);
}

#[test]
fn retint_changes_color_and_clears_anchor() {
    let mut mode = dragging_with_anchor(ShapeKind::Ellipse);
    mode.retint(Color::BLUE);
    assert_eq!(mode, Mode::DraggingShape { kind: ShapeKind::Ellipse, anchor: None, color: Color::BLUE });
}

#[test]
fn retint_idle_is_noop() {
    let mut mode = Mode::Idle;
    mode.retint(Color::BLUE);
    assert_eq!(mode, Mode::Idle);
}

#[test]
fn resize_text_only_affects_text_tools() {
    let mut symbol = Mode::Idle.select(choice(Tool::Symbol(SymbolKind::Check)));
    symbol.resize_text(40.0);
    assert!(matches!(symbol, Mode::PlacingSymbol { size, .. } if size == 40.0));

    let mut shape = Mode::Idle.select(choice(Tool::Line));
    let before = shape.clone();
    shape.resize_text(40.0);
    assert_eq!(shape, before);
}

// =============================================================
// ShapeKind::build
// =============================================================

#[test]
fn build_rectangle_keeps_signed_extents() {
    let el = ShapeKind::Rectangle.build(pt(50.0, 50.0), pt(20.0, 30.0), false, Color::RED);
    assert_eq!(el, Element::rectangle(50.0, 50.0, -30.0, -20.0, Color::RED));
    assert_eq!(el.normalize(), Element::rectangle(20.0, 30.0, 30.0, 20.0, Color::RED));
}

#[test]
fn build_constrained_rectangle_is_square_in_drag_direction() {
    let el = ShapeKind::Rectangle.build(pt(100.0, 100.0), pt(90.0, 130.0), true, Color::RED);
    assert_eq!(el, Element::rectangle(100.0, 100.0, -30.0, 30.0, Color::RED));
}

#[test]
fn build_ellipse_centers_between_anchor_and_end() {
    let el = ShapeKind::Ellipse.build(pt(0.0, 0.0), pt(40.0, -20.0), false, Color::RED);
    assert_eq!(el, Element::ellipse(pt(20.0, -10.0), 20.0, 10.0, Color::RED));
}

#[test]
fn build_constrained_ellipse_is_circle() {
    let el = ShapeKind::Ellipse.build(pt(0.0, 0.0), pt(40.0, 20.0), true, Color::RED);
    assert_eq!(el, Element::ellipse(pt(20.0, 10.0), 20.0, 20.0, Color::RED));
}

#[test]
fn build_line_unconstrained_uses_raw_end() {
    let el = ShapeKind::Line.build(pt(0.0, 0.0), pt(10.0, 4.0), false, Color::RED);
    assert_eq!(el, Element::line(pt(0.0, 0.0), pt(10.0, 4.0), Color::RED));
}

#[test]
fn build_constrained_arrow_snaps_and_keeps_length() {
    let el = ShapeKind::Arrow.build(pt(0.0, 0.0), pt(10.0, 4.0), true, Color::RED);
    let Element::Arrow(seg) = el else {
        panic!("expected arrow, got {el:?}");
    };
    assert!((seg.end.x - 116.0_f64.sqrt()).abs() < 1e-9);
    assert!(seg.end.y.abs() < 1e-9);
}

// =============================================================
// clears_minimum
// =============================================================

#[test]
fn minimum_rectangle_needs_both_extents() {
    assert!(!clears_minimum(&Element::rectangle(0.0, 0.0, 3.0, 3.0, Color::RED), 5.0));
    assert!(!clears_minimum(&Element::rectangle(0.0, 0.0, 50.0, 5.0, Color::RED), 5.0));
    assert!(clears_minimum(&Element::rectangle(0.0, 0.0, -6.0, 6.0, Color::RED), 5.0));
}

#[test]
fn minimum_ellipse_needs_both_radii() {
    assert!(!clears_minimum(&Element::ellipse(pt(0.0, 0.0), 5.0, 50.0, Color::RED), 5.0));
    assert!(clears_minimum(&Element::ellipse(pt(0.0, 0.0), 5.5, 6.0, Color::RED), 5.0));
}

#[test]
fn minimum_line_needs_either_axis() {
    assert!(!clears_minimum(&Element::line(pt(0.0, 0.0), pt(5.0, 5.0), Color::RED), 5.0));
    assert!(clears_minimum(&Element::line(pt(0.0, 0.0), pt(0.0, 6.0), Color::RED), 5.0));
    assert!(clears_minimum(&Element::arrow(pt(0.0, 0.0), pt(-6.0, 0.0), Color::RED), 5.0));
}
