#![allow(clippy::float_cmp)]

use annotate::element::Color;

use super::*;

fn base() -> BaseImage {
    BaseImage { name: "photo.jpg".into(), width: 200.0, height: 100.0 }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// frame
// =============================================================

#[test]
fn empty_frame_has_root_and_image() {
    let svg = frame(&base(), &[], None, &EngineConfig::default()).unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">"#));
    assert!(svg.contains(r#"<image href="photo.jpg" width="200" height="100"/>"#));
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn shapes_are_stroked_with_element_color() {
    let elements = [
        Element::rectangle(10.0, 20.0, 30.0, 40.0, Color::RED),
        Element::ellipse(pt(50.0, 50.0), 5.0, 8.0, Color::BLUE),
        Element::line(pt(0.0, 0.0), pt(10.0, 10.0), Color::GREEN),
    ];
    let svg = frame(&base(), &elements, None, &EngineConfig::default()).unwrap();

    assert!(svg.contains(r##"<rect x="10" y="20" width="30" height="40" fill="none" stroke="#ff0000" stroke-width="2"/>"##));
    assert!(svg.contains(r##"<ellipse cx="50" cy="50" rx="5" ry="8" fill="none" stroke="#0000ff" stroke-width="2"/>"##));
    assert!(svg.contains(r##"<line x1="0" y1="0" x2="10" y2="10" stroke="#008000" stroke-width="2"/>"##));
}

#[test]
fn arrow_emits_three_lines() {
    let elements = [Element::arrow(pt(0.0, 50.0), pt(100.0, 50.0), Color::RED)];
    let svg = frame(&base(), &elements, None, &EngineConfig::default()).unwrap();
    assert_eq!(svg.matches("<line ").count(), 3);
}

#[test]
fn text_is_escaped() {
    let elements = [Element::text("a<b & \"c\"", pt(5.0, 6.0), 24.0, Color::BLACK)];
    let svg = frame(&base(), &elements, None, &EngineConfig::default()).unwrap();
    assert!(svg.contains(r##"<text x="5" y="6" fill="#000000" style="font: 24px Arial">a&lt;b &amp; &quot;c&quot;</text>"##));
}

#[test]
fn preview_is_painted_last() {
    let elements = [Element::rectangle(0.0, 0.0, 10.0, 10.0, Color::RED)];
    let preview = Element::line(pt(1.0, 1.0), pt(9.0, 9.0), Color::BLUE);
    let svg = frame(&base(), &elements, Some(&preview), &EngineConfig::default()).unwrap();
    let rect_at = svg.find("<rect").unwrap();
    let line_at = svg.find("<line").unwrap();
    assert!(rect_at < line_at);
}

// =============================================================
// SvgRenderer
// =============================================================

#[test]
fn renderer_keeps_latest_frame() {
    let mut renderer = SvgRenderer::new(EngineConfig::default());
    assert_eq!(renderer.last_frame(), None);

    renderer.render(&base(), &[], None);
    renderer.render(&base(), &[Element::rectangle(1.0, 1.0, 9.0, 9.0, Color::RED)], None);

    assert_eq!(renderer.frames(), 2);
    assert!(renderer.last_frame().unwrap().contains("<rect"));
}

#[test]
fn renderer_measures_with_approx_metrics() {
    let renderer = SvgRenderer::new(EngineConfig::default());
    assert_eq!(renderer.text_width("ab", 10.0, "10px Arial"), ApproxMetrics.text_width("ab", 10.0, "10px Arial"));
}
