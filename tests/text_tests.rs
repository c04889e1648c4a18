use approx::assert_relative_eq;
use chart_stage::render::{CanvasCommand, CanvasRenderer, RecordingCanvas, RendererOptions};
use chart_stage::scene::Scene;
use chart_stage::text::{FontMetricsCache, Text, TextAlign, TextStyle};

fn style() -> TextStyle {
    TextStyle::new("Arial", 20.0, 0x000000)
}

#[test]
fn metrics_split_lines_and_measure_the_widest() {
    let mut canvas = RecordingCanvas::new(100, 100).expect("canvas");
    let mut cache = FontMetricsCache::new();
    let mut text = Text::new("Hello\nHi", style());

    let metrics = text.update_metrics(&mut canvas, &mut cache).clone();
    assert_eq!(metrics.lines, vec!["Hello".to_owned(), "Hi".to_owned()]);
    assert_relative_eq!(metrics.max_line_width, 60.0);
    assert_relative_eq!(metrics.width, 60.0);
    assert!(!text.is_dirty());
    assert_eq!(cache.len(), 1);

    text.set_text("Hello\nHi");
    assert!(!text.is_dirty());
    text.set_text("Bye");
    assert!(text.is_dirty());
}

#[test]
fn word_wrap_breaks_on_spaces() {
    let mut canvas = RecordingCanvas::new(100, 100).expect("canvas");
    let mut cache = FontMetricsCache::new();
    let mut wrapped = style();
    wrapped.word_wrap = true;
    wrapped.word_wrap_width = 70.0;
    let mut text = Text::new("aaaa bbbb", wrapped);

    let metrics = text.update_metrics(&mut canvas, &mut cache);
    assert_eq!(metrics.lines.len(), 2);
    assert!(metrics.max_line_width <= 70.0);
}

#[test]
fn anchor_moves_the_hit_box() {
    let mut canvas = RecordingCanvas::new(100, 100).expect("canvas");
    let mut cache = FontMetricsCache::new();
    let mut text = Text::new("Hello", style()).with_anchor(1.0, 0.0);
    text.update_metrics(&mut canvas, &mut cache);

    let rect = text.local_rect();
    assert_relative_eq!(rect.x, -60.0);
    assert_relative_eq!(rect.width, 60.0);
}

#[test]
fn text_renders_one_fill_per_line_and_optional_stroke() {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut stroked = style();
    stroked.stroke = 0xFFFFFF;
    stroked.stroke_thickness = 2.0;
    stroked.align = TextAlign::Center;
    let label = scene.create(Text::new("Open\nClose", stroked));
    scene.add_child(root, label).expect("add label");

    let canvas = RecordingCanvas::new(200, 100).expect("canvas");
    let mut renderer = CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer");
    renderer.render(&mut scene, root).expect("render");

    let canvas = renderer.canvas();
    assert_eq!(canvas.count(|c| matches!(c, CanvasCommand::FillText { .. })), 2);
    assert_eq!(canvas.count(|c| matches!(c, CanvasCommand::StrokeText { .. })), 2);
    assert_eq!(renderer.last_stats().texts_drawn, 1);
    assert!(canvas
        .commands()
        .iter()
        .any(|c| matches!(c, CanvasCommand::SetFont(font) if font.contains("20px"))));
}

#[test]
fn empty_text_draws_nothing() {
    let mut scene = Scene::new();
    let root = scene.root();
    let label = scene.create(Text::new("", style()));
    scene.add_child(root, label).expect("add label");

    let canvas = RecordingCanvas::new(50, 50).expect("canvas");
    let mut renderer = CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer");
    renderer.render(&mut scene, root).expect("render");

    assert_eq!(
        renderer
            .canvas()
            .count(|c| matches!(c, CanvasCommand::FillText { .. })),
        0
    );
}
