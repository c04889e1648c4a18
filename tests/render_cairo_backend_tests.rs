#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_stage::StageError;
use chart_stage::graphics::Graphics;
use chart_stage::render::{CairoCanvas, CanvasRenderer, RendererOptions};
use chart_stage::scene::Scene;
use chart_stage::text::{Text, TextStyle};

#[test]
fn cairo_canvas_rejects_invalid_surface_size() {
    let err = CairoCanvas::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, StageError::InvalidViewport { .. }));
}

#[test]
fn cairo_canvas_rasterizes_filled_shapes() {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut graphics = Graphics::new();
    graphics.begin_fill(0xFF0000, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
    let rect = scene.create(graphics);
    scene.add_child(root, rect).expect("add rect");
    let label = scene.create(Text::new("42.5", TextStyle::new("Sans", 12.0, 0xFFFFFF)));
    scene.add_child(root, label).expect("add label");
    scene
        .node_mut(label)
        .expect("label")
        .transform
        .set_position(0.0, 25.0);

    let canvas = CairoCanvas::new(20, 20).expect("canvas");
    let mut renderer = CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer");
    renderer.render(&mut scene, root).expect("render");

    let pixels = renderer.canvas().snapshot().expect("snapshot");
    assert_eq!(pixels.pixel(15, 15).map(|p| p[3]), Some(0));
    let inside = pixels.pixel(2, 2).expect("pixel inside");
    assert_eq!(inside, [255, 0, 0, 255]);
    assert_eq!(renderer.last_stats().texts_drawn, 1);
}

#[test]
fn cairo_canvas_can_draw_on_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 32, 32).expect("surface");
    let context = Context::new(&surface).expect("context");
    let canvas = CairoCanvas::for_context(context, 32, 32).expect("canvas");

    let mut scene = Scene::new();
    let root = scene.root();
    let mut graphics = Graphics::new();
    graphics.begin_fill(0x00FF00, 1.0).draw_circle(16.0, 16.0, 8.0);
    let circle = scene.create(graphics);
    scene.add_child(root, circle).expect("add circle");

    let mut renderer = CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer");
    renderer.render(&mut scene, root).expect("render");
    assert!(renderer.canvas().snapshot().is_err());
    assert_eq!(renderer.last_stats().shapes_drawn, 1);
}
