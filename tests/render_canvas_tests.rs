use approx::assert_relative_eq;
use chart_stage::StageError;
use chart_stage::graphics::{Graphics, LineStyle};
use chart_stage::math::{AreaPoint, CurveKind, Point};
use chart_stage::render::{
    Canvas2d, CanvasCommand, CanvasRenderer, Color, Paint, RecordingCanvas, RenderPass,
    RendererOptions,
};
use chart_stage::scene::{NodeId, Scene};

fn renderer(width: u32, height: u32) -> CanvasRenderer<RecordingCanvas> {
    let canvas = RecordingCanvas::new(width, height).expect("canvas");
    CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer")
}

fn add_rect(scene: &mut Scene, parent: NodeId, color: u32) -> NodeId {
    let mut graphics = Graphics::new();
    graphics.begin_fill(color, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
    let id = scene.create(graphics);
    scene.add_child(parent, id).expect("add rect");
    id
}

fn count(renderer: &CanvasRenderer<RecordingCanvas>, f: impl Fn(&CanvasCommand) -> bool) -> usize {
    renderer.canvas().count(f)
}

#[test]
fn frame_clears_then_draws_in_paint_order() {
    let mut scene = Scene::new();
    let root = scene.root();
    add_rect(&mut scene, root, 0xFF0000);
    add_rect(&mut scene, root, 0x00FF00);
    let mut renderer = renderer(100, 50);

    renderer.render(&mut scene, root).expect("render");

    let commands = renderer.canvas().commands();
    assert!(matches!(
        commands.iter().find(|c| matches!(c, CanvasCommand::ClearRect { .. })),
        Some(CanvasCommand::ClearRect { width, height, .. }) if *width == 100.0 && *height == 50.0
    ));
    let fills: Vec<&Paint> = commands
        .iter()
        .filter_map(|c| match c {
            CanvasCommand::SetFillStyle(paint) => Some(paint),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0], &Paint::Solid(Color::from_hex(0xFF0000)));
    assert_eq!(fills[1], &Paint::Solid(Color::from_hex(0x00FF00)));
    assert_eq!(renderer.canvas().save_depth(), 0);
    assert_eq!(renderer.last_stats().shapes_drawn, 2);
}

#[test]
fn tint_and_world_alpha_reach_the_canvas() {
    let mut scene = Scene::new();
    let root = scene.root();
    let parent = scene.create_container();
    scene.add_child(root, parent).expect("add parent");
    scene.node_mut(parent).expect("parent").alpha = 0.5;
    let rect = add_rect(&mut scene, parent, 0xFFFFFF);
    scene.node_mut(rect).expect("rect").tint = 0x00FF00;
    let mut renderer = renderer(20, 20);

    renderer.render(&mut scene, root).expect("render");

    assert_eq!(
        count(&renderer, |c| *c == CanvasCommand::SetFillStyle(Paint::Solid(Color::from_hex(0x00FF00)))),
        1
    );
    assert!(renderer
        .canvas()
        .commands()
        .iter()
        .any(|c| matches!(c, CanvasCommand::SetGlobalAlpha(alpha) if (*alpha - 0.5).abs() < 1e-12)));
}

#[test]
fn invisible_and_transparent_nodes_are_skipped() {
    let mut scene = Scene::new();
    let root = scene.root();
    let hidden = add_rect(&mut scene, root, 0xFF0000);
    let faded = add_rect(&mut scene, root, 0x00FF00);
    let off = add_rect(&mut scene, root, 0x0000FF);
    scene.node_mut(hidden).expect("hidden").visible = false;
    scene.node_mut(faded).expect("faded").alpha = 0.0;
    scene.node_mut(off).expect("off").renderable = false;
    let mut renderer = renderer(20, 20);

    renderer.render(&mut scene, root).expect("render");

    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::FillRect { .. })), 0);
    assert_eq!(renderer.last_stats().shapes_drawn, 0);
}

#[test]
fn masks_clip_and_restore() {
    let mut scene = Scene::new();
    let root = scene.root();
    let content = add_rect(&mut scene, root, 0xFF0000);
    let mut mask_shape = Graphics::new();
    mask_shape.begin_fill(0xFFFFFF, 1.0).draw_circle(5.0, 5.0, 5.0);
    let mask = scene.create(mask_shape);
    scene.add_child(root, mask).expect("add mask");
    scene.set_mask(content, Some(mask)).expect("set mask");
    let mut renderer = renderer(20, 20);

    renderer.render(&mut scene, root).expect("render");

    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::Clip)), 1);
    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::Arc { .. })), 1);
    assert_eq!(renderer.last_stats().masks_pushed, 1);
    assert_eq!(renderer.last_stats().shapes_drawn, 1);
    assert_eq!(renderer.canvas().save_depth(), 0);
    assert_eq!(renderer.canvas().clip_depth(), 0);
}

#[test]
fn degenerate_shapes_are_counted_not_drawn() {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut graphics = Graphics::new();
    graphics
        .begin_fill(0xFFFFFF, 1.0)
        .draw_rect(0.0, 0.0, 0.0, 10.0)
        .draw_circle(f64::NAN, 0.0, 4.0)
        .draw_rect(0.0, 0.0, 5.0, 5.0);
    let id = scene.create(graphics);
    scene.add_child(root, id).expect("add");
    let mut renderer = renderer(20, 20);

    renderer.render(&mut scene, root).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.degenerate_skipped, 2);
    assert_eq!(stats.shapes_drawn, 1);
}

#[test]
fn rect_strokes_inset_by_half_width_for_any_alignment() {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut graphics = Graphics::new();
    graphics
        .set_line_style(LineStyle::new(4.0, 0x000000, 1.0).with_alignment(1.0))
        .draw_rect(10.0, 10.0, 40.0, 20.0);
    let id = scene.create(graphics);
    scene.add_child(root, id).expect("add rect");
    let mut renderer = renderer(100, 50);

    renderer.render(&mut scene, root).expect("render");

    let stroke = renderer
        .canvas()
        .commands()
        .iter()
        .find_map(|c| match c {
            CanvasCommand::StrokeRect { x, y, width, height } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .expect("stroke rect");
    assert_relative_eq!(stroke.0, 12.0);
    assert_relative_eq!(stroke.1, 12.0);
    assert_relative_eq!(stroke.2, 36.0);
    assert_relative_eq!(stroke.3, 16.0);
}

#[test]
fn lines_stroke_and_areas_fill() {
    let mut scene = Scene::new();
    let root = scene.root();
    let mut graphics = Graphics::new();
    graphics
        .line_style(1.0, 0x2962FF, 1.0)
        .draw_line(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)],
            CurveKind::Linear,
        )
        .begin_fill(0x2962FF, 0.3)
        .draw_area(
            vec![AreaPoint::new(0.0, 10.0, 20.0), AreaPoint::new(20.0, 12.0, 20.0)],
            CurveKind::Linear,
        );
    let id = scene.create(graphics);
    scene.add_child(root, id).expect("add");
    let mut renderer = renderer(40, 40);

    renderer.render(&mut scene, root).expect("render");

    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::Stroke)), 1);
    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::Fill)), 1);
    assert_eq!(renderer.last_stats().shapes_drawn, 2);
}

#[test]
fn background_fill_and_clear_override() {
    let mut scene = Scene::new();
    let root = scene.root();
    let canvas = RecordingCanvas::new(10, 10).expect("canvas");
    let options = RendererOptions {
        background_color: 0x101010,
        background_alpha: 1.0,
        ..RendererOptions::default()
    };
    let mut renderer = CanvasRenderer::new(canvas, options).expect("renderer");

    renderer.render(&mut scene, root).expect("render");
    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::FillRect { .. })), 1);

    renderer.canvas_mut().clear_commands();
    renderer
        .render_with(
            &mut scene,
            root,
            RenderPass {
                clear: Some(false),
                ..RenderPass::default()
            },
        )
        .expect("render without clear");
    assert_eq!(count(&renderer, |c| matches!(c, CanvasCommand::ClearRect { .. })), 0);
}

#[test]
fn resize_scales_by_resolution() {
    let canvas = RecordingCanvas::new(10, 10).expect("canvas");
    let options = RendererOptions {
        resolution: 2.0,
        ..RendererOptions::default()
    };
    let mut renderer = CanvasRenderer::new(canvas, options).expect("renderer");

    renderer.resize(300, 150).expect("resize");
    assert_eq!(renderer.canvas().width(), 600);
    assert_eq!(renderer.canvas().height(), 300);
    assert_relative_eq!(renderer.screen().width, 300.0);

    let err = renderer.resize(0, 150).expect_err("zero width");
    assert!(matches!(err, StageError::InvalidViewport { width: 0, height: 150 }));
}

#[test]
fn renderer_rejects_invalid_options() {
    let canvas = RecordingCanvas::new(10, 10).expect("canvas");
    let options = RendererOptions {
        resolution: 0.0,
        ..RendererOptions::default()
    };
    let err = CanvasRenderer::new(canvas, options).expect_err("zero resolution");
    assert!(matches!(err, StageError::InvalidData(_)));
}
