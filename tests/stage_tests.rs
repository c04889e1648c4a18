use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chart_stage::graphics::Graphics;
use chart_stage::interaction::{
    EventKind, InputPhase, InteractionConfig, MouseInput, NativeInput, PointerInput,
    TargetElement, WheelInput,
};
use chart_stage::math::Point;
use chart_stage::render::{Canvas2d, CanvasCommand, RecordingCanvas};
use chart_stage::{Stage, StageConfig, StageError, Viewport};

fn stage(width: u32, height: u32) -> Stage<RecordingCanvas> {
    let canvas = RecordingCanvas::new(1, 1).expect("canvas");
    Stage::new(canvas, StageConfig::new(Viewport::new(width, height))).expect("stage")
}

fn add_button(stage: &mut Stage<RecordingCanvas>) -> chart_stage::scene::NodeId {
    let root = stage.root();
    let scene = stage.scene_mut();
    let mut graphics = Graphics::new();
    graphics.begin_fill(0xEF5350, 1.0).draw_rect(0.0, 0.0, 100.0, 100.0);
    let id = scene.create(graphics);
    scene.add_child(root, id).expect("add");
    scene.node_mut(id).expect("node").interactive = true;
    id
}

fn manager_log(stage: &mut Stage<RecordingCanvas>, kinds: &[EventKind]) -> Rc<RefCell<Vec<EventKind>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in kinds {
        let sink = Rc::clone(&log);
        stage.on(*kind, Box::new(move |event| sink.borrow_mut().push(event.kind)));
    }
    log
}

#[test]
fn config_round_trips_through_json() {
    let config = StageConfig::new(Viewport::new(640, 480))
        .with_resolution(2.0)
        .with_background(0x131722, 1.0)
        .with_interaction(
            InteractionConfig::default()
                .with_move_when_inside(true)
                .with_cursor_style("grab", "grab"),
        );
    let json = config.to_json_pretty().expect("serialize");
    let parsed = StageConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
    let styles: Vec<&String> = parsed.interaction.cursor_styles.keys().collect();
    assert_eq!(styles, ["default", "pointer", "grab"]);
}

#[test]
fn config_fills_defaults_from_minimal_json() {
    let parsed =
        StageConfig::from_json_str(r#"{"viewport":{"width":300,"height":200}}"#).expect("parse");
    assert_eq!(parsed, StageConfig::new(Viewport::new(300, 200)));
    assert!(parsed.clear_before_render);
    assert_eq!(parsed.interaction.wheel_gesture_end_ms, 150);

    let err = StageConfig::from_json_str("{").expect_err("malformed json");
    assert!(matches!(err, StageError::InvalidData(_)));
}

#[test]
fn invalid_configs_are_rejected() {
    let canvas = RecordingCanvas::new(1, 1).expect("canvas");
    let err = Stage::new(canvas, StageConfig::new(Viewport::new(0, 10))).expect_err("viewport");
    assert!(matches!(err, StageError::InvalidViewport { width: 0, height: 10 }));

    let config = StageConfig::new(Viewport::new(10, 10))
        .with_interaction(InteractionConfig::default().with_wheel_gesture_end_ms(0));
    assert!(matches!(config.validate(), Err(StageError::InvalidData(_))));
}

#[test]
fn stage_sizes_the_canvas_and_renders() {
    let mut stage = stage(200, 100);
    add_button(&mut stage);
    assert_eq!(stage.renderer().canvas().width(), 200);

    stage.render().expect("render");
    assert_eq!(
        stage
            .renderer()
            .canvas()
            .count(|c| matches!(c, CanvasCommand::FillRect { .. })),
        1
    );

    stage.resize(400, 300).expect("resize");
    assert_eq!(stage.config().viewport, Viewport::new(400, 300));
    assert_eq!(stage.renderer().canvas().height(), 300);
}

#[test]
fn client_coordinates_map_through_the_target_element() {
    let canvas = RecordingCanvas::new(1, 1).expect("canvas");
    let mut stage = Stage::new(
        canvas,
        StageConfig::new(Viewport::new(200, 200)).with_resolution(2.0),
    )
    .expect("stage");
    let button = add_button(&mut stage);
    stage.set_target_element(Some(TargetElement::new(50.0, 50.0, 200.0, 200.0)));

    let mapped = stage.interaction().map_position_to_point(100.0, 100.0);
    assert_eq!(mapped, Point::new(50.0, 50.0));

    let downs = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&downs);
    stage
        .scene_mut()
        .on(button, EventKind::PointerDown, Box::new(move |_| *sink.borrow_mut() += 1))
        .expect("listen");
    stage
        .handle_input(
            &NativeInput::Pointer(PointerInput::mouse(InputPhase::Down, 100.0, 100.0)),
            Duration::ZERO,
        )
        .expect("down");
    stage
        .handle_input(
            &NativeInput::Pointer(PointerInput::mouse(InputPhase::Down, 260.0, 100.0)),
            Duration::ZERO,
        )
        .expect("down outside");
    assert_eq!(*downs.borrow(), 1);
}

#[test]
fn wheel_bursts_form_one_zoom_gesture() {
    let mut stage = stage(200, 200);
    let button = add_button(&mut stage);
    let log = manager_log(
        &mut stage,
        &[EventKind::ZoomStart, EventKind::Wheel, EventKind::ZoomEnd],
    );
    let deltas = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deltas);
    stage
        .scene_mut()
        .on(
            button,
            EventKind::Wheel,
            Box::new(move |event| {
                if let Some(wheel) = event.data.original_event.and_then(|record| record.wheel) {
                    sink.borrow_mut().push(wheel.delta_y);
                }
            }),
        )
        .expect("listen");

    let wheel = NativeInput::Wheel(WheelInput::new(50.0, 50.0, 0.0, -120.0));
    stage.handle_input(&wheel, Duration::from_millis(0)).expect("wheel");
    stage.handle_input(&wheel, Duration::from_millis(100)).expect("wheel");
    assert!(!stage.tick(Duration::from_millis(200)));
    assert!(stage.tick(Duration::from_millis(250)));
    assert!(!stage.tick(Duration::from_millis(400)));

    assert_eq!(
        log.borrow().as_slice(),
        &[
            EventKind::ZoomStart,
            EventKind::Wheel,
            EventKind::Wheel,
            EventKind::ZoomEnd
        ]
    );
    assert_eq!(deltas.borrow().as_slice(), &[-120.0, -120.0]);
}

#[test]
fn late_wheel_event_ends_the_previous_gesture_first() {
    let mut stage = stage(200, 200);
    let log = manager_log(&mut stage, &[EventKind::ZoomStart, EventKind::ZoomEnd]);
    let wheel = NativeInput::Wheel(WheelInput::new(10.0, 10.0, 0.0, 60.0));

    stage.handle_input(&wheel, Duration::from_millis(0)).expect("wheel");
    stage.handle_input(&wheel, Duration::from_millis(500)).expect("wheel");

    assert_eq!(
        log.borrow().as_slice(),
        &[EventKind::ZoomStart, EventKind::ZoomEnd, EventKind::ZoomStart]
    );
}

#[test]
fn double_click_reaches_the_node_under_the_pointer() {
    let mut stage = stage(200, 200);
    let button = add_button(&mut stage);
    let hits = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&hits);
    stage
        .scene_mut()
        .on(button, EventKind::DblClick, Box::new(move |_| *sink.borrow_mut() += 1))
        .expect("listen");
    let manager = manager_log(&mut stage, &[EventKind::DblClick]);

    let dblclick = NativeInput::DoubleClick(MouseInput::new(InputPhase::Up, 20.0, 20.0));
    stage.handle_input(&dblclick, Duration::ZERO).expect("dblclick");

    assert_eq!(*hits.borrow(), 1);
    assert_eq!(manager.borrow().len(), 1);
    assert_eq!(
        stage.hit_test(Point::new(20.0, 20.0)).expect("hit test"),
        Some(button)
    );
}
