use std::rc::Rc;

use approx::assert_relative_eq;
use chart_stage::StageError;
use chart_stage::math::{Point, Rectangle};
use chart_stage::render::{CanvasCommand, CanvasRenderer, RecordingCanvas, RendererOptions};
use chart_stage::scene::Scene;
use chart_stage::sprite::Sprite;
use chart_stage::texture::{BaseTexture, PixelBuffer, Resource, Texture};

fn red_base(width: u32, height: u32) -> Rc<BaseTexture> {
    BaseTexture::from_pixels(PixelBuffer::filled(width, height, [255, 0, 0, 255]))
}

#[test]
fn base_texture_resource_is_bound_once() {
    let mut base = BaseTexture::new(1.0);
    assert!(!base.is_valid());
    let first = Resource::Pixels(PixelBuffer::filled(2, 2, [0, 0, 0, 255]));
    base.set_resource(first.clone()).expect("first bind");
    base.set_resource(first).expect("same resource again is fine");

    let other = Resource::Pixels(PixelBuffer::filled(3, 3, [0, 0, 0, 255]));
    let err = base.set_resource(other).expect_err("rebinding must fail");
    assert!(matches!(err, StageError::ResourceAlreadyBound));
    assert_relative_eq!(base.width(), 2.0);
}

#[test]
fn frames_past_the_base_texture_are_rejected() {
    let base = red_base(8, 8);
    let texture = Texture::new(Rc::clone(&base), Some(Rectangle::new(4.0, 4.0, 4.0, 4.0)))
        .expect("frame inside");
    assert!(texture.is_valid());

    let err = Texture::new(base, Some(Rectangle::new(4.0, 4.0, 5.0, 4.0)))
        .expect_err("frame outside");
    assert!(matches!(err, StageError::FrameOutOfBounds { .. }));
}

#[test]
fn texture_without_pixels_is_invalid() {
    let base = Rc::new(BaseTexture::new(1.0));
    let texture = Texture::new(base, None).expect("empty frame");
    assert!(!texture.is_valid());
}

#[test]
fn anchor_shifts_the_sprite_rect() {
    let texture = Texture::new(red_base(10, 20), None).expect("texture");
    let sprite = Sprite::new(texture).with_anchor(0.5, 1.0);
    let rect = sprite.local_rect();
    assert_relative_eq!(rect.x, -5.0);
    assert_relative_eq!(rect.y, -20.0);
    assert!(sprite.contains_local_point(Point::new(0.0, -1.0)));
    assert!(!sprite.contains_local_point(Point::new(0.0, 0.0)));
}

#[test]
fn sprites_draw_their_frame_and_cache_tints() {
    let mut scene = Scene::new();
    let root = scene.root();
    let texture = Texture::new(red_base(8, 8), Some(Rectangle::new(2.0, 2.0, 4.0, 4.0)))
        .expect("texture");
    let plain = scene.create(Sprite::new(texture.clone()));
    let tinted = scene.create(Sprite::new(texture));
    scene.add_child(root, plain).expect("add plain");
    scene.add_child(root, tinted).expect("add tinted");
    scene.node_mut(tinted).expect("tinted").tint = 0x808080;

    let canvas = RecordingCanvas::new(32, 32).expect("canvas");
    let mut renderer = CanvasRenderer::new(canvas, RendererOptions::default()).expect("renderer");
    renderer.render(&mut scene, root).expect("render");

    let draws: Vec<&CanvasCommand> = renderer
        .canvas()
        .commands()
        .iter()
        .filter(|c| matches!(c, CanvasCommand::DrawImage { .. }))
        .collect();
    assert_eq!(draws.len(), 2);
    assert!(matches!(
        draws[0],
        CanvasCommand::DrawImage { sx, sy, sw, dw, .. }
            if *sx == 2.0 && *sy == 2.0 && *sw == 4.0 && *dw == 4.0
    ));
    assert_eq!(renderer.last_stats().sprites_drawn, 2);
    assert_eq!(renderer.tint_cache().len(), 1);

    renderer.render(&mut scene, root).expect("second frame");
    assert_eq!(renderer.tint_cache().len(), 1);
    assert!(renderer.tint_cache().hits() >= 1);
}

#[test]
fn sprite_bounds_use_the_world_transform() {
    let mut scene = Scene::new();
    let root = scene.root();
    let texture = Texture::new(red_base(10, 10), None).expect("texture");
    let sprite = scene.create(Sprite::new(texture));
    scene.add_child(root, sprite).expect("add");
    scene
        .node_mut(sprite)
        .expect("sprite")
        .transform
        .set_position(3.0, 4.0);

    let bounds = scene.get_bounds(sprite).expect("bounds");
    assert_relative_eq!(bounds.x, 3.0);
    assert_relative_eq!(bounds.y, 4.0);
    assert_relative_eq!(bounds.width, 10.0);
}
