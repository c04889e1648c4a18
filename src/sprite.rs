use crate::math::{Bounds, Matrix, Point, Rectangle};
use crate::texture::Texture;

/// Textured quad anchored at `anchor` (0..1 of the texture's original size).
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: Texture,
    pub anchor: Point,
}

impl Sprite {
    #[must_use]
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            anchor: Point::ORIGIN,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    /// Local rectangle covered by the untrimmed texture.
    #[must_use]
    pub fn local_rect(&self) -> Rectangle {
        let orig = self.texture.orig();
        Rectangle::new(
            -orig.width * self.anchor.x,
            -orig.height * self.anchor.y,
            orig.width,
            orig.height,
        )
    }

    /// Local rectangle the frame pixels are drawn into, honouring trim.
    #[must_use]
    pub fn draw_rect(&self) -> Rectangle {
        let orig = self.texture.orig();
        let frame = self.texture.frame();
        match self.texture.trim() {
            Some(trim) => Rectangle::new(
                trim.x - self.anchor.x * orig.width,
                trim.y - self.anchor.y * orig.height,
                frame.width,
                frame.height,
            ),
            None => Rectangle::new(
                -self.anchor.x * orig.width,
                -self.anchor.y * orig.height,
                frame.width,
                frame.height,
            ),
        }
    }

    #[must_use]
    pub fn contains_local_point(&self, point: Point) -> bool {
        let rect = self.local_rect();
        point.x >= rect.x
            && point.x < rect.x + rect.width
            && point.y >= rect.y
            && point.y < rect.y + rect.height
    }

    pub fn add_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        if !self.texture.is_valid() {
            return;
        }
        let rect = self.draw_rect();
        bounds.add_frame(world, rect.x, rect.y, rect.right(), rect.bottom());
    }
}
