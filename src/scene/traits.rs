use crate::error::StageResult;
use crate::graphics::Graphics;
use crate::math::{Bounds, Matrix, Point, Transform};
use crate::render::DrawContext;
use crate::sprite::Sprite;
use crate::text::Text;

use super::{Node, NodeContent};

pub trait Transformable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn world_transform(&self) -> Matrix {
        self.transform().world_matrix()
    }

    fn local_transform(&self) -> Matrix {
        self.transform().local_matrix()
    }
}

impl Transformable for Node {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Geometric containment in the content's local space.
pub trait HitTestable {
    fn contains_local_point(&self, point: Point) -> bool;
}

impl HitTestable for Graphics {
    fn contains_local_point(&self, point: Point) -> bool {
        Graphics::contains_local_point(self, point)
    }
}

impl HitTestable for Sprite {
    fn contains_local_point(&self, point: Point) -> bool {
        Sprite::contains_local_point(self, point)
    }
}

impl HitTestable for Text {
    fn contains_local_point(&self, point: Point) -> bool {
        Text::contains_local_point(self, point)
    }
}

impl HitTestable for NodeContent {
    fn contains_local_point(&self, point: Point) -> bool {
        match self {
            Self::Empty => false,
            Self::Graphics(graphics) => HitTestable::contains_local_point(graphics, point),
            Self::Sprite(sprite) => HitTestable::contains_local_point(sprite, point),
            Self::Text(text) => HitTestable::contains_local_point(text, point),
        }
    }
}

/// Content that contributes bounds and paints itself onto a canvas.
pub trait Drawable {
    /// Adds the content's bounds under `world` to `bounds`.
    fn add_content_bounds(&self, world: &Matrix, bounds: &mut Bounds);

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> StageResult<()>;
}

impl Drawable for NodeContent {
    fn add_content_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        match self {
            Self::Empty => {}
            Self::Graphics(graphics) => graphics.add_content_bounds(world, bounds),
            Self::Sprite(sprite) => sprite.add_content_bounds(world, bounds),
            Self::Text(text) => text.add_content_bounds(world, bounds),
        }
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> StageResult<()> {
        match self {
            Self::Empty => Ok(()),
            Self::Graphics(graphics) => graphics.draw(ctx),
            Self::Sprite(sprite) => sprite.draw(ctx),
            Self::Text(text) => text.draw(ctx),
        }
    }
}
