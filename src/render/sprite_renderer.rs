use tracing::trace;

use crate::error::StageResult;
use crate::math::{Bounds, Matrix};
use crate::render::{DrawContext, WHITE_TINT};
use crate::scene::Drawable;
use crate::sprite::Sprite;

impl Drawable for Sprite {
    fn add_content_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        self.add_bounds(world, bounds);
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> StageResult<()> {
        let texture = self.texture();
        if !texture.is_valid() {
            return Ok(());
        }
        let base = texture.base_texture();
        let Some(source) = base.drawable_source() else {
            trace!(base = base.id(), "sprite texture has no pixels yet");
            return Ok(());
        };

        ctx.canvas.set_global_alpha(ctx.world_alpha);
        let world = ctx.world;
        ctx.set_context_transform_at(&world, 1.0);

        let resolution = ctx.resolution;
        let base_resolution = base.resolution();
        let frame = texture.frame();
        let dest = self.draw_rect();

        let (mut dx, mut dy) = (dest.x * resolution, dest.y * resolution);
        if ctx.round_pixels {
            dx = dx.floor();
            dy = dy.floor();
        }
        let dw = dest.width * resolution;
        let dh = dest.height * resolution;
        let sx = frame.x * base_resolution;
        let sy = frame.y * base_resolution;
        let sw = frame.width * base_resolution;
        let sh = frame.height * base_resolution;

        let tinted = if ctx.tint == WHITE_TINT {
            None
        } else {
            ctx.tint_cache.get_or_tint(base, ctx.tint)
        };
        match tinted {
            Some(image) => ctx
                .canvas
                .draw_image(&image, sx, sy, sw, sh, dx, dy, dw, dh)?,
            None => ctx
                .canvas
                .draw_image(source, sx, sy, sw, sh, dx, dy, dw, dh)?,
        }
        ctx.stats.sprites_drawn += 1;
        Ok(())
    }
}
