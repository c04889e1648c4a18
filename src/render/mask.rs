use tracing::warn;

use crate::render::DrawContext;
use crate::render::graphics_renderer::trace_graphics_outline;
use crate::scene::{NodeContent, NodeId, Scene, Transformable};

/// Clips subsequent drawing to the outline of `mask`.
///
/// Returns whether a clip was pushed; only graphics nodes can mask.
pub(crate) fn push_mask(scene: &mut Scene, mask: NodeId, ctx: &mut DrawContext<'_>) -> bool {
    let Some(node) = scene.slot_mut(mask) else {
        warn!(%mask, "mask node no longer exists");
        return false;
    };
    let world = node.world_transform();
    let NodeContent::Graphics(graphics) = &mut node.content else {
        warn!(%mask, "mask node has no graphics content; ignoring");
        return false;
    };
    graphics.flush_path();

    ctx.canvas.save();
    ctx.canvas.begin_path();
    trace_graphics_outline(ctx, graphics, &world);
    ctx.canvas.clip();
    ctx.stats.masks_pushed += 1;
    true
}

pub(crate) fn pop_mask(ctx: &mut DrawContext<'_>) {
    ctx.canvas.restore();
}
