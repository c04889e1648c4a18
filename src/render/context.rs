use crate::math::Matrix;
use crate::render::{Canvas2d, TintCache};
use crate::text::FontMetricsCache;

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub nodes_drawn: usize,
    pub shapes_drawn: usize,
    pub sprites_drawn: usize,
    pub texts_drawn: usize,
    pub masks_pushed: usize,
    /// Shapes skipped because their geometry cannot be drawn.
    pub degenerate_skipped: usize,
}

/// Everything a node's content needs to paint itself.
pub struct DrawContext<'a> {
    pub canvas: &'a mut dyn Canvas2d,
    pub tint_cache: &'a mut TintCache,
    pub font_cache: &'a mut FontMetricsCache,
    pub stats: &'a mut RenderStats,
    pub world: Matrix,
    pub world_alpha: f64,
    pub tint: u32,
    pub resolution: f64,
    pub round_pixels: bool,
}

impl DrawContext<'_> {
    /// Sets the canvas transform to `matrix` scaled by the renderer
    /// resolution.
    pub fn set_context_transform(&mut self, matrix: &Matrix) {
        self.set_context_transform_at(matrix, self.resolution);
    }

    pub fn set_context_transform_at(&mut self, matrix: &Matrix, resolution: f64) {
        let mut device = Matrix::new(
            matrix.a * resolution,
            matrix.b * resolution,
            matrix.c * resolution,
            matrix.d * resolution,
            matrix.tx * resolution,
            matrix.ty * resolution,
        );
        if self.round_pixels {
            device.tx = device.tx.trunc();
            device.ty = device.ty.trunc();
        }
        self.canvas.set_transform(&device);
    }

    pub fn apply_world_transform(&mut self) {
        let world = self.world;
        self.set_context_transform(&world);
    }
}
