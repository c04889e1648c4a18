use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{StageError, StageResult};
use crate::math::{Matrix, Rectangle};
use crate::render::mask::{pop_mask, push_mask};
use crate::render::{
    Canvas2d, DEFAULT_TINT_CACHE_CAPACITY, DrawContext, Paint, RenderStats, TintCache, WHITE_TINT,
};
use crate::scene::{Drawable, NodeContent, NodeId, Scene, Transformable};
use crate::text::FontMetricsCache;

/// Frame-level renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RendererOptions {
    #[serde(default)]
    pub background_color: u32,
    /// `0` leaves the cleared canvas transparent.
    #[serde(default)]
    pub background_alpha: f64,
    #[serde(default = "default_true")]
    pub clear_before_render: bool,
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    #[serde(default)]
    pub round_pixels: bool,
    #[serde(default = "default_tint_cache_capacity")]
    pub tint_cache_capacity: usize,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            background_color: 0x000000,
            background_alpha: 0.0,
            clear_before_render: true,
            resolution: 1.0,
            round_pixels: false,
            tint_cache_capacity: DEFAULT_TINT_CACHE_CAPACITY,
        }
    }
}

impl RendererOptions {
    pub fn validate(&self) -> StageResult<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(StageError::InvalidData(format!(
                "resolution must be finite and > 0, got {}",
                self.resolution
            )));
        }
        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(StageError::InvalidData(format!(
                "background alpha must be in [0, 1], got {}",
                self.background_alpha
            )));
        }
        if self.background_color > 0xFF_FFFF {
            return Err(StageError::InvalidData(format!(
                "background color must be 0xRRGGBB, got {:#x}",
                self.background_color
            )));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_resolution() -> f64 {
    1.0
}

fn default_tint_cache_capacity() -> usize {
    DEFAULT_TINT_CACHE_CAPACITY
}

/// Per-call overrides for [`CanvasRenderer::render_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPass {
    /// Reuse world transforms from a previous update.
    pub skip_update_transform: bool,
    /// Overrides `clear_before_render` for this frame.
    pub clear: Option<bool>,
}

/// Draws a scene onto a [`Canvas2d`] each frame.
///
/// Owns the canvas, the per-renderer tint pattern cache and the font
/// metrics cache.
#[derive(Debug)]
pub struct CanvasRenderer<C: Canvas2d> {
    canvas: C,
    options: RendererOptions,
    screen: Rectangle,
    tint_cache: TintCache,
    font_cache: FontMetricsCache,
    last_stats: RenderStats,
}

impl<C: Canvas2d> CanvasRenderer<C> {
    /// Wraps `canvas`; the logical screen is the canvas size divided by the
    /// resolution.
    pub fn new(canvas: C, options: RendererOptions) -> StageResult<Self> {
        options.validate()?;
        let screen = Rectangle::new(
            0.0,
            0.0,
            f64::from(canvas.width()) / options.resolution,
            f64::from(canvas.height()) / options.resolution,
        );
        Ok(Self {
            canvas,
            options,
            screen,
            tint_cache: TintCache::new(options.tint_cache_capacity),
            font_cache: FontMetricsCache::new(),
            last_stats: RenderStats::default(),
        })
    }

    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    #[must_use]
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    #[must_use]
    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.options.resolution
    }

    /// Logical screen rectangle.
    #[must_use]
    pub fn screen(&self) -> Rectangle {
        self.screen
    }

    #[must_use]
    pub fn tint_cache(&self) -> &TintCache {
        &self.tint_cache
    }

    #[must_use]
    pub fn font_cache(&self) -> &FontMetricsCache {
        &self.font_cache
    }

    #[must_use]
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    pub fn set_background(&mut self, color: u32, alpha: f64) -> StageResult<()> {
        let options = RendererOptions {
            background_color: color,
            background_alpha: alpha,
            ..self.options
        };
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Resizes the logical screen; the canvas becomes `size × resolution`
    /// device pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> StageResult<()> {
        if width == 0 || height == 0 {
            return Err(StageError::InvalidViewport { width, height });
        }
        let resolution = self.options.resolution;
        let view_width = device_size(width, resolution);
        let view_height = device_size(height, resolution);
        self.canvas.resize(view_width, view_height)?;
        self.screen = Rectangle::new(0.0, 0.0, f64::from(width), f64::from(height));
        debug!(
            width,
            height, view_width, view_height, resolution, "canvas renderer resized"
        );
        Ok(())
    }

    pub fn render(&mut self, scene: &mut Scene, root: NodeId) -> StageResult<()> {
        self.render_with(scene, root, RenderPass::default())
    }

    pub fn render_with(
        &mut self,
        scene: &mut Scene,
        root: NodeId,
        pass: RenderPass,
    ) -> StageResult<()> {
        if !pass.skip_update_transform {
            scene.update_transform(root)?;
        } else if !scene.is_alive(root) {
            return Err(StageError::NodeNotFound(root.to_string()));
        }

        let mut stats = RenderStats::default();
        let clear = pass.clear.unwrap_or(self.options.clear_before_render);
        let options = self.options;
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        self.canvas.save();
        self.canvas.set_transform(&Matrix::IDENTITY);
        self.canvas.set_global_alpha(1.0);

        let result = {
            let mut ctx = DrawContext {
                canvas: &mut self.canvas,
                tint_cache: &mut self.tint_cache,
                font_cache: &mut self.font_cache,
                stats: &mut stats,
                world: Matrix::IDENTITY,
                world_alpha: 1.0,
                tint: WHITE_TINT,
                resolution: options.resolution,
                round_pixels: options.round_pixels,
            };
            clear_frame(&mut ctx, &options, clear, width, height)
                .and_then(|()| render_subtree(scene, root, &mut ctx))
        };

        self.canvas.restore();
        self.last_stats = stats;
        trace!(
            nodes = stats.nodes_drawn,
            shapes = stats.shapes_drawn,
            sprites = stats.sprites_drawn,
            texts = stats.texts_drawn,
            masks = stats.masks_pushed,
            skipped = stats.degenerate_skipped,
            "frame rendered"
        );
        result
    }
}

fn device_size(logical: u32, resolution: f64) -> u32 {
    let scaled = (f64::from(logical) * resolution).round();
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (scaled as u32).max(1)
    }
}

fn clear_frame(
    ctx: &mut DrawContext<'_>,
    options: &RendererOptions,
    clear: bool,
    width: f64,
    height: f64,
) -> StageResult<()> {
    if !clear {
        return Ok(());
    }
    ctx.canvas.clear_rect(0.0, 0.0, width, height)?;
    if options.background_alpha > 0.0 {
        ctx.canvas.set_global_alpha(options.background_alpha);
        ctx.canvas
            .set_fill_style(Paint::solid_hex(options.background_color, 1.0));
        ctx.canvas.fill_rect(0.0, 0.0, width, height)?;
        ctx.canvas.set_global_alpha(1.0);
    }
    Ok(())
}

fn render_subtree(scene: &mut Scene, id: NodeId, ctx: &mut DrawContext<'_>) -> StageResult<()> {
    let Some(node) = scene.slot(id) else {
        return Ok(());
    };
    if !node.visible || !node.renderable || node.world_alpha <= 0.0 {
        return Ok(());
    }

    let pushed = match node.mask {
        Some(mask) => push_mask(scene, mask, ctx),
        None => false,
    };
    let result = render_node(scene, id, ctx);
    if pushed {
        pop_mask(ctx);
    }
    result
}

fn render_node(scene: &mut Scene, id: NodeId, ctx: &mut DrawContext<'_>) -> StageResult<()> {
    if let Some(node) = scene.slot_mut(id) {
        if !matches!(node.content, NodeContent::Empty) {
            ctx.world = node.world_transform();
            ctx.world_alpha = node.world_alpha;
            ctx.tint = node.tint;
            node.content.draw(ctx)?;
            ctx.stats.nodes_drawn += 1;
        }
    }

    let mut index = 0;
    while let Some(child) = scene
        .slot(id)
        .and_then(|node| node.children.get(index).copied())
    {
        render_subtree(scene, child, ctx)?;
        index += 1;
    }
    Ok(())
}
