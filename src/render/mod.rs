//! Canvas rendering: the 2D canvas contract, backends and the frame driver.
//!
//! Node content paints itself through [`crate::scene::Drawable`]; the
//! [`CanvasRenderer`] walks the scene each frame, pushing mask clips and
//! handing every visible node a [`DrawContext`].

mod canvas;
mod color;
mod context;
mod graphics_renderer;
mod mask;
mod recording_canvas;
mod renderer;
mod sprite_renderer;
mod text_renderer;
mod tint_cache;

pub use canvas::{Canvas2d, Paint};
pub use color::{Color, WHITE_TINT, apply_tint, channels_to_hex, hex_channels, round_color};
pub use context::{DrawContext, RenderStats};
pub use recording_canvas::{
    CanvasCommand, RECORDING_ADVANCE, RECORDING_ASCENT, RECORDING_DESCENT, RecordingCanvas,
};
pub use renderer::{CanvasRenderer, RenderPass, RendererOptions};
pub use tint_cache::{DEFAULT_TINT_CACHE_CAPACITY, TINT_ROUND_STEP, TintCache};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
