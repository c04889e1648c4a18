use std::rc::Rc;

use crate::error::StageResult;
use crate::math::{Matrix, PathSink};
use crate::render::Color;
use crate::text::TextMeasurer;
use crate::texture::PixelBuffer;

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Repeating image, optionally transformed in user space.
    Pattern {
        image: Rc<PixelBuffer>,
        matrix: Option<Matrix>,
    },
    LinearGradient {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stops: Vec<(f64, Color)>,
    },
}

impl Paint {
    #[must_use]
    pub fn solid_hex(hex: u32, alpha: f64) -> Self {
        Self::Solid(Color::from_hex(hex).with_alpha(alpha))
    }
}

/// Immediate-mode 2D drawing surface with HTML canvas semantics.
///
/// Path building comes from [`PathSink`] and text sizing from
/// [`TextMeasurer`]; painting operations report backend failures.
pub trait Canvas2d: PathSink + TextMeasurer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn resize(&mut self, width: u32, height: u32) -> StageResult<()>;

    fn save(&mut self);
    fn restore(&mut self);
    fn set_transform(&mut self, matrix: &Matrix);

    fn set_global_alpha(&mut self, alpha: f64);
    fn set_fill_style(&mut self, paint: Paint);
    fn set_stroke_style(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()>;
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()>;

    fn begin_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn fill(&mut self) -> StageResult<()>;
    fn stroke(&mut self) -> StageResult<()>;
    fn clip(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()>;

    /// Copies the `s*` source region of `image` into the `d*` destination
    /// rectangle in user space.
    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        image: &PixelBuffer,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> StageResult<()>;
}
