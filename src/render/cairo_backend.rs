use cairo::{Context, Extend, Format, ImageSurface, LinearGradient, Operator, SurfacePattern};
use pango::FontDescription;
use tracing::{debug, warn};

use crate::error::{StageError, StageResult};
use crate::math::{Matrix, PathSink};
use crate::render::{Canvas2d, Color, Paint};
use crate::text::{TextMeasure, TextMeasurer};
use crate::texture::PixelBuffer;

#[derive(Debug, Clone)]
struct PaintState {
    global_alpha: f64,
    fill_style: Paint,
    stroke_style: Paint,
    font: String,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            fill_style: Paint::solid_hex(0x000000, 1.0),
            stroke_style: Paint::solid_hex(0x000000, 1.0),
            font: "10px sans-serif".to_owned(),
        }
    }
}

#[derive(Debug)]
enum Target {
    /// Offscreen surface owned by the canvas.
    Surface(ImageSurface),
    /// Context borrowed from a host toolkit draw callback.
    External { width: u32, height: u32 },
}

/// Cairo + Pango + PangoCairo implementation of [`Canvas2d`].
///
/// Two modes:
/// - offscreen image-surface rendering through [`CairoCanvas::new`]
/// - in-place rendering on an external Cairo context (for example a GTK
///   `DrawingArea` callback) through [`CairoCanvas::for_context`]
///
/// Cairo keeps transform, clip, line width and dash in its own graphics
/// state; alpha, paints and font are tracked alongside it so `save` and
/// `restore` cover both.
#[derive(Debug)]
pub struct CairoCanvas {
    target: Target,
    context: Context,
    state: PaintState,
    stack: Vec<PaintState>,
    font_description: FontDescription,
}

impl CairoCanvas {
    pub fn new(width: u32, height: u32) -> StageResult<Self> {
        let surface = create_surface(width, height)?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self::with_target(Target::Surface(surface), context))
    }

    /// Draws into `context`, which the host keeps ownership of.
    pub fn for_context(context: Context, width: u32, height: u32) -> StageResult<Self> {
        if width == 0 || height == 0 {
            return Err(StageError::InvalidViewport { width, height });
        }
        Ok(Self::with_target(Target::External { width, height }, context))
    }

    fn with_target(target: Target, context: Context) -> Self {
        let state = PaintState::default();
        let font_description = css_font_description(&state.font);
        Self {
            target,
            context,
            state,
            stack: Vec::new(),
            font_description,
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Offscreen surface, `None` when drawing into an external context.
    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        match &self.target {
            Target::Surface(surface) => Some(surface),
            Target::External { .. } => None,
        }
    }

    /// Flushes the surface and copies it out as straight-alpha RGBA.
    pub fn snapshot(&self) -> StageResult<PixelBuffer> {
        let Target::Surface(surface) = &self.target else {
            return Err(StageError::InvalidData(
                "external cairo contexts cannot be snapshotted".to_owned(),
            ));
        };
        surface.flush();
        let width = u32::try_from(surface.width()).unwrap_or_default();
        let height = u32::try_from(surface.height()).unwrap_or_default();
        let stride = usize::try_from(surface.stride()).unwrap_or_default();

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        surface
            .with_data(|data| {
                for row in data.chunks(stride).take(height as usize) {
                    for pixel in row.chunks_exact(4).take(width as usize) {
                        let argb = u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
                        rgba.extend_from_slice(&unpremultiply(argb));
                    }
                }
            })
            .map_err(|err| StageError::Backend(format!("failed to read surface data: {err}")))?;
        PixelBuffer::from_rgba(width, height, rgba)
    }

    /// Runs `paint_op` with `paint` as the source at the current global
    /// alpha, keeping the current path.
    fn with_source(
        &self,
        paint: &Paint,
        what: &str,
        paint_op: impl FnOnce(&Context) -> Result<(), cairo::Error>,
    ) -> StageResult<()> {
        let alpha = self.state.global_alpha;
        match paint {
            Paint::Solid(color) => {
                self.context
                    .set_source_rgba(color.red, color.green, color.blue, color.alpha * alpha);
                paint_op(&self.context).map_err(|err| map_backend_error(what, err))
            }
            other => {
                self.context.push_group();
                let drawn =
                    apply_pattern(&self.context, other).and_then(|()| paint_op(&self.context));
                let composed = self
                    .context
                    .pop_group_to_source()
                    .and_then(|()| self.context.paint_with_alpha(alpha));
                drawn
                    .and(composed)
                    .map_err(|err| map_backend_error(what, err))
            }
        }
    }

    /// Runs `draw` on a fresh path, then restores the path that was being
    /// built.
    fn with_detached_path(
        &self,
        what: &str,
        draw: impl FnOnce(&Self) -> StageResult<()>,
    ) -> StageResult<()> {
        let saved = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error(what, err))?;
        self.context.new_path();
        let result = draw(self);
        self.context.new_path();
        self.context.append_path(&saved);
        result
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&self.font_description));
        layout.set_text(text);
        layout
    }

    fn text_path(&self, text: &str, x: f64, y: f64) {
        let layout = self.layout(text);
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        self.context.move_to(x, y - baseline);
        pangocairo::functions::layout_path(&self.context, &layout);
    }
}

impl PathSink for CairoCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.context.curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }
}

impl TextMeasurer for CairoCanvas {
    fn set_font(&mut self, font: &str) {
        if self.state.font != font {
            self.state.font = font.to_owned();
            self.font_description = css_font_description(font);
        }
    }

    fn measure_text(&mut self, text: &str) -> TextMeasure {
        let layout = self.layout(text);
        let (_ink, logical) = layout.pixel_extents();
        let ascent = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        TextMeasure {
            width: f64::from(logical.width()),
            ascent,
            descent: (f64::from(logical.height()) - ascent).max(0.0),
        }
    }
}

impl Canvas2d for CairoCanvas {
    fn width(&self) -> u32 {
        match &self.target {
            Target::Surface(surface) => u32::try_from(surface.width()).unwrap_or_default(),
            Target::External { width, .. } => *width,
        }
    }

    fn height(&self) -> u32 {
        match &self.target {
            Target::Surface(surface) => u32::try_from(surface.height()).unwrap_or_default(),
            Target::External { height, .. } => *height,
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> StageResult<()> {
        match &mut self.target {
            Target::Surface(_) => {
                let surface = create_surface(width, height)?;
                self.context = Context::new(&surface)
                    .map_err(|err| map_backend_error("failed to create cairo context", err))?;
                self.target = Target::Surface(surface);
            }
            Target::External {
                width: current_width,
                height: current_height,
            } => {
                if width == 0 || height == 0 {
                    return Err(StageError::InvalidViewport { width, height });
                }
                *current_width = width;
                *current_height = height;
            }
        }
        self.state = PaintState::default();
        self.stack.clear();
        self.font_description = css_font_description(&self.state.font);
        debug!(width, height, "cairo canvas resized");
        Ok(())
    }

    fn save(&mut self) {
        if let Err(err) = self.context.save() {
            warn!(%err, "cairo save failed");
        }
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Err(err) = self.context.restore() {
            warn!(%err, "cairo restore failed");
        }
        if let Some(state) = self.stack.pop() {
            if state.font != self.state.font {
                self.font_description = css_font_description(&state.font);
            }
            self.state = state;
        }
    }

    fn set_transform(&mut self, matrix: &Matrix) {
        let determinant = matrix.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            warn!(?matrix, "ignoring non-invertible transform");
            return;
        }
        self.context.set_matrix(cairo::Matrix::new(
            matrix.a, matrix.b, matrix.c, matrix.d, matrix.tx, matrix.ty,
        ));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.state.fill_style = paint;
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.state.stroke_style = paint;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.context.set_dash(segments, 0.0);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.with_detached_path("failed to clear rectangle", |canvas| {
            let context = &canvas.context;
            context
                .save()
                .map_err(|err| map_backend_error("failed to clear rectangle", err))?;
            context.set_operator(Operator::Clear);
            context.rectangle(x, y, width, height);
            let filled = context.fill();
            context
                .restore()
                .and(filled)
                .map_err(|err| map_backend_error("failed to clear rectangle", err))
        })
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.with_detached_path("failed to fill rectangle", |canvas| {
            canvas.context.rectangle(x, y, width, height);
            canvas.with_source(
                &canvas.state.fill_style,
                "failed to fill rectangle",
                Context::fill_preserve,
            )
        })
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.with_detached_path("failed to stroke rectangle", |canvas| {
            canvas.context.rectangle(x, y, width, height);
            canvas.with_source(
                &canvas.state.stroke_style,
                "failed to stroke rectangle",
                Context::stroke_preserve,
            )
        })
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rectangle(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(x, y, radius, start_angle, end_angle);
    }

    fn fill(&mut self) -> StageResult<()> {
        self.with_source(&self.state.fill_style, "failed to fill path", Context::fill_preserve)
    }

    fn stroke(&mut self) -> StageResult<()> {
        self.with_source(
            &self.state.stroke_style,
            "failed to stroke path",
            Context::stroke_preserve,
        )
    }

    fn clip(&mut self) {
        self.context.clip_preserve();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()> {
        self.with_detached_path("failed to fill text", |canvas| {
            canvas.text_path(text, x, y);
            canvas.with_source(
                &canvas.state.fill_style,
                "failed to fill text",
                Context::fill_preserve,
            )
        })
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()> {
        self.with_detached_path("failed to stroke text", |canvas| {
            canvas.text_path(text, x, y);
            canvas.with_source(
                &canvas.state.stroke_style,
                "failed to stroke text",
                Context::stroke_preserve,
            )
        })
    }

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
    ) -> StageResult<()> {
        if sw <= 0.0 || sh <= 0.0 || dw == 0.0 || dh == 0.0 {
            return Ok(());
        }
        let surface = pixel_surface(image)?;
        let alpha = self.state.global_alpha;
        self.with_detached_path("failed to draw image", |canvas| {
            let context = &canvas.context;
            context
                .save()
                .map_err(|err| map_backend_error("failed to draw image", err))?;
            context.rectangle(dx, dy, dw, dh);
            context.clip();
            context.translate(dx, dy);
            context.scale(dw / sw, dh / sh);
            let painted = context
                .set_source_surface(&surface, -sx, -sy)
                .and_then(|()| context.paint_with_alpha(alpha));
            context
                .restore()
                .and(painted)
                .map_err(|err| map_backend_error("failed to draw image", err))
        })
    }
}

fn apply_pattern(context: &Context, paint: &Paint) -> Result<(), cairo::Error> {
    match paint {
        Paint::Solid(color) => {
            context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
            Ok(())
        }
        Paint::Pattern { image, matrix } => {
            let surface = pixel_surface(image).map_err(|_| cairo::Error::InvalidSize)?;
            let pattern = SurfacePattern::create(&surface);
            pattern.set_extend(Extend::Repeat);
            if let Some(matrix) = matrix {
                // cairo pattern matrices map user space into pattern space
                let inverse = matrix.inverted();
                pattern.set_matrix(cairo::Matrix::new(
                    inverse.a, inverse.b, inverse.c, inverse.d, inverse.tx, inverse.ty,
                ));
            }
            context.set_source(&pattern)
        }
        Paint::LinearGradient {
            x0,
            y0,
            x1,
            y1,
            stops,
        } => {
            let gradient = LinearGradient::new(*x0, *y0, *x1, *y1);
            for (offset, color) in stops {
                add_stop(&gradient, *offset, *color);
            }
            context.set_source(&gradient)
        }
    }
}

fn add_stop(gradient: &LinearGradient, offset: f64, color: Color) {
    gradient.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha);
}

fn create_surface(width: u32, height: u32) -> StageResult<ImageSurface> {
    let (Ok(surface_width), Ok(surface_height)) = (i32::try_from(width), i32::try_from(height))
    else {
        return Err(StageError::InvalidViewport { width, height });
    };
    if surface_width == 0 || surface_height == 0 {
        return Err(StageError::InvalidViewport { width, height });
    }
    ImageSurface::create(Format::ARgb32, surface_width, surface_height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

/// Converts straight RGBA into a premultiplied ARGB32 surface.
fn pixel_surface(image: &PixelBuffer) -> StageResult<ImageSurface> {
    let width = i32::try_from(image.width())
        .map_err(|_| StageError::InvalidData("image too wide for cairo".to_owned()))?;
    let height = i32::try_from(image.height())
        .map_err(|_| StageError::InvalidData("image too tall for cairo".to_owned()))?;
    let stride = Format::ARgb32
        .stride_for_width(image.width())
        .map_err(|err| map_backend_error("failed to compute image stride", err))?;
    let row_bytes = usize::try_from(stride).unwrap_or_default();

    let mut data = vec![0_u8; row_bytes * image.height() as usize];
    for (index, pixel) in image.data().chunks_exact(4).enumerate() {
        let row = index / image.width() as usize;
        let column = index % image.width() as usize;
        let offset = row * row_bytes + column * 4;
        let argb = premultiply([pixel[0], pixel[1], pixel[2], pixel[3]]);
        data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
        .map_err(|err| map_backend_error("failed to create image surface", err))
}

fn premultiply([red, green, blue, alpha]: [u8; 4]) -> u32 {
    let scale = |channel: u8| (u32::from(channel) * u32::from(alpha) + 127) / 255;
    (u32::from(alpha) << 24) | (scale(red) << 16) | (scale(green) << 8) | scale(blue)
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let alpha = (argb >> 24) & 0xFF;
    if alpha == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |shift: u32| {
        let value = (argb >> shift) & 0xFF;
        ((value * 255 + alpha / 2) / alpha).min(255) as u8
    };
    [channel(16), channel(8), channel(0), alpha as u8]
}

/// Builds a Pango description from a CSS `font` shorthand such as
/// `italic normal bold 26px "Open Sans", sans-serif`.
fn css_font_description(font: &str) -> FontDescription {
    let mut description = FontDescription::new();
    let Some(size_at) = font
        .split_whitespace()
        .position(|token| token.ends_with("px"))
    else {
        description.set_family("sans-serif");
        return description;
    };

    let tokens: Vec<&str> = font.split_whitespace().collect();
    for token in &tokens[..size_at] {
        match *token {
            "italic" => description.set_style(pango::Style::Italic),
            "oblique" => description.set_style(pango::Style::Oblique),
            "bold" | "bolder" => description.set_weight(pango::Weight::Bold),
            "lighter" => description.set_weight(pango::Weight::Light),
            numeric => {
                if let Ok(weight) = numeric.parse::<u32>() {
                    description.set_weight(weight_from_css(weight));
                }
            }
        }
    }

    if let Some(size) = tokens[size_at]
        .strip_suffix("px")
        .and_then(|size| size.parse::<f64>().ok())
    {
        description.set_absolute_size(size * f64::from(pango::SCALE));
    }

    let families: Vec<String> = tokens[size_at + 1..]
        .join(" ")
        .split(',')
        .map(|family| family.trim().trim_matches(['"', '\'']).to_owned())
        .filter(|family| !family.is_empty())
        .collect();
    let families = if families.is_empty() {
        "sans-serif".to_owned()
    } else {
        families.join(",")
    };
    description.set_family(&families);
    description
}

fn weight_from_css(weight: u32) -> pango::Weight {
    match weight {
        0..=149 => pango::Weight::Thin,
        150..=249 => pango::Weight::Ultralight,
        250..=349 => pango::Weight::Light,
        350..=449 => pango::Weight::Normal,
        450..=549 => pango::Weight::Medium,
        550..=649 => pango::Weight::Semibold,
        650..=749 => pango::Weight::Bold,
        750..=849 => pango::Weight::Ultrabold,
        _ => pango::Weight::Heavy,
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> StageError {
    StageError::Backend(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{premultiply, unpremultiply};

    #[test]
    fn premultiplied_pixels_round_trip_opaque_colors() {
        let argb = premultiply([200, 100, 50, 255]);
        assert_eq!(unpremultiply(argb), [200, 100, 50, 255]);
        assert_eq!(unpremultiply(premultiply([9, 9, 9, 0])), [0, 0, 0, 0]);
    }
}
