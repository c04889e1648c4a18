use crate::error::{StageError, StageResult};
use crate::math::{Matrix, PathSink};
use crate::render::{Canvas2d, Color, Paint};
use crate::text::{TextMeasure, TextMeasurer};
use crate::texture::PixelBuffer;

/// Glyph advance of the fixed text model, as a fraction of the font size.
pub const RECORDING_ADVANCE: f64 = 0.6;
pub const RECORDING_ASCENT: f64 = 0.8;
pub const RECORDING_DESCENT: f64 = 0.2;

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Resize { width: u32, height: u32 },
    Save,
    Restore,
    SetTransform(Matrix),
    SetGlobalAlpha(f64),
    SetFillStyle(Paint),
    SetStrokeStyle(Paint),
    SetLineWidth(f64),
    SetLineDash(Vec<f64>),
    SetFont(String),
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    BezierCurveTo { cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64 },
    ClosePath,
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    Fill,
    Stroke,
    Clip,
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
    DrawImage {
        image_width: u32,
        image_height: u32,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct CanvasState {
    transform: Matrix,
    global_alpha: f64,
    fill_style: Paint,
    stroke_style: Paint,
    line_width: f64,
    line_dash: Vec<f64>,
    font: String,
    clip_depth: usize,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Matrix::IDENTITY,
            global_alpha: 1.0,
            fill_style: Paint::Solid(Color::rgb(0.0, 0.0, 0.0)),
            stroke_style: Paint::Solid(Color::rgb(0.0, 0.0, 0.0)),
            line_width: 1.0,
            line_dash: Vec::new(),
            font: "10px sans-serif".to_owned(),
            clip_depth: 0,
        }
    }
}

/// Headless canvas that records every call.
///
/// Text is measured with a fixed advance of `0.6 * font size` per
/// character, so layouts are deterministic across hosts.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<CanvasCommand>,
    state: CanvasState,
    stack: Vec<CanvasState>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> StageResult<Self> {
        if width == 0 || height == 0 {
            return Err(StageError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            commands: Vec::new(),
            state: CanvasState::default(),
            stack: Vec::new(),
        })
    }

    #[must_use]
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<CanvasCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&CanvasCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    #[must_use]
    pub fn current_transform(&self) -> Matrix {
        self.state.transform
    }

    #[must_use]
    pub fn global_alpha(&self) -> f64 {
        self.state.global_alpha
    }

    #[must_use]
    pub fn fill_style(&self) -> &Paint {
        &self.state.fill_style
    }

    #[must_use]
    pub fn stroke_style(&self) -> &Paint {
        &self.state.stroke_style
    }

    #[must_use]
    pub fn font(&self) -> &str {
        &self.state.font
    }

    /// Depth of the save stack; zero once every `save` has been restored.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.state.clip_depth
    }

    fn font_size(&self) -> f64 {
        self.state
            .font
            .split_whitespace()
            .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
            .unwrap_or(10.0)
    }
}

impl PathSink for RecordingCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(CanvasCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(CanvasCommand::LineTo { x, y });
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.commands.push(CanvasCommand::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(CanvasCommand::ClosePath);
    }
}

impl TextMeasurer for RecordingCanvas {
    fn set_font(&mut self, font: &str) {
        if self.state.font != font {
            self.state.font = font.to_owned();
            self.commands.push(CanvasCommand::SetFont(font.to_owned()));
        }
    }

    fn measure_text(&mut self, text: &str) -> TextMeasure {
        let size = self.font_size();
        TextMeasure {
            width: text.chars().count() as f64 * size * RECORDING_ADVANCE,
            ascent: size * RECORDING_ASCENT,
            descent: size * RECORDING_DESCENT,
        }
    }
}

impl Canvas2d for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> StageResult<()> {
        if width == 0 || height == 0 {
            return Err(StageError::InvalidViewport { width, height });
        }
        self.width = width;
        self.height = height;
        // resizing a canvas resets its drawing state
        self.state = CanvasState::default();
        self.stack.clear();
        self.commands.push(CanvasCommand::Resize { width, height });
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(CanvasCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.commands.push(CanvasCommand::Restore);
    }

    fn set_transform(&mut self, matrix: &Matrix) {
        self.state.transform = *matrix;
        self.commands.push(CanvasCommand::SetTransform(*matrix));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha;
        self.commands.push(CanvasCommand::SetGlobalAlpha(alpha));
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.state.fill_style = paint.clone();
        self.commands.push(CanvasCommand::SetFillStyle(paint));
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.state.stroke_style = paint.clone();
        self.commands.push(CanvasCommand::SetStrokeStyle(paint));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.commands.push(CanvasCommand::SetLineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.line_dash = segments.to_vec();
        self.commands.push(CanvasCommand::SetLineDash(segments.to_vec()));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.commands.push(CanvasCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.commands.push(CanvasCommand::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> StageResult<()> {
        self.commands.push(CanvasCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn begin_path(&mut self) {
        self.commands.push(CanvasCommand::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(CanvasCommand::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(CanvasCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn fill(&mut self) -> StageResult<()> {
        self.commands.push(CanvasCommand::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> StageResult<()> {
        self.commands.push(CanvasCommand::Stroke);
        Ok(())
    }

    fn clip(&mut self) {
        self.state.clip_depth += 1;
        self.commands.push(CanvasCommand::Clip);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()> {
        self.commands.push(CanvasCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> StageResult<()> {
        self.commands.push(CanvasCommand::StrokeText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
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
        self.commands.push(CanvasCommand::DrawImage {
            image_width: image.width(),
            image_height: image.height(),
            sx,
            sy,
            sw,
            sh,
            dx,
            dy,
            dw,
            dh,
        });
        Ok(())
    }
}
