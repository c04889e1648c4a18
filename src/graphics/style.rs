use serde::{Deserialize, Serialize};

use crate::math::Matrix;
use crate::texture::Texture;

/// Pending or committed fill for a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub color: u32,
    pub alpha: f64,
    pub visible: bool,
    /// Texture painted as a repeating pattern instead of a flat color.
    pub texture: Option<Texture>,
    /// Pattern space transform for textured fills.
    pub matrix: Option<Matrix>,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            color: 0xFF_FFFF,
            alpha: 1.0,
            visible: false,
            texture: None,
            matrix: None,
        }
    }
}

impl FillStyle {
    #[must_use]
    pub fn solid(color: u32, alpha: f64) -> Self {
        Self {
            color,
            alpha,
            visible: alpha > 0.0,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stroke style. `alignment` is 0 for inner, 0.5 for centered and 1 for
/// outer strokes; `dash` is an on/off length pattern (empty = solid).
///
/// Only circle strokes honor `alignment`. Rectangle strokes are always
/// inset by half the line width, whatever the alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: u32,
    pub alpha: f64,
    pub alignment: f64,
    pub visible: bool,
    #[serde(default)]
    pub dash: Vec<f64>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 0.0,
            color: 0,
            alpha: 1.0,
            alignment: 0.5,
            visible: false,
            dash: Vec::new(),
        }
    }
}

impl LineStyle {
    #[must_use]
    pub fn new(width: f64, color: u32, alpha: f64) -> Self {
        Self {
            width,
            color,
            alpha,
            visible: width > 0.0 && alpha > 0.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: f64) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = dash;
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
