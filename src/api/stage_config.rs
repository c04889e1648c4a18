use serde::{Deserialize, Serialize};

use crate::error::{StageError, StageResult};
use crate::interaction::InteractionConfig;
use crate::render::{DEFAULT_TINT_CACHE_CAPACITY, RendererOptions};

/// Logical stage size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Bootstrap configuration for a [`super::Stage`].
///
/// Serializable so hosts can keep stage setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub viewport: Viewport,
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    #[serde(default)]
    pub background_color: u32,
    #[serde(default)]
    pub background_alpha: f64,
    #[serde(default = "default_clear_before_render")]
    pub clear_before_render: bool,
    #[serde(default)]
    pub round_pixels: bool,
    #[serde(default = "default_tint_cache_capacity")]
    pub tint_cache_capacity: usize,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

impl StageConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            resolution: default_resolution(),
            background_color: 0x000000,
            background_alpha: 0.0,
            clear_before_render: default_clear_before_render(),
            round_pixels: false,
            tint_cache_capacity: default_tint_cache_capacity(),
            interaction: InteractionConfig::default(),
        }
    }

    /// Device pixels per logical pixel.
    #[must_use]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: u32, alpha: f64) -> Self {
        self.background_color = color;
        self.background_alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_clear_before_render(mut self, clear: bool) -> Self {
        self.clear_before_render = clear;
        self
    }

    #[must_use]
    pub fn with_round_pixels(mut self, round_pixels: bool) -> Self {
        self.round_pixels = round_pixels;
        self
    }

    #[must_use]
    pub fn with_tint_cache_capacity(mut self, capacity: usize) -> Self {
        self.tint_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            background_color: self.background_color,
            background_alpha: self.background_alpha,
            clear_before_render: self.clear_before_render,
            resolution: self.resolution,
            round_pixels: self.round_pixels,
            tint_cache_capacity: self.tint_cache_capacity,
        }
    }

    pub fn validate(&self) -> StageResult<()> {
        if !self.viewport.is_valid() {
            return Err(StageError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.renderer_options().validate()?;
        self.interaction.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> StageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StageError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> StageResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| StageError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_resolution() -> f64 {
    1.0
}

fn default_clear_before_render() -> bool {
    true
}

fn default_tint_cache_capacity() -> usize {
    DEFAULT_TINT_CACHE_CAPACITY
}
