use serde::{Deserialize, Serialize};

use crate::error::{StageError, StageResult};

/// Neutral tint: multiplying by white leaves a color unchanged.
pub const WHITE_TINT: u32 = 0x00FF_FFFF;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let (r, g, b) = hex_channels(hex);
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Packs the RGB channels back into `0xRRGGBB`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.red) << 16) | (channel(self.green) << 8) | channel(self.blue)
    }

    /// `#rrggbb` string as used by canvas fill and stroke styles.
    #[must_use]
    pub fn to_css_hex(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    pub fn validate(self) -> StageResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(StageError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[must_use]
pub fn hex_channels(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

#[must_use]
pub fn channels_to_hex(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Multiplies `color` by `tint` channel-wise: `(c / 255) * (t / 255) * 255`.
#[must_use]
pub fn apply_tint(color: u32, tint: u32) -> u32 {
    if tint & WHITE_TINT == WHITE_TINT {
        return color & WHITE_TINT;
    }

    let (cr, cg, cb) = hex_channels(color);
    let (tr, tg, tb) = hex_channels(tint);
    let mul = |c: u8, t: u8| {
        ((f64::from(c) / 255.0) * (f64::from(t) / 255.0) * 255.0).round() as u8
    };
    channels_to_hex(mul(cr, tr), mul(cg, tg), mul(cb, tb))
}

/// Quantizes each channel to a multiple of `step` (clamped to 255) so that
/// near-identical tints share one cached pattern.
#[must_use]
pub fn round_color(color: u32, step: u8) -> u32 {
    if step <= 1 {
        return color & WHITE_TINT;
    }

    let step = f64::from(step);
    let (r, g, b) = hex_channels(color);
    let round = |c: u8| ((f64::from(c) / step).round() * step).min(255.0) as u8;
    channels_to_hex(round(r), round(g), round(b))
}
