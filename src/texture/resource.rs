use crate::error::{StageError, StageResult};

/// Canvas-like RGBA8 pixel store (straight alpha, row-major, no padding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> StageResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(StageError::InvalidData(format!(
                "pixel data length {} does not match {width}x{height} rgba ({expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer filled with one opaque color.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with every color channel multiplied by the matching `tint`
    /// channel; alpha is preserved.
    #[must_use]
    pub fn tinted(&self, tint: u32) -> Self {
        let (tr, tg, tb) = crate::render::hex_channels(tint);
        let mul = |c: u8, t: u8| ((u16::from(c) * u16::from(t) + 127) / 255) as u8;
        let data = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [mul(px[0], tr), mul(px[1], tg), mul(px[2], tb), px[3]])
            .collect();
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Source bound to a base texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Pixels(PixelBuffer),
}

impl Resource {
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            Self::Pixels(buffer) => buffer.width(),
        }
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Self::Pixels(buffer) => buffer.height(),
        }
    }

    #[must_use]
    pub fn drawable_source(&self) -> &PixelBuffer {
        match self {
            Self::Pixels(buffer) => buffer,
        }
    }
}
