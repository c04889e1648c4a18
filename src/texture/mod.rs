//! Image resources: base textures wrapping one pixel resource, and textures
//! selecting a frame of a base texture.

mod resource;

pub use resource::{PixelBuffer, Resource};

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::{StageError, StageResult};
use crate::math::Rectangle;

static NEXT_BASE_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Owner of one drawable resource.
///
/// The resource binding is set-once: a second, different resource is an
/// invariant violation.
#[derive(Debug)]
pub struct BaseTexture {
    id: u64,
    resolution: f64,
    resource: Option<Resource>,
}

impl BaseTexture {
    #[must_use]
    pub fn new(resolution: f64) -> Self {
        Self {
            id: NEXT_BASE_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            resolution: if resolution > 0.0 { resolution } else { 1.0 },
            resource: None,
        }
    }

    #[must_use]
    pub fn from_resource(resource: Resource, resolution: f64) -> Self {
        let mut base = Self::new(resolution);
        base.resource = Some(resource);
        base
    }

    #[must_use]
    pub fn from_pixels(pixels: PixelBuffer) -> Rc<Self> {
        Rc::new(Self::from_resource(Resource::Pixels(pixels), 1.0))
    }

    pub fn set_resource(&mut self, resource: Resource) -> StageResult<()> {
        match &self.resource {
            Some(current) if *current == resource => Ok(()),
            Some(_) => Err(StageError::ResourceAlreadyBound),
            None => {
                debug!(
                    id = self.id,
                    width = resource.width(),
                    height = resource.height(),
                    "bind base texture resource"
                );
                self.resource = Some(resource);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Logical width (`real width / resolution`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.real_width() / self.resolution
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.real_height() / self.resolution
    }

    #[must_use]
    pub fn real_width(&self) -> f64 {
        self.resource.as_ref().map_or(0.0, |r| f64::from(r.width()))
    }

    #[must_use]
    pub fn real_height(&self) -> f64 {
        self.resource.as_ref().map_or(0.0, |r| f64::from(r.height()))
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    #[must_use]
    pub fn drawable_source(&self) -> Option<&PixelBuffer> {
        self.resource.as_ref().map(Resource::drawable_source)
    }
}

/// A frame within a shared base texture.
#[derive(Debug, Clone)]
pub struct Texture {
    base: Rc<BaseTexture>,
    frame: Rectangle,
    orig: Rectangle,
    trim: Option<Rectangle>,
    valid: bool,
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.base, &other.base)
            && self.frame == other.frame
            && self.orig == other.orig
            && self.trim == other.trim
    }
}

impl Texture {
    /// Creates a texture over `frame`, or over the whole base texture when
    /// `frame` is `None`.
    pub fn new(base: Rc<BaseTexture>, frame: Option<Rectangle>) -> StageResult<Self> {
        let frame =
            frame.unwrap_or_else(|| Rectangle::new(0.0, 0.0, base.width(), base.height()));
        let mut texture = Self {
            base,
            frame: Rectangle::EMPTY,
            orig: Rectangle::EMPTY,
            trim: None,
            valid: false,
        };
        texture.set_frame(frame)?;
        Ok(texture)
    }

    #[must_use]
    pub fn base_texture(&self) -> &Rc<BaseTexture> {
        &self.base
    }

    #[must_use]
    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// Original untrimmed size used for layout and anchoring.
    #[must_use]
    pub fn orig(&self) -> Rectangle {
        self.orig
    }

    #[must_use]
    pub fn trim(&self) -> Option<Rectangle> {
        self.trim
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replaces the frame. A frame reaching past the base texture is an
    /// error, never clamped.
    pub fn set_frame(&mut self, frame: Rectangle) -> StageResult<()> {
        let base_width = self.base.width();
        let base_height = self.base.height();
        let x_not_fit = frame.x + frame.width > base_width;
        let y_not_fit = frame.y + frame.height > base_height;

        if x_not_fit || y_not_fit || frame.x < 0.0 || frame.y < 0.0 {
            return Err(StageError::FrameOutOfBounds {
                x: frame.x,
                y: frame.y,
                width: frame.width,
                height: frame.height,
                base_width,
                base_height,
            });
        }

        self.frame = frame;
        self.valid = frame.width > 0.0 && frame.height > 0.0 && self.base.is_valid();
        if self.trim.is_none() {
            self.orig = frame;
        }
        Ok(())
    }

    /// Marks the frame as a trimmed region of a larger original image.
    pub fn set_trim(&mut self, orig: Rectangle, trim: Rectangle) {
        self.orig = orig;
        self.trim = Some(trim);
    }
}
