//! Watermark overlay generation.

use std::path::Path;
use std::sync::Arc;

use image::imageops;
use image::RgbaImage;

use crate::bitmap::{check_surface, OverlayBitmap, OverlaySource};
use crate::color::Color;
use crate::error::{OverlayError, OverlayResult};
use crate::placement::{Placement, WatermarkPosition};
use crate::OverlayGenerator;

/// A decoded watermark image as selected by the user.
///
/// Cloning is cheap; pixel data is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkImage {
    pixels: Arc<RgbaImage>,
}

impl WatermarkImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decode an image file (format guessed from its contents).
    pub fn open(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory image file.
    pub fn from_bytes(bytes: &[u8]) -> OverlayResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Horizontal mirror at natural size.
    ///
    /// The publisher mirrors its local video; drawing the mirrored watermark
    /// makes it read correctly once that transform is applied.
    pub fn mirrored(&self) -> RgbaImage {
        imageops::flip_horizontal(self.pixels.as_ref())
    }
}

/// Parameters of a watermark overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkConfig {
    pub image: WatermarkImage,
    pub position: WatermarkPosition,
}

impl WatermarkConfig {
    pub fn new(image: WatermarkImage, position: WatermarkPosition) -> Self {
        Self { image, position }
    }
}

impl OverlayGenerator for WatermarkConfig {
    fn name(&self) -> &str {
        "watermark"
    }

    fn placement(&self) -> Placement {
        Placement::Anchored(self.position)
    }

    fn generate(&self) -> OverlayResult<OverlayBitmap> {
        let (width, height) = (self.image.natural_width(), self.image.natural_height());
        if width == 0 || height == 0 {
            return Err(OverlayError::EmptySource {
                what: "watermark image".to_string(),
            });
        }
        check_surface(width as u64, height as u64)?;

        let source = OverlaySource::Image(self.image.mirrored());
        let bitmap = OverlayBitmap::compose(&source, width, height, 0, Color::TRANSPARENT)?;

        tracing::info!(
            width,
            height,
            position = %self.position,
            "Watermark bitmap generated"
        );
        Ok(bitmap)
    }
}
