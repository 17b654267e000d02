//! Overlay bitmaps and the surfaces they are built from.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::color::Color;
use crate::error::{OverlayError, OverlayResult};

/// Largest surface side the renderer will allocate.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

/// Raw overlay content, resolved once at generation time.
#[derive(Debug, Clone)]
pub enum OverlaySource {
    /// Content drawn by the generator itself (e.g. a QR module matrix).
    Canvas(RgbaImage),
    /// Decoded image content (e.g. a watermark file).
    Image(RgbaImage),
}

impl OverlaySource {
    pub fn surface(&self) -> &RgbaImage {
        match self {
            OverlaySource::Canvas(s) | OverlaySource::Image(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OverlaySource::Canvas(_) => "canvas",
            OverlaySource::Image(_) => "image",
        }
    }

    pub fn is_empty(&self) -> bool {
        let s = self.surface();
        s.width() == 0 || s.height() == 0
    }
}

/// Check that a `width x height` surface can be allocated.
pub fn check_surface(width: u64, height: u64) -> OverlayResult<()> {
    let max = MAX_SURFACE_DIMENSION as u64;
    if width == 0 || height == 0 || width > max || height > max {
        return Err(OverlayError::UnsupportedContext {
            width,
            height,
            max: MAX_SURFACE_DIMENSION,
        });
    }
    Ok(())
}

/// A pre-rendered overlay, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBitmap {
    pixels: RgbaImage,
}

impl OverlayBitmap {
    /// Compose `source` into a bordered bitmap.
    ///
    /// The result measures `(data_width + 2*border, data_height + 2*border)`.
    /// It is pre-filled with `background`, which forms the border, and the
    /// source is copied into it at `(border, border)`, scaled to the data area
    /// when its size differs.
    pub fn compose(
        source: &OverlaySource,
        data_width: u32,
        data_height: u32,
        border: u32,
        background: Color,
    ) -> OverlayResult<Self> {
        let width = data_width as u64 + 2 * border as u64;
        let height = data_height as u64 + 2 * border as u64;
        check_surface(width, height)?;
        if source.is_empty() {
            return Err(OverlayError::EmptySource {
                what: format!("{} source", source.kind()),
            });
        }

        let mut pixels = RgbaImage::from_pixel(width as u32, height as u32, background.to_rgba());

        let surface = source.surface();
        if surface.dimensions() == (data_width, data_height) {
            imageops::replace(&mut pixels, surface, border as i64, border as i64);
        } else {
            let scaled = imageops::resize(surface, data_width, data_height, FilterType::Nearest);
            imageops::replace(&mut pixels, &scaled, border as i64, border as i64);
        }

        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_compose_adds_uniform_border() {
        let source = OverlaySource::Canvas(RgbaImage::from_pixel(4, 2, RED));
        let bitmap = OverlayBitmap::compose(&source, 4, 2, 3, Color::WHITE).unwrap();

        assert_eq!(bitmap.dimensions(), (10, 8));
        assert_eq!(*bitmap.pixels().get_pixel(0, 0), Color::WHITE.to_rgba());
        assert_eq!(*bitmap.pixels().get_pixel(2, 2), Color::WHITE.to_rgba());
        assert_eq!(*bitmap.pixels().get_pixel(3, 3), RED);
        assert_eq!(*bitmap.pixels().get_pixel(6, 4), RED);
        assert_eq!(*bitmap.pixels().get_pixel(7, 5), Color::WHITE.to_rgba());
    }

    #[test]
    fn test_compose_scales_source_to_data_area() {
        let source = OverlaySource::Image(RgbaImage::from_pixel(2, 2, RED));
        let bitmap = OverlayBitmap::compose(&source, 6, 6, 0, Color::TRANSPARENT).unwrap();
        assert_eq!(bitmap.dimensions(), (6, 6));
        assert!(bitmap.pixels().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_empty_source_is_not_fatal() {
        let source = OverlaySource::Image(RgbaImage::new(0, 0));
        let err = OverlayBitmap::compose(&source, 8, 8, 1, Color::WHITE).unwrap_err();
        assert!(matches!(err, OverlayError::EmptySource { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_oversized_surface_is_fatal() {
        let source = OverlaySource::Canvas(RgbaImage::from_pixel(1, 1, RED));
        let err =
            OverlayBitmap::compose(&source, MAX_SURFACE_DIMENSION, 10, 1, Color::WHITE).unwrap_err();
        assert!(err.is_fatal());
    }
}
