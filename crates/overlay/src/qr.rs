//! QR-code overlay generation.
//!
//! The symbol matrix is drawn into a `width x height` data surface (the
//! encoder's own quiet zone is not included), then composed onto a larger
//! surface filled with the light color so the border doubles as the quiet
//! zone scanners need.

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qrcode::{EcLevel, QrCode};

use overlaycast_common::config::QrDefaults;

use crate::bitmap::{check_surface, OverlayBitmap, OverlaySource};
use crate::color::Color;
use crate::error::{OverlayError, OverlayResult};
use crate::placement::{Placement, Position};
use crate::OverlayGenerator;

pub const DEFAULT_TEXT: &str = "https://developer.vonage.com/";
pub const DEFAULT_SIZE: u32 = 128;
pub const DEFAULT_BORDER: u32 = 8;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    #[default]
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Parameters of a QR-code overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCodeConfig {
    /// Encoded text. Empty text falls back to [`DEFAULT_TEXT`].
    pub text: String,
    /// Data area width in pixels. Zero falls back to [`DEFAULT_SIZE`].
    pub width: u32,
    /// Data area height in pixels. Zero falls back to [`DEFAULT_SIZE`].
    pub height: u32,
    /// Top-left offset on the frame.
    pub position: Position,
    pub color_dark: Color,
    /// Background color; also fills the quiet-zone border.
    pub color_light: Color,
    /// Quiet-zone width on each side, in pixels.
    pub border_size: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrCodeConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            position: Position::ORIGIN,
            color_dark: Color::BLACK,
            color_light: Color::WHITE,
            border_size: DEFAULT_BORDER,
            error_correction: ErrorCorrection::High,
        }
    }
}

impl QrCodeConfig {
    /// Config with the given text and data area, other fields at defaults.
    pub fn new(text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
            ..Self::default()
        }
        .normalized()
    }

    /// Build from configuration-file defaults.
    pub fn from_defaults(defaults: &QrDefaults) -> OverlayResult<Self> {
        Ok(Self {
            text: defaults.text.clone(),
            width: defaults.width,
            height: defaults.height,
            position: Position::new(defaults.x, defaults.y),
            color_dark: defaults.color_dark.parse()?,
            color_light: defaults.color_light.parse()?,
            border_size: defaults.border_size,
            error_correction: ErrorCorrection::High,
        }
        .normalized())
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_border(mut self, border_size: u32) -> Self {
        self.border_size = border_size;
        self
    }

    pub fn with_colors(mut self, dark: Color, light: Color) -> Self {
        self.color_dark = dark;
        self.color_light = light;
        self
    }

    /// Replace empty text and zero sizes with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.text.is_empty() {
            self.text = DEFAULT_TEXT.to_string();
        }
        if self.width == 0 {
            self.width = DEFAULT_SIZE;
        }
        if self.height == 0 {
            self.height = DEFAULT_SIZE;
        }
        self
    }

    /// Size of the bordered bitmap, in pixels.
    pub fn final_dimensions(&self) -> (u64, u64) {
        let border = 2 * self.border_size as u64;
        (self.width as u64 + border, self.height as u64 + border)
    }

    /// Render the module matrix into a `width x height` canvas.
    pub fn render_matrix(&self) -> OverlayResult<OverlaySource> {
        let code =
            QrCode::with_error_correction_level(self.text.as_bytes(), self.error_correction.into())
                .map_err(|e| OverlayError::QrEncoding {
                    message: e.to_string(),
                })?;

        let modules = code.width() as u64;
        if (self.width as u64) < modules || (self.height as u64) < modules {
            tracing::warn!(
                modules,
                width = self.width,
                height = self.height,
                "QR data area is smaller than the module count; code may not scan"
            );
        }

        let (w, h) = (self.width as u64, self.height as u64);
        let dark = self.color_dark.to_rgba();
        let mut surface = RgbaImage::from_pixel(self.width, self.height, self.color_light.to_rgba());

        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color != qrcode::Color::Dark {
                continue;
            }
            let (mx, my) = (i as u64 % modules, i as u64 / modules);
            let (x0, x1) = (mx * w / modules, (mx + 1) * w / modules);
            let (y0, y1) = (my * h / modules, (my + 1) * h / modules);
            if x1 > x0 && y1 > y0 {
                let cell = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
                draw_filled_rect_mut(&mut surface, cell, dark);
            }
        }

        Ok(OverlaySource::Canvas(surface))
    }
}

impl OverlayGenerator for QrCodeConfig {
    fn name(&self) -> &str {
        "qr-code"
    }

    fn placement(&self) -> Placement {
        Placement::Fixed(self.position)
    }

    fn generate(&self) -> OverlayResult<OverlayBitmap> {
        let (final_w, final_h) = self.final_dimensions();
        check_surface(final_w, final_h)?;

        let source = self.render_matrix()?;
        let bitmap = OverlayBitmap::compose(
            &source,
            self.width,
            self.height,
            self.border_size,
            self.color_light,
        )?;

        tracing::info!(
            width = bitmap.width(),
            height = bitmap.height(),
            "QR code with border generated"
        );
        Ok(bitmap)
    }
}

/// Parse a `"<width>x<height>"` size field such as `"256x256"`.
pub fn parse_size(value: &str) -> OverlayResult<(u32, u32)> {
    let invalid = || OverlayError::InvalidGeometry {
        message: format!("expected WIDTHxHEIGHT, got {value:?}"),
    };
    let (w, h) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w = w.trim().parse().map_err(|_| invalid())?;
    let h = h.trim().parse().map_err(|_| invalid())?;
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_dimensions_include_border() {
        let config = QrCodeConfig::new("https://example.com", 128, 128).with_border(8);
        let bitmap = config.generate().unwrap();
        assert_eq!(bitmap.dimensions(), (144, 144));
    }

    #[test]
    fn test_empty_fields_fall_back_to_defaults() {
        let config = QrCodeConfig::new("", 0, 0);
        assert_eq!(config.text, DEFAULT_TEXT);
        assert_eq!((config.width, config.height), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(config.border_size, DEFAULT_BORDER);
        assert_eq!(config.position, Position::ORIGIN);
    }

    #[test]
    fn test_border_uses_light_color() {
        let light = Color::rgb(250, 240, 200);
        let config = QrCodeConfig::new("border", 100, 100)
            .with_border(5)
            .with_colors(Color::BLACK, light);
        let bitmap = config.generate().unwrap();
        let px = bitmap.pixels();
        for i in 0..bitmap.width() {
            assert_eq!(*px.get_pixel(i, 0), light.to_rgba());
            assert_eq!(*px.get_pixel(i, 4), light.to_rgba());
            assert_eq!(*px.get_pixel(i, bitmap.height() - 1), light.to_rgba());
        }
    }

    #[test]
    fn test_finder_pattern_corner_is_dark() {
        let config = QrCodeConfig::new("finder", 210, 210).with_border(0);
        let bitmap = config.generate().unwrap();
        assert_eq!(*bitmap.pixels().get_pixel(0, 0), Color::BLACK.to_rgba());
        assert_eq!(
            *bitmap.pixels().get_pixel(bitmap.width() - 1, 0),
            Color::BLACK.to_rgba()
        );
    }

    #[test]
    fn test_oversized_text_is_a_content_failure() {
        let config = QrCodeConfig::new("x".repeat(5000), 128, 128);
        let err = config.generate().unwrap_err();
        assert!(matches!(err, OverlayError::QrEncoding { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_oversized_surface_is_fatal() {
        let config = QrCodeConfig::new("big", 16_384, 16).with_border(1);
        assert!(config.generate().unwrap_err().is_fatal());
    }

    #[test]
    fn test_parse_size_field() {
        assert_eq!(parse_size("256x256").unwrap(), (256, 256));
        assert_eq!(parse_size(" 64 X 32 ").unwrap(), (64, 32));
        assert!(parse_size("256").is_err());
        assert!(parse_size("ax2").is_err());
    }

    #[test]
    fn test_from_defaults_parses_colors() {
        let mut defaults = QrDefaults::default();
        defaults.color_dark = "#123".to_string();
        let config = QrCodeConfig::from_defaults(&defaults).unwrap();
        assert_eq!(config.color_dark, Color::rgb(0x11, 0x22, 0x33));

        defaults.color_light = "bogus".to_string();
        assert!(QrCodeConfig::from_defaults(&defaults).is_err());
    }
}
