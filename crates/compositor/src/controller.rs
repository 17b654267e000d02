//! Overlay controls: mode selection, form fields, apply and clear.
//!
//! Holds the state a control panel edits (selected mode, QR fields, the
//! chosen watermark image) and turns it into a compositor installed on a
//! [`VideoPublisher`].

use std::fmt;
use std::str::FromStr;

use overlaycast_common::AppConfig;
use overlaycast_overlay::qr::parse_size;
use overlaycast_overlay::{
    Position, QrCodeConfig, WatermarkConfig, WatermarkImage, WatermarkPosition,
};

use crate::compositor::{CompositorState, FrameCompositor};
use crate::error::{CompositorError, CompositorResult};
use crate::processor::{MediaProcessor, ProcessorConnector};
use crate::publisher::VideoPublisher;

/// Which overlay the controller applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayMode {
    #[default]
    QrCode,
    Watermark,
}

impl FromStr for OverlayMode {
    type Err = CompositorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "qr-code" | "qr" => Ok(OverlayMode::QrCode),
            "watermark" => Ok(OverlayMode::Watermark),
            other => Err(CompositorError::Config {
                message: format!("unknown overlay mode {other:?}; use qr-code or watermark"),
            }),
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlayMode::QrCode => "qr-code",
            OverlayMode::Watermark => "watermark",
        })
    }
}

/// Editable overlay settings.
#[derive(Debug, Clone)]
pub struct OverlayController {
    mode: OverlayMode,
    qr: QrCodeConfig,
    watermark_image: Option<WatermarkImage>,
    watermark_position: WatermarkPosition,
}

impl OverlayController {
    /// Controller seeded from configuration defaults.
    pub fn new(config: &AppConfig) -> CompositorResult<Self> {
        Ok(Self {
            mode: OverlayMode::default(),
            qr: QrCodeConfig::from_defaults(&config.qr)?,
            watermark_image: None,
            watermark_position: config.watermark.position.parse()?,
        })
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn select_mode(&mut self, mode: OverlayMode) {
        self.mode = mode;
    }

    pub fn qr_config(&self) -> &QrCodeConfig {
        &self.qr
    }

    /// Update the QR form fields. `size` uses the `"<w>x<h>"` form.
    pub fn set_qr_fields(
        &mut self,
        text: &str,
        size: &str,
        x: Option<i32>,
        y: Option<i32>,
    ) -> CompositorResult<()> {
        let (width, height) = parse_size(size)?;
        self.qr = QrCodeConfig {
            text: text.to_string(),
            width,
            height,
            position: Position::from_fields(x, y),
            ..self.qr.clone()
        }
        .normalized();
        Ok(())
    }

    /// Replace the full QR configuration.
    pub fn set_qr_config(&mut self, config: QrCodeConfig) {
        self.qr = config.normalized();
    }

    pub fn select_watermark(&mut self, image: WatermarkImage) {
        tracing::debug!(
            width = image.natural_width(),
            height = image.natural_height(),
            "Watermark image selected"
        );
        self.watermark_image = Some(image);
    }

    pub fn watermark_image(&self) -> Option<&WatermarkImage> {
        self.watermark_image.as_ref()
    }

    pub fn set_watermark_position(&mut self, position: WatermarkPosition) {
        self.watermark_position = position;
    }

    /// Build a compositor for the current mode.
    ///
    /// Returns `None` in watermark mode when no image has been selected.
    pub fn build_compositor(&self) -> Option<FrameCompositor> {
        match self.mode {
            OverlayMode::QrCode => Some(FrameCompositor::qr_code(self.qr.clone())),
            OverlayMode::Watermark => {
                let image = self.watermark_image.clone()?;
                Some(FrameCompositor::watermark(WatermarkConfig::new(
                    image,
                    self.watermark_position,
                )))
            }
        }
    }

    /// Install a fresh compositor for the current mode on `publisher`.
    ///
    /// Returns whether frames will actually carry the overlay:
    /// - `Ok(false)` without touching the publisher when watermark mode has
    ///   no image.
    /// - `Ok(false)` with the connector installed when the overlay could not
    ///   be rendered and the compositor passes frames through.
    ///
    /// A fatal setup error leaves the current connector alone.
    pub fn apply(&self, publisher: &mut VideoPublisher) -> CompositorResult<bool> {
        let Some(mut compositor) = self.build_compositor() else {
            tracing::warn!("No watermark image selected");
            return Ok(false);
        };

        compositor.generate()?;
        let overlay_ready = *compositor.state() == CompositorState::OverlayReady;

        let mut processor = MediaProcessor::with_compositor(compositor);
        processor.start()?;
        publisher.set_video_processor_connector(Some(ProcessorConnector::new(processor)));
        if overlay_ready {
            tracing::info!(mode = %self.mode, "Overlay applied");
        } else {
            tracing::warn!(mode = %self.mode, "Overlay unavailable; frames pass through");
        }
        Ok(overlay_ready)
    }

    /// Remove any overlay from `publisher`.
    pub fn clear(&self, publisher: &mut VideoPublisher) {
        publisher.set_video_processor_connector(None);
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::frame::VideoFrame;

    fn controller() -> OverlayController {
        OverlayController::new(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_mode_names_parse() {
        assert_eq!("qr-code".parse::<OverlayMode>().unwrap(), OverlayMode::QrCode);
        assert_eq!(
            "watermark".parse::<OverlayMode>().unwrap(),
            OverlayMode::Watermark
        );
        assert!("sticker".parse::<OverlayMode>().is_err());
    }

    #[test]
    fn test_qr_fields_update_geometry() {
        let mut controller = controller();
        controller
            .set_qr_fields("https://example.com", "256x200", Some(12), None)
            .unwrap();
        let qr = controller.qr_config();
        assert_eq!((qr.width, qr.height), (256, 200));
        assert_eq!(qr.position, Position::new(12, 0));
        assert_eq!(qr.border_size, 8);

        assert!(controller.set_qr_fields("x", "big", None, None).is_err());
        assert_eq!(controller.qr_config().width, 256);
    }

    #[test]
    fn test_watermark_without_image_is_a_no_op() {
        let mut controller = controller();
        controller.select_mode(OverlayMode::Watermark);
        let mut publisher = VideoPublisher::new();

        assert!(!controller.apply(&mut publisher).unwrap());
        assert!(!publisher.has_connector());
    }

    #[test]
    fn test_apply_then_clear() {
        let mut controller = controller();
        controller.select_mode(OverlayMode::Watermark);
        controller.select_watermark(WatermarkImage::from_rgba(RgbaImage::from_pixel(
            4,
            4,
            Rgba([0, 0, 255, 255]),
        )));
        let mut publisher = VideoPublisher::new();

        assert!(controller.apply(&mut publisher).unwrap());
        assert_eq!(
            publisher.connector().unwrap().processor().transformer_names(),
            vec!["watermark"]
        );

        controller.clear(&mut publisher);
        assert!(!publisher.has_connector());
    }

    #[test]
    fn test_fatal_setup_keeps_previous_connector() {
        let mut controller = controller();
        let mut publisher = VideoPublisher::new();
        assert!(controller.apply(&mut publisher).unwrap());

        controller.set_qr_config(QrCodeConfig::new("huge", 30_000, 10));
        assert!(controller.apply(&mut publisher).is_err());
        assert!(publisher.has_connector());
    }

    #[test]
    fn test_unrenderable_overlay_reports_pass_through() {
        let mut controller = controller();
        controller.set_qr_config(QrCodeConfig::new("#".repeat(5000), 128, 128));
        let mut publisher = VideoPublisher::new();

        assert!(!controller.apply(&mut publisher).unwrap());
        assert!(publisher.has_connector());

        let frame = VideoFrame::new(RgbaImage::from_pixel(16, 16, Rgba([7, 8, 9, 255])), 5);
        assert_eq!(publisher.publish(frame.clone()), frame);
    }
}
