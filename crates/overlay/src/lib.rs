//! Overlaycast Overlay Generation
//!
//! Renders the bitmap that the frame compositor stamps onto every frame:
//! - **QR code:** symbol matrix scaled into the data area, surrounded by a
//!   quiet-zone border filled with the light color
//! - **Watermark:** a user-selected image, mirrored horizontally to cancel
//!   the publisher's own mirror transform
//!
//! Generation runs once, synchronously, before any frame is processed.
//! This crate is pure computation apart from decoding watermark files.

pub mod bitmap;
pub mod color;
pub mod error;
pub mod placement;
pub mod qr;
pub mod watermark;

pub use bitmap::{OverlayBitmap, OverlaySource, MAX_SURFACE_DIMENSION};
pub use color::Color;
pub use error::{OverlayError, OverlayResult};
pub use placement::{Placement, Position, WatermarkPosition};
pub use qr::{ErrorCorrection, QrCodeConfig};
pub use watermark::{WatermarkConfig, WatermarkImage};

/// Something that can render an overlay bitmap ahead of the video stream.
pub trait OverlayGenerator: Send {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Where the bitmap is drawn on each frame.
    fn placement(&self) -> Placement;

    /// Render the overlay bitmap.
    ///
    /// Errors for which [`OverlayError::is_fatal`] is false mean the content
    /// could not be rendered and callers should fall back to pass-through.
    fn generate(&self) -> OverlayResult<OverlayBitmap>;
}
