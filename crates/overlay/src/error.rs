//! Overlay generation errors.

use thiserror::Error;

use overlaycast_common::OverlaycastError;

/// Errors raised while rendering an overlay bitmap.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The QR encoder rejected the input (e.g. text exceeds symbol capacity).
    #[error("QR encoding failed: {message}")]
    QrEncoding { message: String },

    /// The content renderer produced no pixels.
    #[error("Overlay source is empty: {what}")]
    EmptySource { what: String },

    /// The requested surface cannot be allocated.
    #[error("Unsupported rendering context: {width}x{height} surface (max {max} per side)")]
    UnsupportedContext { width: u64, height: u64, max: u32 },

    /// A color string could not be parsed.
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// A geometry field could not be parsed.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Unknown watermark anchor name.
    #[error("Unknown watermark position: {value}")]
    UnknownPosition { value: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

impl OverlayError {
    /// Whether the error disables the compositor instance entirely.
    ///
    /// Only context failures are fatal; every content failure degrades the
    /// compositor to pass-through instead.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OverlayError::UnsupportedContext { .. })
    }
}

impl From<OverlayError> for OverlaycastError {
    fn from(err: OverlayError) -> Self {
        match err {
            OverlayError::Io(e) => OverlaycastError::Io(e),
            OverlayError::InvalidColor { .. }
            | OverlayError::InvalidGeometry { .. }
            | OverlayError::UnknownPosition { .. } => OverlaycastError::config(err.to_string()),
            OverlayError::Image(e) => OverlaycastError::image(e.to_string()),
            other => OverlaycastError::overlay(other.to_string()),
        }
    }
}
