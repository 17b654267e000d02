//! Compositor and pipeline errors.

use overlaycast_common::OverlaycastError;
use overlaycast_overlay::OverlayError;

/// Errors raised by compositors and the processor pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    /// Fatal setup failure; the compositor instance stays in pass-through.
    #[error("{transformer} setup failed: {source}")]
    Setup {
        transformer: String,
        #[source]
        source: OverlayError,
    },

    /// `generate()` called again on an instance whose setup failed.
    #[error("{transformer} is unavailable: {reason}")]
    Unavailable { transformer: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Result type alias for compositor operations.
pub type CompositorResult<T> = Result<T, CompositorError>;

impl From<CompositorError> for OverlaycastError {
    fn from(err: CompositorError) -> Self {
        match err {
            CompositorError::Overlay(e) => e.into(),
            CompositorError::Config { message } => OverlaycastError::config(message),
            other => OverlaycastError::compositor(other.to_string()),
        }
    }
}
