//! Error types shared across Overlaycast crates.

/// Top-level error type for Overlaycast operations.
#[derive(Debug, thiserror::Error)]
pub enum OverlaycastError {
    #[error("Overlay error: {message}")]
    Overlay { message: String },

    #[error("Compositor error: {message}")]
    Compositor { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using OverlaycastError.
pub type OverlaycastResult<T> = Result<T, OverlaycastError>;

impl OverlaycastError {
    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay {
            message: msg.into(),
        }
    }

    pub fn compositor(msg: impl Into<String>) -> Self {
        Self::Compositor {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors_render_messages() {
        assert_eq!(
            OverlaycastError::config("bad size").to_string(),
            "Configuration error: bad size"
        );
        assert_eq!(
            OverlaycastError::image("truncated png").to_string(),
            "Image error: truncated png"
        );
    }

    #[test]
    fn test_io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = OverlaycastError::from(io);
        assert!(matches!(err, OverlaycastError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
