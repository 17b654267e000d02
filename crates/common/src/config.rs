//! Application configuration.
//!
//! Values here are defaults for the overlay fields; command-line flags
//! override them per invocation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::OverlaycastResult;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// QR-code overlay defaults.
    pub qr: QrDefaults,

    /// Watermark overlay defaults.
    pub watermark: WatermarkDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default QR-code overlay parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrDefaults {
    /// Encoded text.
    pub text: String,

    /// Width of the QR data area in pixels (border excluded).
    pub width: u32,

    /// Height of the QR data area in pixels (border excluded).
    pub height: u32,

    /// Left offset on the video frame.
    pub x: i32,

    /// Top offset on the video frame.
    pub y: i32,

    /// Module color as a CSS hex string.
    pub color_dark: String,

    /// Background and quiet-zone color as a CSS hex string.
    pub color_light: String,

    /// Quiet-zone border size in pixels.
    pub border_size: u32,
}

/// Default watermark overlay parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkDefaults {
    /// Anchor name (`top-left`, `top-right`, `bottom-left`, `bottom-right`, `center`).
    pub position: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "overlaycast=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for QrDefaults {
    fn default() -> Self {
        Self {
            text: "https://developer.vonage.com/".to_string(),
            width: 128,
            height: 128,
            x: 0,
            y: 0,
            color_dark: "#000000".to_string(),
            color_light: "#ffffff".to_string(),
            border_size: 8,
        }
    }
}

impl Default for WatermarkDefaults {
    fn default() -> Self {
        Self {
            position: "bottom-right".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> OverlaycastResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config as pretty JSON to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> OverlaycastResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("overlaycast").join("config.json")
}
