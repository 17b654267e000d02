//! Where an overlay lands on a frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Top-left offset of an overlay on the video frame, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a position from optional form fields; absent values become 0.
    pub fn from_fields(x: Option<i32>, y: Option<i32>) -> Self {
        Self {
            x: x.unwrap_or(0),
            y: y.unwrap_or(0),
        }
    }
}

/// Frame anchor for watermark placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl WatermarkPosition {
    pub const ALL: [WatermarkPosition; 5] = [
        WatermarkPosition::TopLeft,
        WatermarkPosition::TopRight,
        WatermarkPosition::BottomLeft,
        WatermarkPosition::BottomRight,
        WatermarkPosition::Center,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WatermarkPosition::TopLeft => "top-left",
            WatermarkPosition::TopRight => "top-right",
            WatermarkPosition::BottomLeft => "bottom-left",
            WatermarkPosition::BottomRight => "bottom-right",
            WatermarkPosition::Center => "center",
        }
    }
}

impl FromStr for WatermarkPosition {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| OverlayError::UnknownPosition {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement rule for an overlay bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Fixed offset, independent of frame size.
    Fixed(Position),
    /// Anchored to a frame corner or the center; recomputed per frame size.
    Anchored(WatermarkPosition),
}

impl Placement {
    /// Resolve the top-left draw offset for an overlay of size `overlay` on a
    /// frame of size `frame`.
    ///
    /// Offsets may be negative or run past the frame edge; drawing clips.
    pub fn resolve(&self, frame: (u32, u32), overlay: (u32, u32)) -> (i64, i64) {
        match *self {
            Placement::Fixed(pos) => (pos.x as i64, pos.y as i64),
            Placement::Anchored(anchor) => {
                let right = frame.0 as i64 - overlay.0 as i64;
                let bottom = frame.1 as i64 - overlay.1 as i64;
                match anchor {
                    WatermarkPosition::TopLeft => (0, 0),
                    WatermarkPosition::TopRight => (right, 0),
                    WatermarkPosition::BottomLeft => (0, bottom),
                    WatermarkPosition::BottomRight => (right, bottom),
                    WatermarkPosition::Center => (right / 2, bottom / 2),
                }
            }
        }
    }
}
