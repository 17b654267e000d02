//! Raw video frames.

use image::RgbaImage;

/// A decoded RGBA video frame.
///
/// Frames are single-use: transforms take them by value, so reading a frame
/// releases it, and every output is a newly allocated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pixels: RgbaImage,
    timestamp_us: i64,
}

impl VideoFrame {
    pub fn new(pixels: RgbaImage, timestamp_us: i64) -> Self {
        Self {
            pixels,
            timestamp_us,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Presentation timestamp in microseconds.
    pub fn timestamp_us(&self) -> i64 {
        self.timestamp_us
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Release the frame, returning its pixel buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_pixels_returns_buffer() {
        let frame = VideoFrame::new(RgbaImage::new(3, 2), 42);
        assert_eq!(frame.dimensions(), (3, 2));
        assert_eq!(frame.timestamp_us(), 42);
        assert_eq!(frame.into_pixels().dimensions(), (3, 2));
    }
}
