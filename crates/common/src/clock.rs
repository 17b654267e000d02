//! Frame timing utilities.
//!
//! Frame sequences loaded from still images carry no timing of their own.
//! `FrameClock` assigns each frame a presentation timestamp in microseconds,
//! the unit video frames use throughout the pipeline.

const MICROS_PER_SEC: i64 = 1_000_000;

/// Assigns monotonic timestamps to frames of a fixed-rate sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fps: f64,
}

impl FrameClock {
    /// Create a clock at `fps` frames per second; frame 0 is at timestamp 0.
    ///
    /// Non-finite or non-positive rates are clamped to 1 fps.
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 1.0 };
        Self { fps }
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Timestamp of frame `index` in microseconds.
    ///
    /// Computed from the index rather than accumulated, so rounding error
    /// does not drift over long sequences.
    pub fn timestamp_us(&self, index: u64) -> i64 {
        (index as f64 * MICROS_PER_SEC as f64 / self.fps).round() as i64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(30.0)
    }
}
