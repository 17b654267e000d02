//! Publisher-side video track with an optional processor slot.

use crate::frame::VideoFrame;
use crate::processor::ProcessorConnector;

/// Outgoing video track. Frames published while a connector is installed
/// go through its processor; otherwise they are sent unchanged.
#[derive(Debug, Default)]
pub struct VideoPublisher {
    connector: Option<ProcessorConnector>,
    frames_published: u64,
}

impl VideoPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or clear (`None`) the video processor connector.
    ///
    /// The previous connector, if any, is disconnected and flushed.
    pub fn set_video_processor_connector(&mut self, connector: Option<ProcessorConnector>) {
        if let Some(previous) = std::mem::replace(&mut self.connector, connector) {
            previous.disconnect();
        }
        tracing::info!(
            active = self.connector.is_some(),
            "Video processor connector updated"
        );
    }

    pub fn has_connector(&self) -> bool {
        self.connector.is_some()
    }

    pub fn connector(&self) -> Option<&ProcessorConnector> {
        self.connector.as_ref()
    }

    pub fn frames_published(&self) -> u64 {
        self.frames_published
    }

    /// Publish one frame, returning what goes on the wire.
    pub fn publish(&mut self, frame: VideoFrame) -> VideoFrame {
        self.frames_published += 1;
        match self.connector.as_mut() {
            Some(connector) => connector.process(frame),
            None => frame,
        }
    }
}
