//! In-process frame pipeline.
//!
//! A [`MediaProcessor`] threads each frame through an ordered list of
//! transformers, one call at a time. A [`ProcessorConnector`] attaches a
//! processor to a [`crate::publisher::VideoPublisher`].

use crate::compositor::FrameCompositor;
use crate::error::CompositorResult;
use crate::frame::VideoFrame;

/// A per-frame transform stage.
pub trait FrameTransformer: Send {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// One-time setup before the first frame.
    fn start(&mut self) -> CompositorResult<()>;

    /// Consume one frame and produce exactly one frame.
    fn transform(&mut self, frame: VideoFrame) -> VideoFrame;

    /// Release resources held for the stream.
    fn flush(&mut self);
}

impl FrameTransformer for FrameCompositor {
    fn name(&self) -> &str {
        FrameCompositor::name(self)
    }

    fn start(&mut self) -> CompositorResult<()> {
        self.generate()
    }

    fn transform(&mut self, frame: VideoFrame) -> VideoFrame {
        FrameCompositor::transform(self, frame)
    }

    fn flush(&mut self) {
        FrameCompositor::flush(self)
    }
}

/// Frame counters for a processor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    pub frames_in: u64,
    pub frames_out: u64,
    pub last_timestamp_us: Option<i64>,
}

/// Ordered chain of frame transformers.
#[derive(Default)]
pub struct MediaProcessor {
    transformers: Vec<Box<dyn FrameTransformer>>,
    started: bool,
    stats: ProcessorStats,
}

impl std::fmt::Debug for MediaProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.transformers.iter().map(|t| t.name()).collect();
        f.debug_struct("MediaProcessor")
            .field("transformers", &names)
            .field("started", &self.started)
            .field("stats", &self.stats)
            .finish()
    }
}

impl MediaProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor with a single compositor stage.
    pub fn with_compositor(compositor: FrameCompositor) -> Self {
        let mut processor = Self::new();
        processor.set_transformers(vec![Box::new(compositor)]);
        processor
    }

    /// Replace the transformer chain. Running transformers are flushed.
    pub fn set_transformers(&mut self, transformers: Vec<Box<dyn FrameTransformer>>) {
        if self.started {
            self.flush();
        }
        self.transformers = transformers;
        self.started = false;
    }

    pub fn transformer_names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    /// Start every transformer.
    ///
    /// A failing transformer only disables itself: the rest are still
    /// started, and the first error is returned after all have run.
    pub fn start(&mut self) -> CompositorResult<()> {
        let mut first_err = None;
        for transformer in &mut self.transformers {
            if let Err(e) = transformer.start() {
                tracing::error!(transformer = transformer.name(), "Transformer start failed: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        self.started = true;
        tracing::debug!(stages = self.transformers.len(), "Media processor started");
        first_err.map_or(Ok(()), Err)
    }

    /// Run one frame through the chain, starting it first if needed.
    pub fn process(&mut self, frame: VideoFrame) -> VideoFrame {
        if !self.started {
            // Failures are logged per transformer and leave it passing through.
            let _ = self.start();
        }

        self.stats.frames_in += 1;
        let out = self
            .transformers
            .iter_mut()
            .fold(frame, |frame, transformer| transformer.transform(frame));
        self.stats.frames_out += 1;
        self.stats.last_timestamp_us = Some(out.timestamp_us());
        out
    }

    /// Flush every transformer.
    pub fn flush(&mut self) {
        for transformer in &mut self.transformers {
            transformer.flush();
        }
        tracing::debug!(
            frames_in = self.stats.frames_in,
            frames_out = self.stats.frames_out,
            "Media processor flushed"
        );
    }
}

/// Attaches a [`MediaProcessor`] to a publisher's video track.
#[derive(Debug)]
pub struct ProcessorConnector {
    processor: MediaProcessor,
}

impl ProcessorConnector {
    pub fn new(processor: MediaProcessor) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &MediaProcessor {
        &self.processor
    }

    pub fn process(&mut self, frame: VideoFrame) -> VideoFrame {
        self.processor.process(frame)
    }

    /// Flush the processor and hand it back.
    pub fn disconnect(mut self) -> MediaProcessor {
        self.processor.flush();
        self.processor
    }
}
