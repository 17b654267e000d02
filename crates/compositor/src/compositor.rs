//! Per-frame overlay compositor.
//!
//! Draws each incoming frame into a scratch canvas, stamps the pre-rendered
//! overlay bitmap on top and emits a new frame carrying the original
//! timestamp. Frames map 1:1 and in order; nothing is buffered.

use image::{imageops, RgbaImage};

use overlaycast_overlay::{
    OverlayBitmap, OverlayGenerator, Placement, QrCodeConfig, WatermarkConfig,
};

use crate::error::{CompositorError, CompositorResult};
use crate::frame::VideoFrame;

/// Lifecycle state of a [`FrameCompositor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorState {
    /// Constructed; `generate()` not called yet. Frames pass through.
    Idle,
    /// Overlay bitmap available; frames are composited.
    OverlayReady,
    /// Generation failed or the overlay was flushed. Frames pass through.
    PassThrough,
    /// Setup hit a fatal error. Frames pass through; `generate()` keeps failing.
    Failed { reason: String },
}

/// Composites a generated overlay onto every frame.
pub struct FrameCompositor {
    generator: Box<dyn OverlayGenerator>,
    placement: Placement,
    state: CompositorState,
    overlay: Option<OverlayBitmap>,
    canvas: Option<RgbaImage>,
    canvas_allocations: u64,
    frames_composited: u64,
}

impl std::fmt::Debug for FrameCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCompositor")
            .field("generator", &self.generator.name())
            .field("placement", &self.placement)
            .field("state", &self.state)
            .field("overlay", &self.overlay.as_ref().map(|o| o.dimensions()))
            .field("canvas", &self.canvas_dimensions())
            .finish()
    }
}

impl FrameCompositor {
    pub fn new(generator: impl OverlayGenerator + 'static) -> Self {
        let placement = generator.placement();
        Self {
            generator: Box::new(generator),
            placement,
            state: CompositorState::Idle,
            overlay: None,
            canvas: None,
            canvas_allocations: 0,
            frames_composited: 0,
        }
    }

    /// QR-code compositor.
    pub fn qr_code(config: QrCodeConfig) -> Self {
        Self::new(config.normalized())
    }

    /// Watermark compositor.
    pub fn watermark(config: WatermarkConfig) -> Self {
        Self::new(config)
    }

    pub fn name(&self) -> &str {
        self.generator.name()
    }

    pub fn state(&self) -> &CompositorState {
        &self.state
    }

    pub fn overlay(&self) -> Option<&OverlayBitmap> {
        self.overlay.as_ref()
    }

    pub fn canvas_dimensions(&self) -> Option<(u32, u32)> {
        self.canvas.as_ref().map(|c| c.dimensions())
    }

    /// Number of times the scratch canvas has been (re)allocated.
    pub fn canvas_allocations(&self) -> u64 {
        self.canvas_allocations
    }

    pub fn frames_composited(&self) -> u64 {
        self.frames_composited
    }

    /// Render the overlay bitmap. Idempotent.
    ///
    /// Content failures are logged and leave the compositor in pass-through;
    /// only an unsupported rendering context is returned as an error.
    pub fn generate(&mut self) -> CompositorResult<()> {
        match &self.state {
            CompositorState::Idle => {}
            CompositorState::Failed { reason } => {
                return Err(CompositorError::Unavailable {
                    transformer: self.generator.name().to_string(),
                    reason: reason.clone(),
                });
            }
            _ => return Ok(()),
        }

        if self.canvas.is_none() {
            self.canvas = Some(RgbaImage::new(1, 1));
            self.canvas_allocations += 1;
        }

        match self.generator.generate() {
            Ok(bitmap) => {
                tracing::debug!(
                    transformer = self.generator.name(),
                    width = bitmap.width(),
                    height = bitmap.height(),
                    "Overlay ready"
                );
                self.overlay = Some(bitmap);
                self.state = CompositorState::OverlayReady;
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                tracing::error!(transformer = self.generator.name(), "Compositor setup failed: {e}");
                self.state = CompositorState::Failed {
                    reason: e.to_string(),
                };
                Err(CompositorError::Setup {
                    transformer: self.generator.name().to_string(),
                    source: e,
                })
            }
            Err(e) => {
                tracing::error!(
                    transformer = self.generator.name(),
                    "Failed to create overlay, passing frames through: {e}"
                );
                self.state = CompositorState::PassThrough;
                Ok(())
            }
        }
    }

    /// Composite the overlay onto `frame`, consuming it.
    pub fn transform(&mut self, frame: VideoFrame) -> VideoFrame {
        let overlay = match (&self.state, &self.overlay) {
            (CompositorState::OverlayReady, Some(overlay)) => overlay,
            _ => return frame,
        };

        let (width, height) = frame.dimensions();
        if self.canvas.as_ref().map(|c| c.dimensions()) != Some((width, height)) {
            tracing::debug!(width, height, "Resizing compositor canvas");
            self.canvas = Some(RgbaImage::new(width, height));
            self.canvas_allocations += 1;
        }
        let canvas = self
            .canvas
            .get_or_insert_with(|| RgbaImage::new(width, height));

        let timestamp_us = frame.timestamp_us();
        canvas.copy_from_slice(frame.pixels().as_raw());
        drop(frame);
        // Input alpha is dropped, not composited over black: translucent
        // pixels keep their color channels. Camera frames are opaque, so the
        // two readings agree there.
        discard_alpha(canvas);

        let (x, y) = self
            .placement
            .resolve((width, height), overlay.dimensions());
        imageops::overlay(&mut *canvas, overlay.pixels(), x, y);
        discard_alpha(canvas);

        self.frames_composited += 1;
        VideoFrame::new(canvas.clone(), timestamp_us)
    }

    /// Release the overlay bitmap. Later frames pass through.
    pub fn flush(&mut self) {
        tracing::debug!(transformer = self.generator.name(), "Compositor flush");
        self.overlay = None;
        if self.state == CompositorState::OverlayReady {
            self.state = CompositorState::PassThrough;
        }
    }
}

/// Force every pixel opaque; the canvas has no alpha channel semantics.
fn discard_alpha(canvas: &mut RgbaImage) {
    for px in canvas.pixels_mut() {
        px.0[3] = u8::MAX;
    }
}
