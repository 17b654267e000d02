//! Overlaycast Compositor
//!
//! Per-frame video transforms that stamp a pre-rendered overlay onto a live
//! stream:
//!
//! ```text
//! VideoPublisher ── ProcessorConnector ── MediaProcessor ── FrameCompositor
//!                                                              │
//!                                              OverlayBitmap ──┘ (generated once)
//! ```
//!
//! Processing is synchronous and single-threaded: one frame in, one frame
//! out, in order.

pub mod compositor;
pub mod controller;
pub mod error;
pub mod frame;
pub mod processor;
pub mod publisher;

pub use compositor::{CompositorState, FrameCompositor};
pub use controller::{OverlayController, OverlayMode};
pub use error::{CompositorError, CompositorResult};
pub use frame::VideoFrame;
pub use processor::{FrameTransformer, MediaProcessor, ProcessorConnector, ProcessorStats};
pub use publisher::VideoPublisher;
