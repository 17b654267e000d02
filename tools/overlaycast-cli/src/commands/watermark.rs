//! Overlay a watermark image onto a frame sequence.

use std::path::PathBuf;

use overlaycast_common::AppConfig;
use overlaycast_compositor::{OverlayController, OverlayMode};
use overlaycast_overlay::{WatermarkImage, WatermarkPosition};

use super::frames::{print_summary, process_sequence};

pub fn run(
    config: &AppConfig,
    image: PathBuf,
    position: Option<String>,
    frames: Vec<PathBuf>,
    output: PathBuf,
    fps: f64,
) -> anyhow::Result<()> {
    let mut controller = OverlayController::new(config)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let watermark = WatermarkImage::open(&image)
        .map_err(|e| anyhow::anyhow!("Failed to load watermark {}: {e}", image.display()))?;
    println!(
        "Watermark: {} ({}x{})",
        image.display(),
        watermark.natural_width(),
        watermark.natural_height()
    );
    controller.select_watermark(watermark);

    if let Some(position) = position {
        let position: WatermarkPosition = position.parse()?;
        controller.set_watermark_position(position);
    }
    controller.select_mode(OverlayMode::Watermark);

    let summary = process_sequence(&controller, &frames, &output, fps)?;
    print_summary(&summary, &output);
    Ok(())
}
