//! Drive a frame sequence through a publisher.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::DynamicImage;
use overlaycast_common::{FrameClock, OverlaycastError, OverlaycastResult};
use overlaycast_compositor::{OverlayController, VideoFrame, VideoPublisher};

/// Outcome of a sequence run.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSummary {
    pub frames: usize,
    pub written: Vec<PathBuf>,
    pub overlay_applied: bool,
}

/// Apply the controller's overlay to every frame in `frames` and write the
/// results into `output` under their original file names.
///
/// All destinations are checked before anything is written, so a sequence
/// whose frames would collide in `output` fails without touching the disk.
pub fn process_sequence(
    controller: &OverlayController,
    frames: &[PathBuf],
    output: &Path,
    fps: f64,
) -> anyhow::Result<SequenceSummary> {
    let targets = output_paths(frames, output)?;

    std::fs::create_dir_all(output)
        .map_err(OverlaycastError::from)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut publisher = VideoPublisher::new();
    let overlay_applied = controller
        .apply(&mut publisher)
        .map_err(OverlaycastError::from)
        .context("Failed to apply overlay")?;

    let clock = FrameClock::new(fps);
    let mut written = Vec::with_capacity(frames.len());

    for (index, (path, out_path)) in frames.iter().zip(targets).enumerate() {
        let pixels = image::open(path)
            .map_err(|e| {
                OverlaycastError::image(format!("Failed to read frame {}: {e}", path.display()))
            })?
            .to_rgba8();
        let frame = VideoFrame::new(pixels, clock.timestamp_us(index as u64));
        let published = publisher.publish(frame);

        tracing::debug!(
            frame = index,
            timestamp_us = published.timestamp_us(),
            path = %out_path.display(),
            "Writing frame"
        );
        save_frame(published, &out_path)?;
        written.push(out_path);
    }

    if let Some(connector) = publisher.connector() {
        let stats = connector.processor().stats();
        tracing::info!(
            frames_in = stats.frames_in,
            frames_out = stats.frames_out,
            "Sequence processed"
        );
    }
    publisher.set_video_processor_connector(None);

    Ok(SequenceSummary {
        frames: frames.len(),
        written,
        overlay_applied,
    })
}

/// Destinations for every frame, in order.
///
/// Frames from different directories that share a file name would land on
/// the same output file; that is rejected rather than silently keeping only
/// the last one.
fn output_paths(frames: &[PathBuf], output: &Path) -> OverlaycastResult<Vec<PathBuf>> {
    let mut seen = HashSet::with_capacity(frames.len());
    frames
        .iter()
        .map(|input| {
            let out_path = output_path(input, output)?;
            if !seen.insert(out_path.clone()) {
                return Err(OverlaycastError::config(format!(
                    "Frames share the output file {}; rename {} or process it separately",
                    out_path.display(),
                    input.display()
                )));
            }
            Ok(out_path)
        })
        .collect()
}

/// Destination for `input` inside `output`; refuses to overwrite the input.
fn output_path(input: &Path, output: &Path) -> OverlaycastResult<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        OverlaycastError::config(format!("Frame path has no file name: {}", input.display()))
    })?;
    let out_path = output.join(name);

    let same_file = match (input.canonicalize(), out_path.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same_file {
        return Err(OverlaycastError::config(format!(
            "Refusing to overwrite input frame {}; choose another output directory",
            input.display()
        )));
    }
    Ok(out_path)
}

fn save_frame(frame: VideoFrame, path: &Path) -> OverlaycastResult<()> {
    let image = DynamicImage::ImageRgba8(frame.into_pixels());
    let lossy = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false);

    let result = if lossy {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(path)
    } else {
        image.save(path)
    };
    result.map_err(|e| OverlaycastError::image(format!("Failed to write {}: {e}", path.display())))
}

pub fn print_summary(summary: &SequenceSummary, output: &Path) {
    if !summary.overlay_applied {
        println!("No overlay applied; frames copied unchanged.");
    }
    println!(
        "Wrote {} frame(s) to {}",
        summary.written.len(),
        output.display()
    );
}
