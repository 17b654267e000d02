//! Overlay a QR code onto a frame sequence.

use std::path::PathBuf;

use overlaycast_common::AppConfig;
use overlaycast_compositor::{OverlayController, OverlayMode};
use overlaycast_overlay::qr::parse_size;
use overlaycast_overlay::Color;

use super::frames::{print_summary, process_sequence};

/// QR fields given on the command line; `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct QrArgs {
    pub text: Option<String>,
    pub size: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub border: Option<u32>,
    pub dark: Option<String>,
    pub light: Option<String>,
}

pub fn run(
    config: &AppConfig,
    args: QrArgs,
    frames: Vec<PathBuf>,
    output: PathBuf,
    fps: f64,
) -> anyhow::Result<()> {
    let mut controller = OverlayController::new(config)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let mut qr = controller.qr_config().clone();
    if let Some(text) = args.text {
        qr.text = text;
    }
    if let Some(size) = args.size {
        (qr.width, qr.height) = parse_size(&size)?;
    }
    if let Some(x) = args.x {
        qr.position.x = x;
    }
    if let Some(y) = args.y {
        qr.position.y = y;
    }
    if let Some(border) = args.border {
        qr.border_size = border;
    }
    if let Some(dark) = args.dark {
        qr.color_dark = dark.parse::<Color>()?;
    }
    if let Some(light) = args.light {
        qr.color_light = light.parse::<Color>()?;
    }
    controller.set_qr_config(qr);
    controller.select_mode(OverlayMode::QrCode);

    let qr = controller.qr_config();
    let (final_w, final_h) = qr.final_dimensions();
    println!("QR overlay: {:?}", qr.text);
    println!(
        "  Data area: {}x{} (+{}px border = {}x{}) at ({}, {})",
        qr.width, qr.height, qr.border_size, final_w, final_h, qr.position.x, qr.position.y
    );
    println!("  Colors: {} on {}", qr.color_dark, qr.color_light);

    let summary = process_sequence(&controller, &frames, &output, fps)?;
    print_summary(&summary, &output);
    Ok(())
}
