//! Overlaycast CLI - stamp overlays onto frame sequences.
//!
//! Usage:
//!   overlaycast qr <FRAMES>... -o <DIR>                  QR-code overlay
//!   overlaycast watermark <FRAMES>... -i <IMG> -o <DIR>  Watermark overlay
//!   overlaycast config [--init]                          Show or create config

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use overlaycast_common::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "overlaycast",
    about = "Overlay QR codes and watermarks onto video frames",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/overlaycast/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overlay a QR code onto every frame
    Qr {
        /// Frame images, in presentation order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Text to encode
        #[arg(long)]
        text: Option<String>,

        /// QR data area as WIDTHxHEIGHT (border excluded)
        #[arg(long)]
        size: Option<String>,

        /// Left offset on the frame
        #[arg(long, allow_negative_numbers = true)]
        x: Option<i32>,

        /// Top offset on the frame
        #[arg(long, allow_negative_numbers = true)]
        y: Option<i32>,

        /// Quiet-zone border in pixels
        #[arg(long)]
        border: Option<u32>,

        /// Module color (hex)
        #[arg(long)]
        dark: Option<String>,

        /// Background and border color (hex)
        #[arg(long)]
        light: Option<String>,

        /// Frame rate used to timestamp the sequence
        #[arg(long, default_value = "30")]
        fps: f64,
    },

    /// Overlay a mirrored watermark image onto every frame
    Watermark {
        /// Frame images, in presentation order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Watermark image file
        #[arg(short, long)]
        image: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Anchor: top-left|top-right|bottom-left|bottom-right|center
        #[arg(long)]
        position: Option<String>,

        /// Frame rate used to timestamp the sequence
        #[arg(long, default_value = "30")]
        fps: f64,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(overlaycast_common::config::config_file_path);
    let config = AppConfig::load_from(&config_path);

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    overlaycast_common::logging::init_logging(&logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Qr {
            frames,
            output,
            text,
            size,
            x,
            y,
            border,
            dark,
            light,
            fps,
        } => commands::qr::run(
            &config,
            commands::qr::QrArgs {
                text,
                size,
                x,
                y,
                border,
                dark,
                light,
            },
            frames,
            output,
            fps,
        ),
        Commands::Watermark {
            frames,
            image,
            output,
            position,
            fps,
        } => commands::watermark::run(&config, image, position, frames, output, fps),
        Commands::Config { init, force } => commands::config::run(&config, config_path, init, force),
    }
}
