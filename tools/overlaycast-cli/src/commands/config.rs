//! Show or initialize the configuration file.

use std::path::PathBuf;

use anyhow::Context;
use overlaycast_common::AppConfig;

pub fn run(config: &AppConfig, path: PathBuf, init: bool, force: bool) -> anyhow::Result<()> {
    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        AppConfig::default()
            .save_to(&path)
            .context("Failed to write config")?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let source = if path.exists() { "file" } else { "defaults" };
    println!("Config: {} ({source})", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
