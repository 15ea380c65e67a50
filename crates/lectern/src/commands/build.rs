//! Site build command.

use std::path::Path;

use anyhow::Result;

use crate::commands::{framework, generate};
use crate::config;

/// Run the build command: pipeline first, then the framework build.
pub async fn run(config_path: &Path) -> Result<()> {
    generate::run(config_path).await?;

    let file_config = config::load_config(config_path)?;
    framework::run_step(&file_config.framework.build).await?;

    tracing::info!("Site built to {}", file_config.framework.output_dir);

    Ok(())
}
