//! Deploy command.

use std::path::Path;

use anyhow::Result;

use crate::commands::{build, framework};
use crate::config;

/// Run the deploy command: full build, then the framework deploy.
pub async fn run(config_path: &Path) -> Result<()> {
    build::run(config_path).await?;

    let file_config = config::load_config(config_path)?;
    framework::run_step(&file_config.framework.deploy).await?;

    tracing::info!("Deployed");

    Ok(())
}
