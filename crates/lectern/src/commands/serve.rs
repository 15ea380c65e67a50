//! Preview server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use lectern_server::{PreviewConfig, PreviewServer};

use crate::config;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: u16,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let file_config = config::load_config(config_path)?;

    let preview = PreviewConfig {
        dir: dir.unwrap_or_else(|| PathBuf::from(&file_config.framework.output_dir)),
        port,
        open,
        ..Default::default()
    };

    PreviewServer::new(preview).start().await?;

    Ok(())
}
