//! Generation pipeline command.

use std::path::Path;

use anyhow::Result;
use lectern_gen::Pipeline;

use crate::config;

/// Run the generate command.
pub async fn run(config_path: &Path) -> Result<()> {
    tracing::info!("Running generation pipeline...");

    let file_config = config::load_config(config_path)?;

    let pipeline = Pipeline::new(
        file_config.generate_config(),
        Box::new(file_config.converter()),
    );

    let report = pipeline.run()?;

    tracing::info!(
        "Generated {} reference page(s) and {} FAQ entries in {}ms",
        report.reference_files,
        report.faq_entries,
        report.duration_ms
    );

    Ok(())
}
