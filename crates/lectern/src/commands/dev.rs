//! Development command.
//!
//! Runs the pipeline once, hands the site over to the framework's dev
//! server, and keeps watching the pipeline inputs. A change to the spec,
//! the FAQ data, or lectern.toml re-runs the whole pipeline; a failed
//! regeneration is reported and the dev server keeps running.

use std::path::Path;

use anyhow::{Context, Result};
use lectern_gen::Pipeline;
use lectern_server::{InputWatcher, WatchEvent};

use crate::commands::framework;
use crate::config;

/// Run the dev command.
pub async fn run(config_path: &Path) -> Result<()> {
    let file_config = config::load_config(config_path)?;

    // Initial generation before the framework starts serving
    Pipeline::new(
        file_config.generate_config(),
        Box::new(file_config.converter()),
    )
    .run()?;

    let inputs = file_config.input_paths(config_path);
    let (_watcher, mut rx) = InputWatcher::new(&inputs).context("Failed to watch inputs")?;

    let mut child = framework::spawn_long_running(&file_config.framework.dev)?;

    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status.context("Framework dev server failed")?;
                tracing::info!("Framework dev server exited with {}", status);
                break;
            }

            event = rx.recv() => {
                let Some(event) = event else { break };
                regenerate(config_path, event);
            }
        }
    }

    Ok(())
}

/// Re-run the pipeline after an input change.
///
/// Config changes are picked up by reloading lectern.toml before the run.
fn regenerate(config_path: &Path, event: WatchEvent) {
    match &event {
        WatchEvent::SpecChanged(path) => tracing::info!("Spec changed: {}", path.display()),
        WatchEvent::FaqChanged(path) => tracing::info!("FAQ data changed: {}", path.display()),
        WatchEvent::ConfigChanged(path) => tracing::info!("Config changed: {}", path.display()),
    }

    let result = config::load_config(config_path).and_then(|file_config| {
        let pipeline = Pipeline::new(
            file_config.generate_config(),
            Box::new(file_config.converter()),
        );
        let report = pipeline.run()?;
        Ok(report)
    });

    match result {
        Ok(report) => {
            tracing::info!(
                "Regenerated {} reference page(s) in {}ms",
                report.reference_files,
                report.duration_ms
            );
        }
        Err(e) => {
            tracing::warn!("Regeneration failed: {:#}", e);
        }
    }
}
