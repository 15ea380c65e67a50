//! Site framework subprocess invocation.
//!
//! The static-site framework is an external collaborator; build, dev and
//! deploy are its commands, run with inherited stdio so its output lands on
//! the user's console unchanged.

use anyhow::{Context, Result};
use tokio::process::{Child, Command};

/// Run a framework command to completion, failing on nonzero exit.
pub async fn run_step(argv: &[String]) -> Result<()> {
    let (program, args) = split_argv(argv)?;

    tracing::info!("Running framework command: {}", argv.join(" "));

    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .with_context(|| format!("Failed to launch '{}'", program))?;

    if !status.success() {
        anyhow::bail!("Framework command '{}' exited with {}", argv.join(" "), status);
    }

    Ok(())
}

/// Spawn a long-running framework command (the dev server).
pub fn spawn_long_running(argv: &[String]) -> Result<Child> {
    let (program, args) = split_argv(argv)?;

    tracing::info!("Starting framework dev server: {}", argv.join(" "));

    Command::new(program)
        .args(args)
        .spawn()
        .with_context(|| format!("Failed to launch '{}'", program))
}

fn split_argv(argv: &[String]) -> Result<(&String, &[String])> {
    let (program, args) = argv
        .split_first()
        .context("Framework command is empty in lectern.toml")?;
    Ok((program, args))
}
