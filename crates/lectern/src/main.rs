//! Lectern CLI - generation toolchain for API documentation sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Generation toolchain for API documentation sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to lectern.toml config file
    #[arg(short, long, default_value = "lectern.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the generation pipeline (reference, config artifact, FAQ)
    Generate,

    /// Generate, then run the site framework's build
    Build,

    /// Start the framework dev server and regenerate on input changes
    Dev,

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the framework output dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Generate, build, and run the framework's deploy
    Deploy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Generate => {
            commands::generate::run(&cli.config).await?;
        }
        Commands::Build => {
            commands::build::run(&cli.config).await?;
        }
        Commands::Dev => {
            commands::dev::run(&cli.config).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&cli.config, port, dir, !no_open).await?;
        }
        Commands::Deploy => {
            commands::deploy::run(&cli.config).await?;
        }
    }

    Ok(())
}
