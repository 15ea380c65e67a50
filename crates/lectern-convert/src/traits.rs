//! Trait definitions for spec converters.

use std::path::{Path, PathBuf};

/// Result of converting a spec to Markdown.
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    /// Markdown files the converter produced, sorted by path
    pub files: Vec<PathBuf>,
}

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Spec file not found: {0}")]
    SpecNotFound(PathBuf),

    #[error("Failed to launch converter '{command}': {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("Converter exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("Converter produced no Markdown output in {0}")]
    EmptyOutput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for spec-to-Markdown converters.
///
/// The contract is deliberately narrow: a spec path goes in, Markdown
/// artifacts land in the output directory. Swapping the external tool means
/// swapping the implementation, nothing else.
pub trait SpecConverter: Send + Sync {
    /// Converter identifier for logging (e.g. "widdershins")
    fn name(&self) -> &str;

    /// Convert the spec at `spec_path`, writing Markdown into `out_dir`.
    ///
    /// The output directory is created if missing. Any prior contents are
    /// the caller's concern; conversion fully regenerates its own output.
    fn convert(&self, spec_path: &Path, out_dir: &Path) -> Result<ConvertOutput, ConvertError>;
}
