//! Pipeline orchestration.
//!
//! Runs the four generation steps in order: convert, post-process,
//! materialize, assemble FAQ. Single-threaded across steps, fail-fast, no
//! partial-success semantics; re-running after a failure is always safe
//! because every step fully regenerates its output.

use std::path::PathBuf;
use std::time::Instant;

use lectern_convert::{ConvertError, SpecConverter};

use crate::faq::{assemble_faq, FaqError};
use crate::materialize::{materialize_config, MaterializeError};
use crate::postprocess::{process_reference_dir, PostprocessError};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Path to the OpenAPI spec input
    pub spec_path: PathBuf,

    /// Directory the converter writes the reference pages into
    pub reference_dir: PathBuf,

    /// Path to the FAQ YAML data file
    pub faq_data: PathBuf,

    /// Output path for the assembled FAQ page
    pub faq_output: PathBuf,

    /// Title of the FAQ page
    pub faq_title: String,

    /// Output path for the config artifact
    pub artifact_path: PathBuf,

    /// Site title, copied into the artifact
    pub site_title: String,

    /// Site base URL, copied into the artifact
    pub site_base_url: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            spec_path: PathBuf::from("openapi.json"),
            reference_dir: PathBuf::from("docs/reference"),
            faq_data: PathBuf::from("faq.yml"),
            faq_output: PathBuf::from("docs/faq.mdx"),
            faq_title: "FAQ".to_string(),
            artifact_path: PathBuf::from("generated/api-meta.json"),
            site_title: "API Documentation".to_string(),
            site_base_url: "/".to_string(),
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of reference files post-processed
    pub reference_files: usize,

    /// Number of FAQ entries assembled
    pub faq_entries: usize,

    /// Total pipeline time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("Post-processing failed: {0}")]
    Postprocess(#[from] PostprocessError),

    #[error("Config materialization failed: {0}")]
    Materialize(#[from] MaterializeError),

    #[error("FAQ assembly failed: {0}")]
    Faq(#[from] FaqError),
}

/// The generation pipeline.
pub struct Pipeline {
    config: GenerateConfig,
    converter: Box<dyn SpecConverter>,
}

impl Pipeline {
    /// Create a pipeline with the given converter.
    pub fn new(config: GenerateConfig, converter: Box<dyn SpecConverter>) -> Self {
        Self { config, converter }
    }

    /// Run all four steps, fail-fast.
    pub fn run(&self) -> Result<GenerateReport, PipelineError> {
        let start = Instant::now();

        tracing::info!(
            "Converting {} with {}",
            self.config.spec_path.display(),
            self.converter.name()
        );
        self.converter
            .convert(&self.config.spec_path, &self.config.reference_dir)?;

        let reference_files = process_reference_dir(&self.config.reference_dir)?;

        materialize_config(
            &self.config.spec_path,
            &self.config.artifact_path,
            &self.config.site_title,
            &self.config.site_base_url,
        )?;

        let faq_entries = assemble_faq(
            &self.config.faq_data,
            &self.config.faq_output,
            &self.config.faq_title,
        )?;

        Ok(GenerateReport {
            reference_files,
            faq_entries,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
