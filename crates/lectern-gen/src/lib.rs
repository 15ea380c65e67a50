//! Generation pipeline for lectern documentation sites.
//!
//! Four batch steps, run sequentially and fail-fast: convert the OpenAPI spec
//! to Markdown (external tool), post-process the generated reference pages,
//! materialize the derived config artifact, and assemble the FAQ page. Every
//! generated file is a pure function of its inputs and is fully rewritten on
//! each run.

pub mod faq;
pub mod frontmatter;
pub mod materialize;
pub mod pipeline;
pub mod postprocess;

pub use faq::{assemble_faq, FaqEntry, FaqError};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use materialize::{materialize_config, MaterializeError};
pub use pipeline::{GenerateConfig, GenerateReport, Pipeline, PipelineError};
pub use postprocess::{process_document, process_file, process_reference_dir, PostprocessError};
