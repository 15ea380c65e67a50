//! Configuration file (lectern.toml) loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use lectern_convert::CommandConverter;
use lectern_gen::GenerateConfig;
use lectern_server::InputPaths;
use serde::Deserialize;

/// Configuration file structure (lectern.toml).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub spec: SpecConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub faq: FaqConfig,
    #[serde(default)]
    pub artifact: ArtifactConfig,
    #[serde(default)]
    pub framework: FrameworkConfig,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpecConfig {
    #[serde(default = "default_spec_path")]
    pub path: String,
    #[serde(default = "default_reference_dir")]
    pub reference_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ConverterConfig {
    #[serde(default = "default_converter_command")]
    pub command: String,
    #[serde(default = "default_converter_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FaqConfig {
    #[serde(default = "default_faq_data")]
    pub data: String,
    #[serde(default = "default_faq_output")]
    pub output: String,
    #[serde(default = "default_faq_title")]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_artifact_output")]
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct FrameworkConfig {
    #[serde(default = "default_framework_build")]
    pub build: Vec<String>,
    #[serde(default = "default_framework_dev")]
    pub dev: Vec<String>,
    #[serde(default = "default_framework_deploy")]
    pub deploy: Vec<String>,
    #[serde(default = "default_framework_output")]
    pub output_dir: String,
}

fn default_site_title() -> String {
    "API Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_spec_path() -> String {
    "openapi.json".to_string()
}
fn default_reference_dir() -> String {
    "docs/reference".to_string()
}
fn default_converter_command() -> String {
    "widdershins".to_string()
}
fn default_converter_args() -> Vec<String> {
    vec![
        "{spec}".to_string(),
        "-o".to_string(),
        "{out}/api.md".to_string(),
        "--omitHeader".to_string(),
    ]
}
fn default_faq_data() -> String {
    "faq.yml".to_string()
}
fn default_faq_output() -> String {
    "docs/faq.mdx".to_string()
}
fn default_faq_title() -> String {
    "FAQ".to_string()
}
fn default_artifact_output() -> String {
    "generated/api-meta.json".to_string()
}
fn default_framework_build() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "build".to_string()]
}
fn default_framework_dev() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "start".to_string()]
}
fn default_framework_deploy() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "deploy".to_string()]
}
fn default_framework_output() -> String {
    "build".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        toml_defaults()
    }
}
impl Default for SpecConfig {
    fn default() -> Self {
        toml_defaults()
    }
}
impl Default for ConverterConfig {
    fn default() -> Self {
        toml_defaults()
    }
}
impl Default for FaqConfig {
    fn default() -> Self {
        toml_defaults()
    }
}
impl Default for ArtifactConfig {
    fn default() -> Self {
        toml_defaults()
    }
}
impl Default for FrameworkConfig {
    fn default() -> Self {
        toml_defaults()
    }
}

/// Build a section's default by deserializing the empty document, so the
/// serde field defaults are the single source of truth.
fn toml_defaults<T: serde::de::DeserializeOwned>() -> T {
    toml::from_str("").expect("empty section deserializes via defaults")
}

/// Load configuration from lectern.toml.
///
/// A missing file yields the defaults; a present but malformed file is an
/// error.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let content = if path.exists() {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        raw
    } else {
        tracing::debug!("No config at {}, using defaults", path.display());
        String::new()
    };

    let config: ConfigFile = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

    Ok(config)
}

impl ConfigFile {
    /// Pipeline configuration derived from this file.
    pub fn generate_config(&self) -> GenerateConfig {
        GenerateConfig {
            spec_path: PathBuf::from(&self.spec.path),
            reference_dir: PathBuf::from(&self.spec.reference_dir),
            faq_data: PathBuf::from(&self.faq.data),
            faq_output: PathBuf::from(&self.faq.output),
            faq_title: self.faq.title.clone(),
            artifact_path: PathBuf::from(&self.artifact.output),
            site_title: self.site.title.clone(),
            site_base_url: self.site.base_url.clone(),
        }
    }

    /// Converter built from the configured command template.
    pub fn converter(&self) -> CommandConverter {
        CommandConverter::new(&self.converter.command, self.converter.args.clone())
    }

    /// Input files the dev command watches.
    pub fn input_paths(&self, config_path: &Path) -> InputPaths {
        InputPaths {
            spec: PathBuf::from(&self.spec.path),
            faq_data: PathBuf::from(&self.faq.data),
            config: config_path.to_path_buf(),
        }
    }
}
