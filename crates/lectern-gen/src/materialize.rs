//! Config materializer.
//!
//! Extracts a small derived configuration from the OpenAPI spec and writes
//! it as a flat key/value JSON artifact for the site build. A `BTreeMap`
//! keeps the keys sorted, so re-running on unchanged inputs produces
//! byte-identical output.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lectern_spec::{ApiSpec, SpecError};

/// Errors that can occur while materializing the config artifact.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build the flat key/value view of the spec.
pub fn build_artifact(
    spec: &ApiSpec,
    site_title: &str,
    site_base_url: &str,
) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    map.insert("api.title".to_string(), spec.info.title.clone());
    map.insert("api.version".to_string(), spec.info.version.clone());

    if let Some(description) = &spec.info.description {
        map.insert("api.description".to_string(), description.clone());
    }

    if let Some(base_url) = spec.base_url() {
        map.insert("api.base_url".to_string(), base_url.to_string());
    }

    map.insert(
        "api.operation_count".to_string(),
        spec.operation_count().to_string(),
    );
    map.insert("api.tag_count".to_string(), spec.tag_count().to_string());

    map.insert("site.title".to_string(), site_title.to_string());
    map.insert("site.base_url".to_string(), site_base_url.to_string());

    map
}

/// Load the spec, derive the artifact, and write it to `out_path`.
///
/// The JSON string is fully built before anything is written, so a
/// malformed spec never leaves a partial artifact behind. Prior output is
/// overwritten.
pub fn materialize_config(
    spec_path: &Path,
    out_path: &Path,
    site_title: &str,
    site_base_url: &str,
) -> Result<(), MaterializeError> {
    let spec = ApiSpec::load(spec_path)?;
    let artifact = build_artifact(&spec, site_title, site_base_url);

    let json = serde_json::to_string_pretty(&artifact).expect("string map serializes");

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| MaterializeError::Write {
            path: out_path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(out_path, format!("{json}\n")).map_err(|e| MaterializeError::Write {
        path: out_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Wrote config artifact to {}", out_path.display());

    Ok(())
}
