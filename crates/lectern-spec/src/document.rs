//! Typed view over the OpenAPI spec document.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// HTTP methods that count as operations under a path item.
const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A parsed OpenAPI document.
///
/// Immutable input to the pipeline. Fields not listed here are ignored
/// during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSpec {
    /// OpenAPI version string (e.g. "3.0.3")
    pub openapi: String,

    /// API metadata
    pub info: SpecInfo,

    /// Server list; the first entry provides the base URL
    #[serde(default)]
    pub servers: Vec<SpecServer>,

    /// Path items, keyed by route template
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, serde_json::Value>>,

    /// Tag declarations
    #[serde(default)]
    pub tags: Vec<SpecTag>,
}

/// The `info` object of the spec.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecInfo {
    /// API title (required)
    pub title: String,

    /// API version (required)
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// A server entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecServer {
    /// Server URL
    pub url: String,

    /// Server description
    #[serde(default)]
    pub description: Option<String>,
}

/// A tag declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecTag {
    /// Tag name
    pub name: String,

    /// Tag description
    #[serde(default)]
    pub description: Option<String>,
}

/// Errors that can occur when loading a spec.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("Failed to read spec file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid OpenAPI document: {0}")]
    Invalid(String),

    #[error("Unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

impl ApiSpec {
    /// Load and parse a spec from disk.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let content = fs::read_to_string(path).map_err(|e| SpecError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parse a spec from a JSON string.
    pub fn parse(content: &str) -> Result<Self, SpecError> {
        let spec: ApiSpec =
            serde_json::from_str(content).map_err(|e| SpecError::Invalid(e.to_string()))?;

        if !spec.openapi.starts_with('3') {
            return Err(SpecError::UnsupportedVersion(spec.openapi));
        }

        Ok(spec)
    }

    /// Base URL of the API, taken from the first server entry.
    pub fn base_url(&self) -> Option<&str> {
        self.servers.first().map(|s| s.url.as_str())
    }

    /// Count of operations across all path items.
    ///
    /// Only keys that are HTTP methods count; `parameters`, `summary` and
    /// other path-item fields do not.
    pub fn operation_count(&self) -> usize {
        self.paths
            .values()
            .map(|item| {
                item.keys()
                    .filter(|k| HTTP_METHODS.contains(&k.as_str()))
                    .count()
            })
            .sum()
    }

    /// Count of declared tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "openapi": "3.0.3",
        "info": { "title": "Pet Store", "version": "1.2.0" }
    }"#;

    #[test]
    fn parses_minimal_spec() {
        let spec = ApiSpec::parse(MINIMAL).unwrap();

        assert_eq!(spec.info.title, "Pet Store");
        assert_eq!(spec.info.version, "1.2.0");
        assert_eq!(spec.operation_count(), 0);
        assert!(spec.base_url().is_none());
    }

    #[test]
    fn counts_operations_not_path_item_fields() {
        let spec = ApiSpec::parse(
            r#"{
            "openapi": "3.1.0",
            "info": { "title": "T", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {},
                    "post": {},
                    "parameters": []
                },
                "/pets/{id}": {
                    "get": {},
                    "delete": {},
                    "summary": "single pet"
                }
            }
        }"#,
        )
        .unwrap();

        assert_eq!(spec.operation_count(), 4);
    }

    #[test]
    fn first_server_wins() {
        let spec = ApiSpec::parse(
            r#"{
            "openapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "servers": [
                { "url": "https://api.example.com/v1" },
                { "url": "https://staging.example.com/v1" }
            ]
        }"#,
        )
        .unwrap();

        assert_eq!(spec.base_url(), Some("https://api.example.com/v1"));
    }

    #[test]
    fn rejects_missing_title() {
        let result = ApiSpec::parse(
            r#"{
            "openapi": "3.0.0",
            "info": { "version": "1" }
        }"#,
        );

        assert!(matches!(result, Err(SpecError::Invalid(_))));
    }

    #[test]
    fn rejects_swagger_2() {
        let result = ApiSpec::parse(
            r#"{
            "openapi": "2.0",
            "info": { "title": "Old", "version": "1" }
        }"#,
        );

        assert!(matches!(result, Err(SpecError::UnsupportedVersion(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = ApiSpec::parse("{ not json");

        assert!(matches!(result, Err(SpecError::Invalid(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = ApiSpec::load(Path::new("/nonexistent/openapi.json"));

        assert!(matches!(result, Err(SpecError::Read { .. })));
    }
}
