//! Front matter extraction and rendering.

use serde::{Deserialize, Serialize};

/// Front matter of a generated documentation page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for SEO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Position in the sidebar (lower = first)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,
}

impl Frontmatter {
    /// Front matter with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            sidebar_position: None,
        }
    }

    /// Render as a YAML block delimited by `---` lines.
    pub fn render(&self) -> String {
        // Only these three fields are serialized, all serde_yaml-safe
        let yaml = serde_yaml::to_string(self).expect("front matter serializes");
        format!("---\n{}---\n", yaml)
    }
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front matter: {0}")]
    InvalidYaml(String),
}

/// Extract front matter from a document.
///
/// Returns the parsed front matter (if the document starts with a `---`
/// block) and the content after it.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = "---\ntitle: API Reference\ndescription: Generated reference\nsidebar_position: 2\n---\n\n# API Reference\n";

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title, "API Reference");
        assert_eq!(fm.description, Some("Generated reference".to_string()));
        assert_eq!(fm.sidebar_position, Some(2));
        assert!(content.starts_with("# API Reference"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo front matter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn render_roundtrips() {
        let fm = Frontmatter {
            title: "Reference".to_string(),
            description: Some("API docs".to_string()),
            sidebar_position: Some(3),
        };

        let block = fm.render();
        let source = format!("{}\nbody", block);

        let (parsed, rest) = extract_frontmatter(&source).unwrap();

        assert_eq!(parsed, Some(fm));
        assert_eq!(rest, "body");
    }

    #[test]
    fn render_omits_empty_fields() {
        let block = Frontmatter::titled("FAQ").render();

        assert_eq!(block, "---\ntitle: FAQ\n---\n");
    }
}
