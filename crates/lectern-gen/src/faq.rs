//! FAQ assembler.
//!
//! Reads an ordered list of question/answer pairs from a YAML data file and
//! renders them into one generated MDX page. Source order is presentation
//! order; there is no deduplication and no sorting.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

/// A single question/answer pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqEntry {
    /// The question, rendered as a section heading
    pub question: String,

    /// The answer, rendered immediately below its question
    pub answer: String,
}

/// Errors that can occur while assembling the FAQ page.
#[derive(Debug, thiserror::Error)]
pub enum FaqError {
    #[error("Failed to read FAQ data {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid FAQ data: {0}")]
    Parse(String),

    #[error("FAQ entry {index} has an empty question")]
    EmptyQuestion { index: usize },

    #[error("Failed to render FAQ page: {0}")]
    Render(String),

    #[error("Failed to write FAQ page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

const FAQ_TEMPLATE: &str = r#"---
title: {{ title }}
---

# {{ title }}
{%- for entry in entries %}

## {{ entry.question }}

{{ entry.answer }}
{%- endfor %}
"#;

/// Load FAQ entries from a YAML data file.
pub fn load_entries(path: &Path) -> Result<Vec<FaqEntry>, FaqError> {
    let content = fs::read_to_string(path).map_err(|e| FaqError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let entries: Vec<FaqEntry> =
        serde_yaml::from_str(&content).map_err(|e| FaqError::Parse(e.to_string()))?;

    for (index, entry) in entries.iter().enumerate() {
        if entry.question.trim().is_empty() {
            return Err(FaqError::EmptyQuestion { index });
        }
    }

    Ok(entries)
}

/// Render the FAQ page from entries, preserving source order.
pub fn render_page(entries: &[FaqEntry], title: &str) -> Result<String, FaqError> {
    let mut env = Environment::new();
    env.add_template("faq.mdx", FAQ_TEMPLATE)
        .expect("static template parses");

    let template = env.get_template("faq.mdx").expect("template registered");

    let page = template
        .render(context! {
            title => title,
            entries => entries,
        })
        .map_err(|e| FaqError::Render(e.to_string()))?;

    // Render engines differ on trailing newlines; pin it to exactly one
    Ok(format!("{}\n", page.trim_end_matches('\n')))
}

/// Assemble the FAQ page: read the data file, render, write the page.
///
/// The page is fully rendered in memory before the write; prior output is
/// overwritten.
pub fn assemble_faq(data_path: &Path, out_path: &Path, title: &str) -> Result<usize, FaqError> {
    let entries = load_entries(data_path)?;
    let page = render_page(&entries, title)?;

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| FaqError::Write {
            path: out_path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(out_path, page).map_err(|e| FaqError::Write {
        path: out_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        "Assembled FAQ page with {} entries at {}",
        entries.len(),
        out_path.display()
    );

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn entry(q: &str, a: &str) -> FaqEntry {
        FaqEntry {
            question: q.to_string(),
            answer: a.to_string(),
        }
    }

    #[test]
    fn renders_entries_in_source_order() {
        let entries = vec![entry("A?", "B."), entry("C?", "D.")];

        let page = render_page(&entries, "FAQ").unwrap();

        let a_pos = page.find("## A?").unwrap();
        let b_pos = page.find("B.").unwrap();
        let c_pos = page.find("## C?").unwrap();
        let d_pos = page.find("D.").unwrap();

        assert!(a_pos < b_pos, "answer follows its question");
        assert!(b_pos < c_pos, "entries keep source order");
        assert!(c_pos < d_pos);

        // Each question and answer appears exactly once
        assert_eq!(page.matches("A?").count(), 1);
        assert_eq!(page.matches("C?").count(), 1);
    }

    #[test]
    fn page_carries_front_matter() {
        let page = render_page(&[entry("Q?", "A.")], "FAQ").unwrap();

        assert!(page.starts_with("---\ntitle: FAQ\n---\n"));
        assert!(page.contains("# FAQ"));
        assert!(page.ends_with('\n'));
    }

    #[test]
    fn empty_list_renders_header_only() {
        let page = render_page(&[], "FAQ").unwrap();

        assert!(page.contains("# FAQ"));
        assert!(!page.contains("##"));
    }

    #[test]
    fn loads_yaml_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("faq.yml");
        fs::write(
            &path,
            "- question: \"How do I install?\"\n  answer: \"Run the installer.\"\n- question: \"Is it free?\"\n  answer: \"Yes.\"\n",
        )
        .unwrap();

        let entries = load_entries(&path).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "How do I install?");
        assert_eq!(entries[1].answer, "Yes.");
    }

    #[test]
    fn rejects_empty_question() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("faq.yml");
        fs::write(&path, "- question: \"\"\n  answer: \"orphan\"\n").unwrap();

        let result = load_entries(&path);

        assert!(matches!(result, Err(FaqError::EmptyQuestion { index: 0 })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("faq.yml");
        fs::write(&path, "question: not-a-list").unwrap();

        let result = load_entries(&path);

        assert!(matches!(result, Err(FaqError::Parse(_))));
    }

    #[test]
    fn assemble_writes_page() {
        let temp = tempdir().unwrap();
        let data = temp.path().join("faq.yml");
        let out = temp.path().join("docs/faq.mdx");
        fs::write(&data, "- question: \"A?\"\n  answer: \"B.\"\n").unwrap();

        let count = assemble_faq(&data, &out, "FAQ").unwrap();

        assert_eq!(count, 1);
        let page = fs::read_to_string(&out).unwrap();
        assert!(page.contains("## A?"));
        assert!(page.contains("B."));
    }

    #[test]
    fn assemble_errors_on_missing_data() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("faq.mdx");

        let result = assemble_faq(Path::new("/nonexistent/faq.yml"), &out, "FAQ");

        assert!(matches!(result, Err(FaqError::Read { .. })));
        assert!(!out.exists());
    }
}
