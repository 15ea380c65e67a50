//! Reference post-processor.
//!
//! The spec-to-Markdown converter emits a handful of known-bad patterns the
//! site framework rejects: headings without a space after the hashes, more
//! than one H1, class-style code fence info strings, raw HTML comments, and
//! pages with no front matter. Each fix is a pass `&str -> String`, applied
//! in sequence. Every pass is idempotent, so a conforming document is a
//! fixed point of the whole pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// Errors that can occur during post-processing.
#[derive(Debug, thiserror::Error)]
pub enum PostprocessError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid front matter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("Reference directory not found: {0}")]
    DirNotFound(PathBuf),
}

/// Run the full pass pipeline on one document.
///
/// `fallback_title` is used for the inserted front matter when the document
/// has no heading to derive a title from.
pub fn process_document(source: &str, fallback_title: &str) -> Result<String, FrontmatterError> {
    let mut result = fix_heading_spacing(source);
    result = demote_duplicate_h1(&result);
    result = fix_fence_languages(&result);
    result = html_comments_to_mdx(&result);
    result = collapse_blank_lines(&result);
    result = trim_trailing_whitespace(&result);
    result = ensure_front_matter(&result, fallback_title)?;
    result = ensure_trailing_newline(&result);

    Ok(result)
}

/// Post-process one generated file in place.
///
/// The file is read fully, transformed in memory, and written fully; a
/// missing or unreadable file aborts with an I/O error and nothing is
/// touched on disk. Returns whether the file changed.
pub fn process_file(path: &Path) -> Result<bool, PostprocessError> {
    let content = fs::read_to_string(path).map_err(|e| PostprocessError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Reference");

    let processed =
        process_document(&content, fallback).map_err(|e| PostprocessError::Frontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if processed == content {
        return Ok(false);
    }

    fs::write(path, processed).map_err(|e| PostprocessError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(true)
}

/// Post-process every Markdown file under the reference directory.
///
/// Returns the number of files processed.
pub fn process_reference_dir(dir: &Path) -> Result<usize, PostprocessError> {
    if !dir.exists() {
        return Err(PostprocessError::DirNotFound(dir.to_path_buf()));
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|x| x.to_str()),
                Some("md") | Some("mdx")
            )
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    let results: Vec<Result<bool, PostprocessError>> =
        files.par_iter().map(|path| process_file(path)).collect();

    let mut changed = 0;
    for result in results {
        if result? {
            changed += 1;
        }
    }

    tracing::info!(
        "Post-processed {} reference file(s), {} rewritten",
        files.len(),
        changed
    );

    Ok(files.len())
}

/// Apply a per-line rewrite to everything outside code fences.
fn rewrite_outside_fences<F>(md: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in md.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            lines.push(line.to_string());
        } else if in_fence {
            lines.push(line.to_string());
        } else {
            lines.push(rewrite(line));
        }
    }

    lines.join("\n")
}

/// Insert the missing space in headings like `#Title`.
fn fix_heading_spacing(md: &str) -> String {
    static HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(#{1,6})([^#\s].*)$").expect("valid regex"));

    rewrite_outside_fences(md, |line| {
        HEADING_RE.replace(line, "$1 $2").into_owned()
    })
}

/// Demote every H1 after the first to an H2.
fn demote_duplicate_h1(md: &str) -> String {
    let mut h1_count = 0;

    rewrite_outside_fences(md, |line| {
        if let Some(text) = line.strip_prefix("# ") {
            h1_count += 1;
            if h1_count > 1 {
                return format!("## {text}");
            }
        }
        line.to_string()
    })
}

/// Strip class-style prefixes from fence info strings.
///
/// Converters that render from HTML carry the class name into the fence:
/// `language-json`, `lang-python`, `highlight-rust`.
fn fix_fence_languages(md: &str) -> String {
    static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^(\s*```)(?:language-|lang-|highlight-)(\w+)").expect("valid regex")
    });

    FENCE_RE.replace_all(md, "$1$2").into_owned()
}

/// Rewrite single-line HTML comments to MDX comments.
fn html_comments_to_mdx(md: &str) -> String {
    static COMMENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<!--(.*?)-->").expect("valid regex"));

    rewrite_outside_fences(md, |line| {
        COMMENT_RE.replace_all(line, "{/*$1*/}").into_owned()
    })
}

/// Collapse runs of blank lines outside fences to a single blank line.
fn collapse_blank_lines(md: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;
    let mut blank_run = 0;

    for line in md.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            blank_run = 0;
            lines.push(line.to_string());
            continue;
        }

        if in_fence {
            lines.push(line.to_string());
            continue;
        }

        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Trim trailing whitespace on lines outside fences.
fn trim_trailing_whitespace(md: &str) -> String {
    rewrite_outside_fences(md, |line| line.trim_end().to_string())
}

/// Prepend front matter when the document has none.
///
/// The title comes from the first heading, falling back to the provided
/// title. A document that already carries front matter is returned
/// unchanged; malformed front matter is an error, not something to paper
/// over.
fn ensure_front_matter(md: &str, fallback_title: &str) -> Result<String, FrontmatterError> {
    let (existing, _) = extract_frontmatter(md)?;
    if existing.is_some() {
        return Ok(md.to_string());
    }

    let title = first_heading(md).unwrap_or_else(|| fallback_title.to_string());
    let block = Frontmatter::titled(title).render();

    Ok(format!("{}\n{}", block, md.trim_start_matches('\n')))
}

/// Ensure the document ends with exactly one newline.
fn ensure_trailing_newline(md: &str) -> String {
    let trimmed = md.trim_end_matches('\n');
    format!("{trimmed}\n")
}

/// Text of the first heading in the document, if any.
fn first_heading(md: &str) -> Option<String> {
    let parser = Parser::new(md);
    let mut in_heading = false;
    let mut title = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::Text(text) | Event::Code(text) if in_heading => title.push_str(&text),
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_heading = false;
                title.clear();
            }
            _ => {}
        }
    }

    None
}
