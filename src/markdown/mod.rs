//! Markdown note reading and front-matter extraction.
//!
//! Notes are plain Markdown files with an optional YAML front-matter block:
//!
//! ```markdown
//! ---
//! project: Apollo
//! status: draft
//! tags: [planning, q3]
//! ---
//!
//! # Launch checklist
//! ```
//!
//! Every top-level key becomes a `frontmatter.<key>` placeholder. Values are
//! flattened to strings by [`frontmatter::stringify_value`].

pub mod frontmatter;

use anyhow::{Context, Result};
use std::path::Path;

use crate::constants::NATIVE_EXTENSION;
pub use frontmatter::FrontmatterParser;

/// Parsed front-matter: an ordered YAML mapping of top-level keys.
pub type FrontMatter = serde_yaml::Mapping;

/// Check whether a path has the native Markdown extension.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NATIVE_EXTENSION))
}

/// Read a note from disk and return its front-matter.
///
/// Files without a Markdown extension have no front-matter and are not read.
/// A malformed block is logged and reported as `Ok(None)`; only IO failures
/// are errors.
pub fn read_front_matter(path: &Path) -> Result<Option<FrontMatter>> {
    if !is_markdown_file(path) {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;

    Ok(FrontmatterParser::new().parse(&content, &path.display().to_string()))
}
