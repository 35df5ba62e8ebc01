//! Front-matter extraction with a raw gray_matter engine.
//!
//! gray_matter finds the `---` fenced block; the block text is then parsed by
//! serde_yaml into an ordered [`FrontMatter`] mapping so keys keep their
//! document order. The helpers at the bottom turn YAML values into the flat
//! strings the field map stores.

use gray_matter::{Matter, Pod, engine::Engine};
use serde_yaml::Value;
use std::fmt::Debug;
use tracing::warn;

use super::FrontMatter;
use crate::constants::UNRESOLVED_TEMPLATE_MARKER;

/// Custom gray_matter engine that returns raw frontmatter text without parsing.
///
/// Parsing is left to serde_yaml so that a malformed block can be reported
/// and skipped instead of failing the whole read.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// Front-matter parser for note contents.
pub struct FrontmatterParser {
    raw_matter: Matter<RawFrontmatter>,
}

impl Debug for FrontmatterParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontmatterParser").finish()
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterParser {
    /// Create a new frontmatter parser.
    pub fn new() -> Self {
        Self {
            raw_matter: Matter::new(),
        }
    }

    /// Extract just the raw frontmatter string, if the content has a non-empty block.
    pub fn extract_raw_frontmatter(&self, content: &str) -> Option<String> {
        match self.raw_matter.parse::<String>(content) {
            Ok(result) => result.data.filter(|frontmatter_text| !frontmatter_text.trim().is_empty()),
            Err(_) => None,
        }
    }

    /// Parse the front-matter of `content` into an ordered mapping.
    ///
    /// Returns `None` when there is no block, when the block is not a YAML
    /// mapping, or when it is malformed. The malformed case is logged with
    /// `origin` (usually the note path) for context.
    pub fn parse(&self, content: &str, origin: &str) -> Option<FrontMatter> {
        let raw = self.extract_raw_frontmatter(content)?;

        match serde_yaml::from_str::<Value>(&raw) {
            Ok(Value::Mapping(mapping)) => Some(mapping),
            Ok(Value::Null) => None,
            Ok(_) => {
                warn!("front-matter in '{}' is not a key-value mapping, ignoring it", origin);
                None
            }
            Err(e) => {
                warn!("unable to parse YAML front-matter in '{}': {}", origin, e);
                None
            }
        }
    }
}

/// Render a front-matter key as a field-name suffix.
///
/// Scalar keys (strings, numbers, booleans) are accepted; anything else has no
/// sensible placeholder spelling and yields `None`.
pub fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Flatten a front-matter value into the string inserted into titles.
///
/// ```
/// use notetitle::markdown::frontmatter::stringify_value;
///
/// let tags: serde_yaml::Value = serde_yaml::from_str("[rust, notes]").unwrap();
/// assert_eq!(stringify_value(&tags), "rust, notes");
/// assert_eq!(stringify_value(&serde_yaml::Value::Null), "");
/// ```
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            items.iter().map(stringify_value).collect::<Vec<_>>().join(", ")
        }
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_else(|_| {
            serde_yaml::to_string(value).map(|s| s.trim_end().to_string()).unwrap_or_default()
        }),
        Value::Tagged(tagged) => stringify_value(&tagged.value),
    }
}

/// Whether a value still contains template markup from another tool.
pub fn has_unresolved_markup(value: &str) -> bool {
    value.contains(UNRESOLVED_TEMPLATE_MARKER)
}
