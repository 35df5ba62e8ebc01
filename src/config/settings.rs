//! Title settings: the two templates, the separator and the delimiter marker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_TITLE_SEPARATOR, DEFAULT_TITLE_TEMPLATE, DEFAULT_TITLE_TEMPLATE_EMPTY};
use crate::core::TitleError;

/// Delimiter markers a template can place next to a placeholder.
///
/// The set is fixed so that no marker can collide with the `{{`/`}}`
/// placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Delimiter {
    /// `~~`
    #[default]
    #[serde(rename = "~~")]
    Tilde,
    /// `%%`
    #[serde(rename = "%%")]
    Percent,
    /// `##`
    #[serde(rename = "##")]
    Hash,
    /// `__`
    #[serde(rename = "__")]
    Underscore,
}

impl Delimiter {
    /// Every supported marker.
    pub const ALL: [Self; 4] = [Self::Tilde, Self::Percent, Self::Hash, Self::Underscore];

    /// The literal marker text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tilde => "~~",
            Self::Percent => "%%",
            Self::Hash => "##",
            Self::Underscore => "__",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delimiter {
    type Err = TitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|d| d.as_str() == s).ok_or_else(|| {
            TitleError::InvalidDelimiter {
                value: s.to_string(),
            }
        })
    }
}

/// Persisted title settings.
///
/// Keys are camelCase on disk. Missing keys fall back to their defaults so a
/// partially written file still loads.
///
/// ```toml
/// titleTemplate = "{{basename}}~~{{vault}} - App v{{version}}"
/// titleTemplateEmpty = "{{vault}} - App v{{version}}"
/// titleSeparator = " - "
/// delimiter = "~~"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleSettings {
    /// Template used while a file is active.
    pub title_template: String,
    /// Template used when no file is active.
    pub title_template_empty: String,
    /// Separator injected for delimiter-adjacent placeholders.
    pub title_separator: String,
    /// Delimiter marker.
    pub delimiter: Delimiter,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            title_template_empty: DEFAULT_TITLE_TEMPLATE_EMPTY.to_string(),
            title_separator: DEFAULT_TITLE_SEPARATOR.to_string(),
            delimiter: Delimiter::default(),
        }
    }
}

impl TitleSettings {
    /// Names accepted by [`set`](Self::set).
    pub const KEYS: [&'static str; 4] =
        ["title-template", "title-template-empty", "separator", "delimiter"];

    /// The template to render: the file template when a file is active.
    pub fn template_for(&self, has_file: bool) -> &str {
        if has_file {
            &self.title_template
        } else {
            &self.title_template_empty
        }
    }

    /// Set a single field by its CLI name.
    ///
    /// # Errors
    ///
    /// [`TitleError::UnknownSettingsKey`] for a name outside [`KEYS`](Self::KEYS),
    /// [`TitleError::InvalidDelimiter`] for an unsupported marker.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TitleError> {
        match key {
            "title-template" | "titleTemplate" => self.title_template = value.to_string(),
            "title-template-empty" | "titleTemplateEmpty" => {
                self.title_template_empty = value.to_string();
            }
            "separator" | "titleSeparator" => self.title_separator = value.to_string(),
            "delimiter" => self.delimiter = value.parse()?,
            _ => {
                return Err(TitleError::UnknownSettingsKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
