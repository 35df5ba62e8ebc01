//! Delimiter-aware title rendering.
//!
//! This module provides the [`TitleRenderer`] which substitutes `{{name}}`
//! placeholders from a [`FieldMap`] and cleans up the punctuation around the
//! ones that could not be filled.
//!
//! # Delimiter markers
//!
//! A template may put a delimiter marker (e.g. `~~`) next to a placeholder.
//! The marker stands for "a separator goes here, but only if the field
//! exists":
//!
//! ```text
//! {{basename}}~~{{vault}}          basename=todo vault=Notes  ->  todo - Notes
//! {{basename}}~~{{vault}}          vault=Notes                ->  Notes
//! {{basename}}~~ - {{vault}}       vault=Notes                ->  Notes
//! ```
//!
//! # Passes
//!
//! 1. Unfilled placeholders are removed together with their adjacent
//!    delimiter, the separator beyond it, and enclosing parentheses.
//!    Delimiters left at either end of the template are dropped.
//! 2. Filled placeholders are substituted: `~~{{k}}` becomes
//!    `separator + value`, `{{k}}~~` becomes `value + separator`, then bare
//!    `{{k}}` becomes `value`.
//! 3. Any placeholder still left is stripped with its adjacent delimiters.
//! 4. Delimiter artifacts are collapsed: a leading delimiter is dropped, runs
//!    collapse to one, a delimiter followed by a non-space becomes the
//!    separator, and a delimiter not preceded by a space is dropped.
//!
//! Substituted values and injected separators are shielded behind opaque
//! tokens during passes 3 and 4 and restored at the end, so a value
//! containing `{{...}}` or the delimiter itself is inserted verbatim.

use regex::{Captures, NoExpand, Regex};
use std::collections::HashSet;
use tracing::{trace, warn};

use crate::config::TitleSettings;
use crate::fields::FieldMap;

const SHIELD_OPEN: char = '\u{E000}';
const SHIELD_CLOSE: char = '\u{E001}';

/// Renders title templates against a [`FieldMap`].
///
/// The renderer is stateless apart from its separator and delimiter; the same
/// inputs always produce the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRenderer {
    separator: String,
    delimiter: String,
}

impl TitleRenderer {
    /// Create a renderer with an explicit separator and delimiter marker.
    pub fn new(separator: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Create a renderer using the separator and delimiter from the settings.
    pub fn from_settings(settings: &TitleSettings) -> Self {
        Self::new(settings.title_separator.clone(), settings.delimiter.as_str())
    }

    /// The separator injected next to delimiter-adjacent placeholders.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The delimiter marker.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Render `template` with the values in `fields`.
    ///
    /// Never fails: unknown placeholders are removed, and a pattern that
    /// cannot be compiled only skips its cleanup step.
    pub fn render(&self, fields: &FieldMap, template: &str) -> String {
        let mut shields = Shields::default();
        let separator_token = shields.push(&self.separator);

        let title = self.strip_unfilled(fields, template);
        let title = self.trim_edge_delimiters(&title);
        let title = self.substitute(fields, &title, &mut shields, &separator_token);
        let title = self.strip_leftovers(&title);
        let title = self.collapse_delimiters(&title, &separator_token);
        let title = collapse_repeats(&title, &separator_token);
        let title = shields.restore(&title);

        trace!("rendered '{}' -> '{}'", template, title);
        title
    }

    /// Remove placeholders whose field is unfilled, with their delimiter context.
    fn strip_unfilled(&self, fields: &FieldMap, template: &str) -> String {
        let Some(names_re) = compile(r"\{\{([^}]*)\}\}") else {
            return template.to_string();
        };

        let mut seen = HashSet::new();
        let unfilled: Vec<String> = names_re
            .captures_iter(template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .filter(|name| fields.filled(name).is_none())
            .filter(|name| seen.insert(*name))
            .map(regex::escape)
            .collect();

        if unfilled.is_empty() {
            return template.to_string();
        }

        let placeholder = format!(r"\{{\{{(?:{})\}}\}}", unfilled.join("|"));
        let Some(re) = self.placeholder_context_regex(&placeholder, true) else {
            return template.to_string();
        };

        re.replace_all(template, |caps: &Captures<'_>| self.removal(template, caps))
            .into_owned()
    }

    /// Drop delimiters at the very start or end; they have no neighbour to separate.
    fn trim_edge_delimiters(&self, template: &str) -> String {
        let delimiter = self.delimiter.as_str();
        let mut trimmed = template;
        if !delimiter.is_empty() {
            while let Some(rest) = trimmed.strip_prefix(delimiter) {
                trimmed = rest;
            }
            while let Some(rest) = trimmed.strip_suffix(delimiter) {
                trimmed = rest;
            }
        }
        trimmed.to_string()
    }

    /// Substitute filled fields, delimiter-adjacent forms first.
    fn substitute(
        &self,
        fields: &FieldMap,
        template: &str,
        shields: &mut Shields,
        separator_token: &str,
    ) -> String {
        let mut title = template.to_string();

        for (name, value) in fields.iter_filled() {
            let placeholder = format!("{{{{{name}}}}}");
            if !title.contains(&placeholder) {
                continue;
            }

            let token = shields.push(value);
            if !self.delimiter.is_empty() {
                title = title.replace(
                    &format!("{}{placeholder}", self.delimiter),
                    &format!("{separator_token}{token}"),
                );
                title = title.replace(
                    &format!("{placeholder}{}", self.delimiter),
                    &format!("{token}{separator_token}"),
                );
            }
            title = title.replace(&placeholder, &token);
        }

        title
    }

    /// Strip any placeholder that survived substitution.
    fn strip_leftovers(&self, title: &str) -> String {
        match self.placeholder_context_regex(r"\{\{[^}]*\}\}", false) {
            Some(re) => re
                .replace_all(title, |caps: &Captures<'_>| self.removal(title, caps))
                .into_owned(),
            None => title.to_string(),
        }
    }

    /// Apply the ordered delimiter cleanup rules.
    fn collapse_delimiters(&self, title: &str, separator_token: &str) -> String {
        if self.delimiter.is_empty() {
            return title.to_string();
        }
        let d = regex::escape(&self.delimiter);
        let mut title = title.to_string();

        if let Some(leading) = compile(&format!("^{d}")) {
            title = leading.replace(&title, "").into_owned();
        }

        if let Some(runs) = compile(&format!("(?:{d}){{2,}}")) {
            title = runs.replace_all(&title, NoExpand(&self.delimiter)).into_owned();
        }

        if let Some(joining) = compile(&format!("{d}([^ ])")) {
            title = joining
                .replace_all(&title, |caps: &Captures<'_>| format!("{separator_token}{}", &caps[1]))
                .into_owned();
        }

        if let Some(trailing) = compile(&format!("(^|[^ ]){d}")) {
            title = trailing
                .replace_all(&title, |caps: &Captures<'_>| caps[1].to_string())
                .into_owned();
        }

        title
    }

    /// Build a pattern matching `placeholder` with its optional delimiter context.
    ///
    /// Alternatives, leftmost first:
    /// - `(` delimiter? placeholder delimiter? `)`
    /// - separator? delimiter (lead), placeholder, delimiter separator? (trail)
    ///
    /// Separators beyond the delimiter are only consumed when `with_separator` is set.
    fn placeholder_context_regex(&self, placeholder: &str, with_separator: bool) -> Option<Regex> {
        if self.delimiter.is_empty() {
            return compile(&format!(r"(?P<paren>\({placeholder}\))|{placeholder}"));
        }

        let d = regex::escape(&self.delimiter);
        let s = if with_separator && !self.separator.is_empty() {
            format!("(?:{})?", regex::escape(&self.separator))
        } else {
            String::new()
        };

        compile(&format!(
            r"(?P<paren>\((?:{d})?{placeholder}(?:{d})?\))|(?P<lead>{s}{d})?{placeholder}(?P<trail>{d}{s})?"
        ))
    }

    /// Replacement for a removed placeholder.
    ///
    /// A placeholder sandwiched between two delimiters leaves one behind when
    /// non-space text touches the match on both sides, so the joining rule
    /// turns it into a separator. Anything else is removed outright.
    fn removal(&self, haystack: &str, caps: &Captures<'_>) -> String {
        let sandwiched =
            caps.name("paren").is_none() && caps.name("lead").is_some() && caps.name("trail").is_some();
        let Some(whole) = caps.get(0) else {
            return String::new();
        };

        let before = haystack[..whole.start()].chars().next_back();
        let after = haystack[whole.end()..].chars().next();
        let joined = |c: Option<char>| c.is_some_and(|c| c != ' ');

        if sandwiched && joined(before) && joined(after) {
            self.delimiter.clone()
        } else {
            String::new()
        }
    }
}

/// Render `template` with an ad-hoc separator and delimiter.
///
/// ```
/// use notetitle::fields::FieldMap;
/// use notetitle::templating::render_title;
///
/// let fields: FieldMap = [("vault", "Notes"), ("basename", "todo")].into_iter().collect();
/// assert_eq!(render_title(&fields, "{{basename}}~~{{vault}}", " - ", "~~"), "todo - Notes");
///
/// let fields: FieldMap = [("vault", "Notes")].into_iter().collect();
/// assert_eq!(render_title(&fields, "{{basename}}~~ - {{vault}}", " - ", "~~"), "Notes");
/// ```
pub fn render_title(fields: &FieldMap, template: &str, separator: &str, delimiter: &str) -> String {
    TitleRenderer::new(separator, delimiter).render(fields, template)
}

/// Collapse consecutive injected separators into one.
fn collapse_repeats(title: &str, separator_token: &str) -> String {
    let doubled = format!("{separator_token}{separator_token}");
    let mut title = title.to_string();
    while title.contains(&doubled) {
        title = title.replace(&doubled, separator_token);
    }
    title
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("skipping title cleanup step, invalid pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Opaque stand-ins for text that must survive the cleanup passes untouched.
#[derive(Default)]
struct Shields {
    values: Vec<String>,
}

impl Shields {
    fn push(&mut self, value: &str) -> String {
        let token = format!("{SHIELD_OPEN}{}{SHIELD_CLOSE}", self.values.len());
        self.values.push(value.to_string());
        token
    }

    /// Swap every token back in a single pass, so restored values are never rescanned.
    fn restore(&self, title: &str) -> String {
        let Some(re) = compile(&format!("{SHIELD_OPEN}([0-9]+){SHIELD_CLOSE}")) else {
            return title.to_string();
        };

        re.replace_all(title, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.values.get(index))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
    }
}
