//! Build a [`FieldMap`] from the host's current state.

use regex::Regex;
use tracing::{debug, trace, warn};

use super::{FieldMap, FileDescriptor};
use crate::constants::FRONTMATTER_PREFIX;
use crate::markdown::{FrontMatter, frontmatter};

/// Host-side collaborator that answers questions about the vault.
///
/// Every method must be cheap and non-blocking: the title service calls them
/// on each render. A host whose metadata index is asynchronous should answer
/// [`front_matter`](Self::front_matter) from its cache.
pub trait FieldSource: Send + Sync {
    /// Name of the vault (container). Never empty.
    fn vault_name(&self) -> String;

    /// The active named workspace, `None` when the feature is unavailable.
    fn active_workspace(&self) -> Option<String>;

    /// The document currently focused, if any.
    fn active_file(&self) -> Option<FileDescriptor>;

    /// Whether `file` is the currently active document.
    fn is_active(&self, file: &FileDescriptor) -> bool {
        self.active_file().is_some_and(|active| active.path == file.path)
    }

    /// Front-matter of `file`, `Ok(None)` when it has none.
    fn front_matter(&self, file: &FileDescriptor) -> anyhow::Result<Option<FrontMatter>>;
}

/// Extract the host version from a window title ending in `vMAJOR.MINOR.PATCH`.
///
/// Trailing whitespace is ignored. Returns `None` when the title carries no
/// version suffix.
///
/// ```
/// use notetitle::fields::parse_host_version;
///
/// assert_eq!(parse_host_version("Notes - Obsidian v1.4.16").as_deref(), Some("1.4.16"));
/// assert_eq!(parse_host_version("Notes - Obsidian"), None);
/// ```
pub fn parse_host_version(title: &str) -> Option<String> {
    let re = Regex::new(r"v(\d+\.\d+\.\d+)\s*$").ok()?;
    re.captures(title).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Resolves the fields available to title templates.
///
/// The resolver owns the only state that outlives a render: the host version
/// captured from the baseline title at startup.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    version: String,
}

impl FieldResolver {
    /// Create a resolver, parsing the host version out of the baseline title.
    #[must_use]
    pub fn new(baseline_title: &str) -> Self {
        let version = parse_host_version(baseline_title).unwrap_or_default();
        debug!("host version from baseline title: '{}'", version);
        Self {
            version,
        }
    }

    /// The host version, empty if the baseline title had none.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build the field map for `active`.
    ///
    /// Built-in fields come first so they win over same-named front-matter
    /// keys. Folders and virtual nodes are treated like an absent document.
    /// A failing front-matter lookup is logged and the render continues
    /// without front-matter fields.
    pub fn resolve(&self, source: &dyn FieldSource, active: Option<&FileDescriptor>) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert_value("vault", source.vault_name());
        fields.insert_value("workspace", source.active_workspace().unwrap_or_default());
        fields.insert_value("version", self.version.clone());

        let Some(file) = active.filter(|file| file.is_file()) else {
            return fields;
        };

        fields.insert_value("filepath", file.path.clone());
        fields.insert_value("filename", file.name.clone());
        fields.insert_value("basename", file.basename());
        fields.insert_value("extension", file.extension.clone());

        match source.front_matter(file) {
            Ok(Some(front_matter)) => insert_front_matter(&mut fields, &front_matter, &file.path),
            Ok(None) => {}
            Err(e) => {
                warn!("front-matter of '{}' unavailable, rendering without it: {:#}", file.path, e);
            }
        }

        fields
    }
}

fn insert_front_matter(fields: &mut FieldMap, front_matter: &FrontMatter, path: &str) {
    for (key, value) in front_matter {
        let Some(key) = frontmatter::key_to_string(key) else {
            trace!("skipping non-scalar front-matter key in '{}'", path);
            continue;
        };
        let value = frontmatter::stringify_value(value);

        if frontmatter::has_unresolved_markup(&value) {
            debug!("skipping front-matter key '{}' in '{}': unresolved template markup", key, path);
            continue;
        }

        fields.insert_value(format!("{FRONTMATTER_PREFIX}{key}"), value);
    }
}
