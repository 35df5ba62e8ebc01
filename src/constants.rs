//! Global constants used throughout the notetitle codebase.
//!
//! This module contains the debounce window, default templates, and the
//! literal markers the resolver and renderer look for. Defining them
//! centrally keeps the settings defaults, the CLI and the tests in agreement.

use std::time::Duration;

/// Debounce window for title refreshes (500ms).
///
/// Bursts of host notifications (a rename typically fires a rename event
/// followed by one or more metadata re-resolutions) collapse into a single
/// render once no new request has arrived for this long.
pub const RENDER_DEBOUNCE: Duration = Duration::from_millis(500);

/// Extension of the host's native document format.
///
/// `basename` only strips the extension for files of this type; other files
/// keep their full name so `image.png` does not render as `image`.
pub const NATIVE_EXTENSION: &str = "md";

/// Prefix applied to every front-matter key in the field map.
pub const FRONTMATTER_PREFIX: &str = "frontmatter.";

/// Opening tag of template markup left behind by other tools (e.g. `<% tp.date.now() %>`).
///
/// Front-matter values containing it have not been rendered yet and are kept out of the title.
pub const UNRESOLVED_TEMPLATE_MARKER: &str = "<%";

/// Default template used while a file is active.
pub const DEFAULT_TITLE_TEMPLATE: &str = "{{basename}}~~{{vault}} - App v{{version}}";

/// Default template used when no file is active.
pub const DEFAULT_TITLE_TEMPLATE_EMPTY: &str = "{{vault}} - App v{{version}}";

/// Default separator injected next to a delimiter-adjacent placeholder.
pub const DEFAULT_TITLE_SEPARATOR: &str = " - ";

/// Directory holding host configuration inside a vault.
pub const HOST_CONFIG_DIR: &str = ".obsidian";

/// File inside [`HOST_CONFIG_DIR`] recording the active named workspace.
pub const WORKSPACES_FILE: &str = "workspaces.json";
