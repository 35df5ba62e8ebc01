//! Configuration management for notetitle
//!
//! # Modules
//!
//! - `settings` - [`TitleSettings`] and the [`Delimiter`] marker set
//! - `store` - [`SettingsStore`] backends: TOML file and in-memory
//!
//! # Settings File
//!
//! **Location:**
//! - Unix/macOS: `~/.notetitle/settings.toml`
//! - Windows: `%LOCALAPPDATA%\notetitle\settings.toml`
//!
//! The CLI accepts `--config <path>` (or `NOTETITLE_CONFIG`) to use another file.
//!
//! ```toml
//! titleTemplate = "{{basename}}~~{{vault}} - App v{{version}}"
//! titleTemplateEmpty = "{{vault}} - App v{{version}}"
//! titleSeparator = " - "
//! delimiter = "~~"
//! ```
//!
//! Edits are written through immediately; there is no batching.

mod settings;
mod store;

pub use settings::{Delimiter, TitleSettings};
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
