//! Test utilities for notetitle
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//! - [`RecordingSink`] - a [`TitleSink`] that remembers every title it was given
//! - [`StaticHost`] - an in-memory [`FieldSource`] with a settable active file
//!
//! # Example
//!
//! ```rust,no_run
//! use notetitle::fields::FileDescriptor;
//! use notetitle::test_utils::{RecordingSink, StaticHost};
//!
//! let host = StaticHost::new("Notes").with_front_matter("todo.md", "project: Apollo");
//! host.set_active(Some(FileDescriptor::file("todo.md")));
//! let sink = RecordingSink::default();
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, Once, RwLock};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::fields::{FieldSource, FileDescriptor};
use crate::markdown::{FrontMatter, FrontmatterParser};
use crate::title::TitleSink;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, else `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=notetitle=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A sink that records every title it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    titles: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// All titles set so far, oldest first.
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().map(|titles| titles.clone()).unwrap_or_default()
    }

    /// The most recent title.
    pub fn last(&self) -> Option<String> {
        self.titles().pop()
    }

    /// Number of `set_display_title` calls.
    pub fn count(&self) -> usize {
        self.titles().len()
    }

    /// Forget recorded titles.
    pub fn clear(&self) {
        if let Ok(mut titles) = self.titles.lock() {
            titles.clear();
        }
    }
}

impl TitleSink for RecordingSink {
    fn set_display_title(&self, title: &str) {
        if let Ok(mut titles) = self.titles.lock() {
            titles.push(title.to_string());
        }
    }
}

/// In-memory host with a fixed vault name and settable state.
#[derive(Debug, Default)]
pub struct StaticHost {
    vault: String,
    workspace: RwLock<Option<String>>,
    active: RwLock<Option<FileDescriptor>>,
    front_matter: RwLock<HashMap<String, FrontMatter>>,
    failing: RwLock<Vec<String>>,
}

impl StaticHost {
    /// A host for the vault `vault` with nothing active.
    pub fn new(vault: impl Into<String>) -> Self {
        Self {
            vault: vault.into(),
            ..Self::default()
        }
    }

    /// Attach front-matter, given as YAML, to the file at `path`.
    #[must_use]
    pub fn with_front_matter(self, path: &str, yaml: &str) -> Self {
        self.set_front_matter(path, yaml);
        self
    }

    /// Set the active workspace.
    #[must_use]
    pub fn with_workspace(self, workspace: &str) -> Self {
        self.set_workspace(Some(workspace.to_string()));
        self
    }

    /// Replace the front-matter of the file at `path`.
    pub fn set_front_matter(&self, path: &str, yaml: &str) {
        let content = format!("---\n{yaml}\n---\n");
        let Some(parsed) = FrontmatterParser::new().parse(&content, path) else {
            return;
        };
        if let Ok(mut map) = self.front_matter.write() {
            map.insert(path.to_string(), parsed);
        }
    }

    /// Make front-matter lookups for `path` fail.
    pub fn fail_front_matter(&self, path: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.push(path.to_string());
        }
    }

    /// Set or clear the active workspace.
    pub fn set_workspace(&self, workspace: Option<String>) {
        if let Ok(mut current) = self.workspace.write() {
            *current = workspace;
        }
    }

    /// Set or clear the active file.
    pub fn set_active(&self, file: Option<FileDescriptor>) {
        if let Ok(mut active) = self.active.write() {
            *active = file;
        }
    }
}

impl FieldSource for StaticHost {
    fn vault_name(&self) -> String {
        self.vault.clone()
    }

    fn active_workspace(&self) -> Option<String> {
        self.workspace.read().ok().and_then(|workspace| workspace.clone())
    }

    fn active_file(&self) -> Option<FileDescriptor> {
        self.active.read().ok().and_then(|active| active.clone())
    }

    fn front_matter(&self, file: &FileDescriptor) -> anyhow::Result<Option<FrontMatter>> {
        if self.failing.read().is_ok_and(|failing| failing.contains(&file.path)) {
            anyhow::bail!("metadata cache unavailable for {}", file.path);
        }
        Ok(self.front_matter.read().ok().and_then(|map| map.get(&file.path).cloned()))
    }
}
