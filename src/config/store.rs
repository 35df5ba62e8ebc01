//! Settings persistence.
//!
//! The title service loads settings once at start and writes every edit
//! straight through its [`SettingsStore`]. [`FileSettingsStore`] keeps them in
//! a TOML file; [`MemorySettingsStore`] is for hosts that persist settings
//! themselves, and for tests.

use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tracing::debug;

use super::TitleSettings;
use crate::core::TitleError;

/// Storage backend for [`TitleSettings`].
pub trait SettingsStore: Send + Sync {
    /// Load settings, returning defaults when nothing has been stored yet.
    fn load(&self) -> impl Future<Output = Result<TitleSettings>> + Send;

    /// Persist settings.
    fn save(&self, settings: &TitleSettings) -> impl Future<Output = Result<()>> + Send;
}

impl<T: SettingsStore> SettingsStore for Arc<T> {
    fn load(&self) -> impl Future<Output = Result<TitleSettings>> + Send {
        (**self).load()
    }

    fn save(&self, settings: &TitleSettings) -> impl Future<Output = Result<()>> + Send {
        (**self).save(settings)
    }
}

/// Settings stored as TOML on disk.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Store at `path` if given, else at [`default_path`](Self::default_path).
    pub fn with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Platform default location of the settings file.
    ///
    /// - **Unix/macOS**: `~/.notetitle/settings.toml`
    /// - **Windows**: `%LOCALAPPDATA%\notetitle\settings.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("notetitle")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".notetitle")
        };

        Ok(config_dir.join("settings.toml"))
    }
}

impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<TitleSettings> {
        if !self.path.exists() {
            debug!("no settings at {}, using defaults", self.path.display());
            return Ok(TitleSettings::default());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            TitleError::SettingsReadError {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let settings = toml::from_str(&content).map_err(|e| TitleError::SettingsParseError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(settings)
    }

    async fn save(&self, settings: &TitleSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.path, content).await.map_err(|e| TitleError::SettingsWriteError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings kept in memory; counts saves so write-through can be observed.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<TitleSettings>>,
    saves: AtomicUsize,
}

impl MemorySettingsStore {
    /// Store pre-populated with `settings`.
    pub fn new(settings: TitleSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
            saves: AtomicUsize::new(0),
        }
    }

    /// The last saved (or initial) settings.
    pub fn current(&self) -> Option<TitleSettings> {
        self.settings.lock().ok().and_then(|guard| guard.clone())
    }

    /// How many times [`save`](SettingsStore::save) has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<TitleSettings> {
        Ok(self.current().unwrap_or_default())
    }

    async fn save(&self, settings: &TitleSettings) -> Result<()> {
        let mut guard =
            self.settings.lock().map_err(|_| anyhow::anyhow!("settings store lock poisoned"))?;
        *guard = Some(settings.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
