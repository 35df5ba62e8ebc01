//! Title lifecycle: event handling, debounced rendering, restore on shutdown.
//!
//! [`TitleService`] glues the pieces together:
//!
//! ```text
//! host event -> TitleService::handle -> debounce -> FieldResolver -> TitleRenderer -> TitleSink
//! ```
//!
//! The baseline title observed at [`start`](TitleService::start) is put back
//! by [`shutdown`](TitleService::shutdown).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use notetitle::config::FileSettingsStore;
//! use notetitle::title::{TitleEvent, TitleOptions, TitleService, TitleSink};
//! use notetitle::vault::FsVault;
//!
//! struct Stdout;
//!
//! impl TitleSink for Stdout {
//!     fn set_display_title(&self, title: &str) {
//!         println!("{title}");
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let vault = Arc::new(FsVault::open("/home/me/Notes")?);
//! let store = FileSettingsStore::new(FileSettingsStore::default_path()?);
//! let service = TitleService::start(
//!     vault.clone(),
//!     Arc::new(Stdout),
//!     store,
//!     "Notes - Obsidian v1.4.16",
//!     TitleOptions::default(),
//! )
//! .await?;
//!
//! service.handle(TitleEvent::ActiveChanged(Some(vault.descriptor("todo.md"))));
//! service.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod debounce;

use anyhow::{Context, Result};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, trace, warn};

use crate::config::{SettingsStore, TitleSettings};
use crate::constants::RENDER_DEBOUNCE;
use crate::fields::{FieldResolver, FieldSource, FileDescriptor};
use crate::templating::TitleRenderer;
use debounce::PendingSlot;

/// Receives rendered titles.
///
/// Calls are idempotent and last-write-wins; the service may set the same
/// title more than once. Implementations must not call back into the
/// [`TitleService`] from `set_display_title`.
pub trait TitleSink: Send + Sync {
    fn set_display_title(&self, title: &str);
}

/// Host notifications that may change the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleEvent {
    /// Focus moved to another document, or away from all documents.
    ActiveChanged(Option<FileDescriptor>),
    /// A file was renamed or moved; `file` carries the new path.
    Renamed {
        file: FileDescriptor,
        old_path: String,
    },
    /// A file was deleted.
    Deleted(FileDescriptor),
    /// A file's metadata (front-matter) changed.
    MetadataChanged(FileDescriptor),
}

/// Tunables for [`TitleService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleOptions {
    /// Quiet period before a requested render runs.
    pub debounce: Duration,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            debounce: RENDER_DEBOUNCE,
        }
    }
}

/// State shared between the service and its timer task.
struct Shared {
    source: Arc<dyn FieldSource>,
    sink: Arc<dyn TitleSink>,
    resolver: FieldResolver,
    settings: RwLock<TitleSettings>,
}

impl Shared {
    fn settings(&self) -> TitleSettings {
        self.settings.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    fn render(&self, active: Option<&FileDescriptor>) -> String {
        let settings = self.settings();
        let title = render_active_title(self.source.as_ref(), &self.resolver, &settings, active);

        debug!("setting title '{}'", title);
        self.sink.set_display_title(&title);
        title
    }
}

/// Resolve fields for `active` and render the matching template.
///
/// Uses the file template when `active` is a regular file and the "no file"
/// template otherwise.
pub fn render_active_title(
    source: &dyn FieldSource,
    resolver: &FieldResolver,
    settings: &TitleSettings,
    active: Option<&FileDescriptor>,
) -> String {
    let active = active.filter(|file| file.is_file());
    let fields = resolver.resolve(source, active);
    let template = settings.template_for(active.is_some());
    debug!("rendering {} fields with template '{}'", fields.len(), template);
    TitleRenderer::from_settings(settings).render(&fields, template)
}

/// Keeps the host title in sync with the active document.
pub struct TitleService<S: SettingsStore> {
    shared: Arc<Shared>,
    store: S,
    pending: Arc<PendingSlot<Option<FileDescriptor>>>,
    runtime: Handle,
    baseline: String,
    options: TitleOptions,
}

impl<S: SettingsStore> TitleService<S> {
    /// Load settings, capture the baseline title and render once for the
    /// host's current active file.
    ///
    /// Must be called from within a tokio runtime; timer tasks are spawned on it.
    ///
    /// # Errors
    ///
    /// Fails if the settings cannot be loaded from `store`.
    pub async fn start(
        source: Arc<dyn FieldSource>,
        sink: Arc<dyn TitleSink>,
        store: S,
        baseline_title: impl Into<String>,
        options: TitleOptions,
    ) -> Result<Self> {
        let baseline = baseline_title.into();
        let settings = store.load().await.context("Failed to load title settings")?;
        info!("starting title service (baseline '{}')", baseline);

        let service = Self {
            shared: Arc::new(Shared {
                source,
                sink,
                resolver: FieldResolver::new(&baseline),
                settings: RwLock::new(settings),
            }),
            store,
            pending: PendingSlot::new(),
            runtime: Handle::current(),
            baseline,
            options,
        };

        let active = service.shared.source.active_file();
        service.refresh_now(active.as_ref());
        Ok(service)
    }

    /// React to a host event, scheduling a debounced render when it matters.
    pub fn handle(&self, event: TitleEvent) {
        trace!("title event: {:?}", event);
        match event {
            TitleEvent::ActiveChanged(file) => {
                self.request_render(file.filter(FileDescriptor::is_file));
            }
            TitleEvent::Renamed {
                file,
                old_path,
            } => {
                if self.shared.source.is_active(&file) {
                    debug!("active file renamed from '{}' to '{}'", old_path, file.path);
                    self.request_render(Some(file));
                }
            }
            TitleEvent::MetadataChanged(file) => {
                if self.shared.source.is_active(&file) {
                    self.request_render(Some(file));
                }
            }
            TitleEvent::Deleted(file) => {
                if self.shared.source.active_file().is_none() {
                    debug!("'{}' deleted, no active file left", file.path);
                    self.request_render(None);
                }
            }
        }
    }

    fn request_render(&self, active: Option<FileDescriptor>) {
        let shared = Arc::clone(&self.shared);
        self.pending.schedule(&self.runtime, self.options.debounce, active, move |active| {
            shared.render(active.as_ref());
        });
    }

    /// Render immediately, bypassing the debounce. Returns the title set.
    pub fn refresh_now(&self, active: Option<&FileDescriptor>) -> String {
        self.shared.render(active)
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> TitleSettings {
        self.shared.settings()
    }

    /// The title captured at start.
    pub fn baseline_title(&self) -> &str {
        &self.baseline
    }

    /// Host version parsed from the baseline title.
    pub fn host_version(&self) -> &str {
        self.shared.resolver.version()
    }

    /// Whether a debounced render is waiting to run.
    pub fn has_pending_render(&self) -> bool {
        self.pending.is_pending()
    }

    /// Apply `edit`, persist the result and re-render for the active file.
    ///
    /// The in-memory settings only change once the store has accepted them.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot save the edited settings.
    pub async fn update_settings<F>(&self, edit: F) -> Result<TitleSettings>
    where
        F: FnOnce(&mut TitleSettings),
    {
        let mut settings = self.shared.settings();
        edit(&mut settings);

        self.store.save(&settings).await.context("Failed to save title settings")?;
        *self.shared.settings.write().unwrap_or_else(std::sync::PoisonError::into_inner) =
            settings.clone();

        let active = self.shared.source.active_file();
        self.refresh_now(active.as_ref());
        Ok(settings)
    }

    /// Set one setting by its CLI name and persist it.
    ///
    /// # Errors
    ///
    /// Fails on an unknown key, an invalid delimiter or a failed save.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<TitleSettings> {
        let mut probe = self.shared.settings();
        probe.set(key, value)?;
        self.update_settings(move |settings| *settings = probe).await
    }

    /// Cancel any pending render and restore the baseline title.
    pub async fn shutdown(self) {
        if let Some(handle) = self.pending.close() {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => trace!("pending render cancelled"),
                Err(e) => warn!("pending render task failed: {}", e),
            }
        }

        info!("restoring baseline title '{}'", self.baseline);
        self.shared.sink.set_display_title(&self.baseline);
    }
}

impl<S: SettingsStore> Drop for TitleService<S> {
    fn drop(&mut self) {
        self.pending.cancel();
    }
}

impl<S: SettingsStore> std::fmt::Debug for TitleService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleService")
            .field("baseline", &self.baseline)
            .field("options", &self.options)
            .field("pending", &self.pending.is_pending())
            .finish_non_exhaustive()
    }
}
