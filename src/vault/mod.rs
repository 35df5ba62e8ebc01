//! Filesystem-backed vault host.
//!
//! [`FsVault`] answers [`FieldSource`] queries for a vault directory on disk:
//!
//! - vault name: the final component of the root directory
//! - workspace: the `active` entry of `.obsidian/workspaces.json`
//! - front-matter: read from the note on every lookup
//!
//! The active file is whatever was last passed to [`FsVault::set_active`].

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, trace};

use crate::constants::{HOST_CONFIG_DIR, WORKSPACES_FILE};
use crate::core::TitleError;
use crate::fields::{FieldSource, FileDescriptor, FileKind};
use crate::markdown::{self, FrontMatter};

#[derive(Deserialize)]
struct WorkspacesFile {
    #[serde(default)]
    active: Option<String>,
}

/// A vault directory on the local filesystem.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    name: String,
    active: RwLock<Option<FileDescriptor>>,
}

impl FsVault {
    /// Open the vault rooted at `root`.
    ///
    /// # Errors
    ///
    /// [`TitleError::VaultNotFound`] if `root` is not an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(TitleError::VaultNotFound {
                path: root.display().to_string(),
            }
            .into());
        }

        // canonicalize so `.` resolves to a named directory
        let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        debug!("opened vault '{}' at {}", name, root.display());
        Ok(Self {
            root,
            name,
            active: RwLock::new(None),
        })
    }

    /// The vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Describe `path`, given relative to the vault root or as an absolute
    /// path inside it.
    ///
    /// Directories become folders; everything else, including paths that do
    /// not exist (yet), is treated as a regular file.
    pub fn descriptor(&self, path: impl AsRef<Path>) -> FileDescriptor {
        let path = path.as_ref();
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let kind = if self.root.join(relative).is_dir() {
            FileKind::Folder
        } else {
            FileKind::File
        };

        FileDescriptor::with_kind(relative.to_string_lossy(), kind)
    }

    /// Set (or clear) the active document.
    pub fn set_active(&self, file: Option<FileDescriptor>) {
        trace!("active file: {:?}", file.as_ref().map(|f| &f.path));
        *self.active.write().unwrap_or_else(std::sync::PoisonError::into_inner) = file;
    }

    /// Absolute path of a vault-relative descriptor.
    pub fn absolute_path(&self, file: &FileDescriptor) -> PathBuf {
        self.root.join(&file.path)
    }

    fn read_workspace(&self) -> Option<String> {
        let path = self.root.join(HOST_CONFIG_DIR).join(WORKSPACES_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<WorkspacesFile>(&content) {
            Ok(file) => file.active,
            Err(e) => {
                debug!("ignoring unreadable {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl FieldSource for FsVault {
    fn vault_name(&self) -> String {
        self.name.clone()
    }

    fn active_workspace(&self) -> Option<String> {
        self.read_workspace()
    }

    fn active_file(&self) -> Option<FileDescriptor> {
        self.active.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    fn front_matter(&self, file: &FileDescriptor) -> Result<Option<FrontMatter>> {
        if !file.is_native_document() {
            return Ok(None);
        }

        let path = self.absolute_path(file);
        if !path.is_file() {
            trace!("'{}' not on disk, no front-matter", file.path);
            return Ok(None);
        }

        markdown::read_front_matter(&path).map_err(|e| {
            TitleError::FrontMatterReadError {
                path: file.path.clone(),
                reason: format!("{e:#}"),
            }
            .into()
        })
    }
}
