//! Helpers shared by the CLI commands.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::vault::FsVault;

/// Open the vault at `root` and mark `file` as the active document.
pub fn open_vault(root: &Path, file: Option<&Path>) -> Result<FsVault> {
    let vault = FsVault::open(root)?;
    if let Some(file) = file {
        let descriptor = vault.descriptor(file);
        debug!("active file: {} ({:?})", descriptor.path, descriptor.kind);
        vault.set_active(Some(descriptor));
    }
    Ok(vault)
}
