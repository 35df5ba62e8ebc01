//! Render the title once and print it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::SettingsStore;
use crate::fields::{FieldResolver, FieldSource};
use crate::title::render_active_title;

use super::common::open_vault;

/// Arguments for `notetitle render`.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Vault root directory.
    #[arg(long)]
    vault: PathBuf,

    /// Active file, relative to the vault root or absolute.
    ///
    /// Without it the "no file" template is used.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Host title to take the version from, e.g. "Notes - Obsidian v1.4.16".
    #[arg(long, default_value = "")]
    base_title: String,
}

impl RenderCommand {
    /// Resolve fields for the vault and file, render, and print the title.
    pub async fn execute<S: SettingsStore>(self, store: &S) -> Result<()> {
        let settings = store.load().await?;
        let vault = open_vault(&self.vault, self.file.as_deref())?;
        let resolver = FieldResolver::new(&self.base_title);

        let active = vault.active_file();
        let title = render_active_title(&vault, &resolver, &settings, active.as_ref());
        println!("{title}");
        Ok(())
    }
}
