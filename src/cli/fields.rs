//! Show the fields a template can reference.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::fields::{FieldMap, FieldResolver, FieldSource};

use super::common::open_vault;

/// Output format for `notetitle fields`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// `name = value` lines
    #[default]
    Text,
    /// A JSON object in field order
    Json,
}

/// Arguments for `notetitle fields`.
#[derive(Args, Debug)]
pub struct FieldsCommand {
    /// Vault root directory.
    #[arg(long)]
    vault: PathBuf,

    /// Active file, relative to the vault root or absolute.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Host title to take the version from.
    #[arg(long, default_value = "")]
    base_title: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl FieldsCommand {
    /// Resolve and print the field map.
    pub fn execute(self) -> Result<()> {
        let vault = open_vault(&self.vault, self.file.as_deref())?;
        let active = vault.active_file();
        let fields = FieldResolver::new(&self.base_title).resolve(&vault, active.as_ref());

        match self.format {
            OutputFormat::Text => print!("{}", format_text(&fields)),
            OutputFormat::Json => println!("{}", format_json(&fields)?),
        }
        Ok(())
    }
}

fn format_text(fields: &FieldMap) -> String {
    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(name, value)| match value {
            Some(value) if !value.is_empty() => format!("{name:<width$} = {value}\n"),
            _ => format!("{name:<width$} = {}\n", "(empty)".dimmed()),
        })
        .collect()
}

fn format_json(fields: &FieldMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(fields)?)
}
