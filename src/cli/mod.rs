//! Command-line interface for notetitle.
//!
//! # Available Commands
//!
//! - `render` - Render the title for a vault and (optionally) an active file
//! - `fields` - Show the fields a template can use
//! - `config` - Manage the title settings file
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - settings file to use instead of the default location
//!
//! Without `--verbose` or `--quiet`, `RUST_LOG` is honored and defaults to `warn`.
//!
//! # Examples
//!
//! ```bash
//! notetitle render --vault ~/Notes --file projects/todo.md --base-title "Notes - Obsidian v1.4.16"
//! notetitle fields --vault ~/Notes --file projects/todo.md --format json
//! notetitle config set delimiter %%
//! ```

pub mod common;
pub mod config;
pub mod fields;
pub mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::FileSettingsStore;

/// Main CLI structure for notetitle.
#[derive(Parser)]
#[command(
    name = "notetitle",
    about = "Render window titles for the active note",
    version,
    long_about = "notetitle renders a window title from a user template, filling in the vault, workspace, active file and its front-matter."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file.
    ///
    /// Overrides the default location (`~/.notetitle/settings.toml`).
    #[arg(short, long, global = true, env = "NOTETITLE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the title for a vault and active file.
    Render(render::RenderCommand),

    /// Show the fields available to templates.
    Fields(fields::FieldsCommand),

    /// Manage the title settings.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();
        let store = FileSettingsStore::with_optional(self.config)?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&store).await,
            Commands::Fields(cmd) => cmd.execute(),
            Commands::Config(cmd) => cmd.execute(&store).await,
        }
    }

    /// The log filter implied by the verbosity flags.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    fn init_logging(&self) {
        // logs go to stderr so stdout stays a clean title
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
