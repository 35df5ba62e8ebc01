//! Title settings management commands.
//!
//! # Commands
//!
//! - `show` - Display the effective settings (default when no subcommand is given)
//! - `path` - Print the settings file location
//! - `init` - Write a settings file with the defaults
//! - `set` - Change one setting and save it
//!
//! # Examples
//!
//! ```bash
//! notetitle config init
//! notetitle config set title-template "{{frontmatter.project}}~~{{basename}}~~{{vault}}"
//! notetitle config set delimiter %%
//! notetitle --config ./settings.toml config show
//! ```
//!
//! # Settings keys
//!
//! | Key | Field |
//! |-----|-------|
//! | `title-template` | `titleTemplate` |
//! | `title-template-empty` | `titleTemplateEmpty` |
//! | `separator` | `titleSeparator` |
//! | `delimiter` | `delimiter` (one of `~~`, `%%`, `##`, `__`) |

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::{Delimiter, FileSettingsStore, SettingsStore, TitleSettings};

/// Command to manage the title settings file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Show the effective settings.
    Show,

    /// Print the settings file location.
    Path,

    /// Write a settings file with the default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Change one setting and save it.
    Set {
        /// One of: title-template, title-template-empty, separator, delimiter
        key: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

impl ConfigCommand {
    /// Execute the config command against `store`.
    pub async fn execute(self, store: &FileSettingsStore) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Show) | None => Self::show(store).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", store.path().display());
                Ok(())
            }
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(store, force).await,
            Some(ConfigSubcommands::Set {
                key,
                value,
            }) => Self::set(store, &key, &value).await,
        }
    }

    async fn show(store: &FileSettingsStore) -> Result<()> {
        let settings = store.load().await?;

        println!("{}", "Title Settings".bold());
        println!("Location: {}", store.path().display());
        if !store.path().exists() {
            println!("{}", "(file not found, showing defaults)".dimmed());
        }
        println!();
        print_settings(&settings);
        Ok(())
    }

    async fn init(store: &FileSettingsStore, force: bool) -> Result<()> {
        if store.path().exists() && !force {
            println!("❌ Settings already exist at: {}", store.path().display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let settings = TitleSettings::default();
        store.save(&settings).await?;

        println!("✅ Created settings at: {}", store.path().display());
        println!("\n{}", "Default settings:".bold());
        print_settings(&settings);
        Ok(())
    }

    async fn set(store: &FileSettingsStore, key: &str, value: &str) -> Result<()> {
        let mut settings = store.load().await?;
        settings.set(key, value)?;
        store.save(&settings).await?;

        println!("✅ Set {} = {:?}", key.bold(), value);
        Ok(())
    }
}

fn print_settings(settings: &TitleSettings) {
    println!("  {:<22} {:?}", "title-template", settings.title_template);
    println!("  {:<22} {:?}", "title-template-empty", settings.title_template_empty);
    println!("  {:<22} {:?}", "separator", settings.title_separator);
    println!("  {:<22} {:?}", "delimiter", settings.delimiter.as_str());

    let choices: Vec<&str> = Delimiter::ALL.iter().map(|d| d.as_str()).collect();
    println!("\n{} {}", "Delimiters:".dimmed(), choices.join(" ").dimmed());
}
