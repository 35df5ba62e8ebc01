//! notetitle CLI entry point
//!
//! Parses arguments, runs the command and turns failures into a
//! user-friendly message with suggestions.
//!
//! - `render` - Render the title for a vault and active file
//! - `fields` - Show the fields a template can use
//! - `config` - Manage the title settings

use anyhow::Result;
use clap::Parser;
use notetitle::cli;
use notetitle::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
