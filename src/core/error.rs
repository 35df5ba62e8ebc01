//! Error handling for notetitle
//!
//! Errors follow two principles:
//! 1. **Strongly-typed errors** ([`TitleError`]) for the failure cases library code can name
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! Nothing in the render path is fatal. The variants below cover the surrounding
//! plumbing: reading and writing settings, locating a vault, and reading notes.
//! Front-matter failures are normally degraded to "no front-matter" by the field
//! resolver rather than surfaced.
//!
//! # Examples
//!
//! ```rust,no_run
//! use notetitle::core::{TitleError, user_friendly_error};
//!
//! let err = anyhow::Error::from(TitleError::UnknownSettingsKey {
//!     key: "colour".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for notetitle operations.
#[derive(Error, Debug, Clone)]
pub enum TitleError {
    /// The settings file exists but could not be read.
    #[error("Failed to read settings from {path}: {reason}")]
    SettingsReadError {
        /// Path of the settings file
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The settings file is not valid TOML or has the wrong shape.
    #[error("Invalid settings file {path}: {reason}")]
    SettingsParseError {
        /// Path of the settings file
        path: String,
        /// Parser message
        reason: String,
    },

    /// The settings could not be persisted.
    #[error("Failed to write settings to {path}: {reason}")]
    SettingsWriteError {
        /// Path of the settings file
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// `config set` was given a key that is not a settings field.
    #[error("Unknown settings key: {key}")]
    UnknownSettingsKey {
        /// The key as typed by the user
        key: String,
    },

    /// A delimiter outside the supported marker set.
    #[error("Invalid delimiter '{value}'")]
    InvalidDelimiter {
        /// The rejected marker
        value: String,
    },

    /// The vault root does not exist or is not a directory.
    #[error("Vault not found: {path}")]
    VaultNotFound {
        /// Path given for the vault
        path: String,
    },

    /// A note could not be read while looking up its front-matter.
    #[error("Failed to read front-matter of {path}: {reason}")]
    FrontMatterReadError {
        /// Vault-relative path of the note
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),
}

/// Error context wrapper that adds a suggestion and details to a [`TitleError`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TitleError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TitleError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: message in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Known [`TitleError`] variants get tailored advice; IO and TOML errors found
/// anywhere in the chain are mapped onto the closest variant; everything else
/// is wrapped as an IO-style message carrying the full chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(title_error) = error.downcast_ref::<TitleError>() {
        return create_error_context(title_error.clone());
    }

    for cause in error.chain() {
        if let Some(title_error) = cause.downcast_ref::<TitleError>() {
            return create_error_context(title_error.clone());
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(TitleError::SettingsParseError {
                path: "settings".to_string(),
                reason: toml_error.to_string(),
            })
            .with_suggestion("Fix the TOML syntax or run 'notetitle config init --force' to reset")
            .with_details(format!("{error:#}"));
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            let context = ErrorContext::new(TitleError::IoError(io_error.to_string()))
                .with_details(format!("{error:#}"));
            return match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => context
                    .with_suggestion("Check the permissions of the vault and settings directories"),
                std::io::ErrorKind::NotFound => context
                    .with_suggestion("Check that the file or directory exists and the path is correct"),
                _ => context,
            };
        }
    }

    ErrorContext::new(TitleError::IoError(format!("{error:#}")))
}

fn create_error_context(error: TitleError) -> ErrorContext {
    match &error {
        TitleError::SettingsParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the TOML syntax or run 'notetitle config init --force' to reset")
            .with_details("Unknown keys are ignored; missing keys fall back to their defaults"),
        TitleError::UnknownSettingsKey {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Valid keys are: title-template, title-template-empty, separator, delimiter",
        ),
        TitleError::InvalidDelimiter {
            ..
        } => ErrorContext::new(error).with_suggestion("Use one of: ~~, %%, ##, __"),
        TitleError::VaultNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass the vault root directory with --vault <dir>"),
        TitleError::SettingsReadError {
            ..
        }
        | TitleError::SettingsWriteError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check the settings path with 'notetitle config path' and its permissions",
        ),
        TitleError::FrontMatterReadError {
            ..
        }
        | TitleError::IoError(_) => ErrorContext::new(error),
    }
}
