//! notetitle - window titles for the active note
//!
//! Renders a title string from a user template whose `{{name}}` placeholders
//! are filled from the vault, the active workspace, the active file and that
//! file's YAML front-matter. The title is refreshed (debounced) whenever the
//! active file changes, is renamed, is deleted or has its metadata changed,
//! and the host's original title is restored on shutdown.
//!
//! # Architecture Overview
//!
//! ```text
//! host event -> title::TitleService -> fields::FieldResolver -> templating::TitleRenderer -> TitleSink
//! ```
//!
//! # Core Modules
//!
//! - [`fields`] - Field map, file descriptors, the [`fields::FieldSource`] host trait
//! - [`templating`] - Delimiter-aware title rendering
//! - [`markdown`] - Note reading and front-matter extraction
//! - [`config`] - Title settings and their persistence
//! - [`title`] - Event handling, debounce and lifecycle
//! - [`vault`] - Filesystem-backed host
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `notetitle` command-line interface
//!
//! # Templates
//!
//! ```text
//! {{basename}}~~{{vault}} - App v{{version}}
//! ```
//!
//! The `~~` delimiter marks an optional join: with `basename = todo` the
//! title is `todo - Notes - App v1.5.3`; with no active file the `basename`
//! placeholder and its delimiter disappear, leaving `Notes - App v1.5.3`.
//!
//! # Quick Start
//!
//! ```
//! use notetitle::config::TitleSettings;
//! use notetitle::fields::FieldMap;
//! use notetitle::templating::TitleRenderer;
//!
//! let settings = TitleSettings::default();
//! let fields: FieldMap =
//!     [("vault", "Notes"), ("version", "1.5.3"), ("basename", "todo")].into_iter().collect();
//!
//! let title = TitleRenderer::from_settings(&settings).render(&fields, &settings.title_template);
//! assert_eq!(title, "todo - Notes - App v1.5.3");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fields;
pub mod markdown;
pub mod templating;
pub mod title;
pub mod vault;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
