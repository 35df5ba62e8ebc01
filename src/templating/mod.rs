//! Title templating.
//!
//! Templates are plain strings with `{{name}}` placeholders, for example
//! `{{basename}}~~{{vault}} - App v{{version}}`. Names match [`FieldMap`]
//! keys exactly and may be dot-qualified (`{{frontmatter.project}}`).
//! There is no expression syntax, no filters and no recursion: a value is
//! inserted as-is even when it looks like a template.
//!
//! See [`renderer`] for the substitution and cleanup rules.
//!
//! [`FieldMap`]: crate::fields::FieldMap

pub mod renderer;

pub use renderer::{TitleRenderer, render_title};
