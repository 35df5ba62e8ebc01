//! Core types for notetitle
//!
//! ## `error` - Error Handling
//!
//! - [`TitleError`] - Enumerated failures of the plumbing around rendering
//! - [`ErrorContext`] - User-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! Rendering itself never fails; see [`crate::templating`].

pub mod error;

pub use error::{ErrorContext, TitleError, user_friendly_error};
