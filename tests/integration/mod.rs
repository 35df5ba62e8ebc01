//! Integration test suite for notetitle
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The `notetitle` binary against a temporary vault and settings file
//! - **title_service**: Debounce, event filtering, settings write-through and
//!   shutdown, driven on paused tokio time

mod cli;
mod title_service;
