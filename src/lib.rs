//! Punchcard - a loyalty/rewards club app shell for the terminal.
//!
//! This crate provides a small rewards-club application built around a
//! screen-stack view layer: named screens with lifecycle signals, z-ordered
//! stacking, slide transitions, and drawer-style panels.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the view stack, screens, and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "punchcard";
