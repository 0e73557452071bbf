//! Presentation layer with the view stack, screens, and event handling.

/// App-level commands emitted by screen handlers.
pub mod commands;
/// Terminal event handling and gesture recognition.
pub mod events;
/// Concrete screens and the application orchestrator.
pub mod ui;
/// The screen-stack view layer.
pub mod view;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
