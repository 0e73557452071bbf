//! The screen-stack view layer.
//!
//! Screens are named, stackable units of UI occupying the full viewport.
//! A [`ViewStack`] owns the registry, the current-screen pointer, the
//! in-transition flag, and z-index allocation; screens carry their own
//! one-time setup, lifecycle signal hooks, declarative input wiring, and
//! element state (visibility, opacity, translation, stacking order).

mod components;
mod element;
mod screen;
mod signal;
mod stack;
mod transition;
mod wiring;

pub use components::{Node, NodeKind, Surface};
pub use element::{Element, Offset};
pub use screen::{Screen, ScreenBuilder};
pub use signal::Signal;
pub use stack::{StackEvent, TransitionRejection, ViewStack};
pub use transition::{Slide, TRANSITION_DEFER, TRANSITION_DURATION};
pub use wiring::{EventRemap, HandlerRef, InputEvent, InputKind, Selector, bound};
