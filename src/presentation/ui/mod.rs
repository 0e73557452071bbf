//! Screens and the app orchestrator.

mod about_screen;
mod app;
mod home_screen;
mod menu_panel;
mod signin_screen;
mod splash_screen;

pub use app::App;
