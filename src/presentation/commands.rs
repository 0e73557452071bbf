//! Commands emitted by screen handlers and executed by the app orchestrator.
//!
//! Screen wiring never mutates app state directly; handlers return commands
//! and the event loop interprets them, which keeps navigation and network
//! effects in one place.

use crate::domain::entities::Credentials;
use crate::domain::notification::Notification;
use crate::presentation::view::Slide;

/// An app-level effect requested by a screen.
#[derive(Debug)]
pub enum Command {
    /// Show a screen, optionally with an entrance animation.
    Show {
        /// Target screen id.
        screen: &'static str,
        /// Entrance animation.
        anim: Option<Slide>,
    },
    /// Reveal a screen beneath the current one.
    Reveal {
        /// Target screen id.
        screen: &'static str,
        /// Exit animation applied to the current screen.
        anim: Option<Slide>,
    },
    /// Reveal a drawer-style panel beneath the current screen.
    RevealPanel {
        /// Target panel screen id.
        screen: &'static str,
        /// Slide direction; panels always animate.
        anim: Slide,
    },
    /// Conceal the active panel.
    ConcealPanel,
    /// Open a URL in the system browser.
    OpenExternal(String),
    /// Show an in-app notification.
    Notify(Notification),
    /// Submit credentials to the backend.
    SubmitSignin(Credentials),
    /// Re-fetch the member's points balance and tier.
    RefreshStatus,
    /// Clear the session and return to sign-in.
    SignOut,
    /// The splash intro animation has finished.
    SplashFinished,
    /// Exit the application.
    Quit,
}
