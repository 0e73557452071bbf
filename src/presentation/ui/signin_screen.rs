//! Member sign-in screen.

use crate::domain::entities::Credentials;
use crate::domain::notification::Notification;
use crate::presentation::commands::Command;
use crate::presentation::view::{Node, Screen, Selector, Signal, Surface, bound};
use crate::presentation::widgets::TextInput;

/// Stable id of this screen in the stack.
pub const SCREEN_ID: &str = "signin";

/// Clears the password field, keeping the username for re-entry.
pub fn clear_password(surface: &mut Surface) {
    if let Some(index) = surface.find_id("password") {
        if let Some(node) = surface.node_mut(index) {
            if let crate::presentation::view::NodeKind::Field(input) = &mut node.kind {
                input.clear();
            }
        }
    }
}

/// Builds the sign-in screen.
#[must_use]
pub fn build(forgot_password_url: String, website_url: String) -> Screen {
    let mut surface = Surface::new();
    surface.add(Node::titlebar("Sign In"));
    surface.add(Node::spacer(1));
    surface.add(Node::field(TextInput::new("Username")).with_id("username"));
    surface.add(Node::field(TextInput::new("Password").masked()).with_id("password"));
    surface.add(Node::button("Sign In").with_id("signin").with_class("primary"));
    surface.add(Node::button("Forgot password?").with_id("forgot"));
    surface.add(Node::spacer(1));
    surface.add(Node::label("New here? Join the program on our website:"));
    surface.add(Node::button("Open website").with_id("website"));

    Screen::builder(SCREEN_ID)
        .surface(surface)
        .on(Signal::Hidden, |surface, _| clear_password(surface))
        .button(
            Selector::Id("signin"),
            bound(|surface, _| {
                let username = surface.field_value("username").unwrap_or_default().trim();
                let password = surface.field_value("password").unwrap_or_default();
                if username.is_empty() || password.is_empty() {
                    return Some(Command::Notify(Notification::alert(
                        "Please enter your username and password.",
                    )));
                }
                Some(Command::SubmitSignin(Credentials::new(username, password)))
            }),
        )
        .button(
            Selector::Id("forgot"),
            bound(move |_, _| Some(Command::OpenExternal(forgot_password_url.clone()))),
        )
        .button(
            Selector::Id("website"),
            bound(move |_, _| Some(Command::OpenExternal(website_url.clone()))),
        )
        .build()
}
