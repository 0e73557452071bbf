//! About screen with tabbed program information.

use crate::presentation::commands::Command;
use crate::presentation::view::{Node, Screen, Selector, Signal, Slide, Surface, bound};

/// Stable id of this screen in the stack.
pub const SCREEN_ID: &str = "about";

const FAQ_TEXT: &str = "\
How do I earn points?\n\
Every purchase earns one punch. Ten punches convert to 100 points.\n\n\
When do points expire?\n\
Points expire twelve months after they were earned.\n\n\
How do I redeem a reward?\n\
Show the redeem code at the counter; points are deducted on the spot.";

const TERMS_TEXT: &str = "\
Membership is free and open to anyone aged 16 or older.\n\
Points have no cash value and cannot be transferred between accounts.\n\
We may suspend accounts that earn points through fraudulent purchases.";

const PRIVACY_TEXT: &str = "\
We store your name, email address, and purchase history to run the\n\
program. We never sell your data. You can request deletion of your\n\
account and all associated data at any time from the website.";

/// Builds the about screen.
#[must_use]
pub fn build(website_url: String) -> Screen {
    let mut surface = Surface::new();
    surface.add(Node::titlebar("About the Program"));
    surface.add(Node::tab("info", "faq", "FAQ"));
    surface.add(Node::tab("info", "terms", "Terms"));
    surface.add(Node::tab("info", "privacy", "Privacy"));
    surface.add(Node::pane("info", "faq", FAQ_TEXT));
    surface.add(Node::pane("info", "terms", TERMS_TEXT));
    surface.add(Node::pane("info", "privacy", PRIVACY_TEXT));
    surface.add(Node::button("Visit website").with_id("website"));
    surface.add(Node::button("Back").with_id("back"));

    Screen::builder(SCREEN_ID)
        .surface(surface)
        .on(Signal::Hidden, |surface, _| surface.reset_scroll())
        .button(
            Selector::Id("website"),
            bound(move |_, _| Some(Command::OpenExternal(website_url.clone()))),
        )
        .button(
            Selector::Id("back"),
            bound(|_, _| {
                Some(Command::Reveal {
                    screen: super::home_screen::SCREEN_ID,
                    anim: Some(Slide::Right),
                })
            }),
        )
        .build()
}
