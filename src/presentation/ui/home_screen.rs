//! Home screen: the member's rewards overview.

use crate::domain::entities::{MemberStatus, Session};
use crate::presentation::commands::Command;
use crate::presentation::view::{
    Node, NodeKind, Screen, Selector, Slide, Surface, bound,
};

/// Stable id of this screen in the stack.
pub const SCREEN_ID: &str = "home";

fn set_label(surface: &mut Surface, id: &str, text: String) {
    if let Some(index) = surface.find_id(id) {
        if let Some(node) = surface.node_mut(index) {
            if let NodeKind::Label(value) = &mut node.kind {
                *value = text;
            }
        }
    }
}

/// Writes the signed-in member's name into the greeting.
pub fn apply_session(surface: &mut Surface, session: &Session) {
    set_label(
        surface,
        "greeting",
        format!("Welcome back, {}!", session.display_name()),
    );
}

/// Writes a freshly fetched status into the balance labels.
pub fn apply_status(surface: &mut Surface, status: &MemberStatus) {
    set_label(surface, "points", format!("Points: {}", status.points()));
    set_label(surface, "tier", format!("Tier: {}", status.tier()));
}

/// Builds the home screen.
#[must_use]
pub fn build() -> Screen {
    let mut surface = Surface::new();
    surface.add(Node::titlebar("Punchcard Rewards"));
    surface.add(Node::label("Welcome back!").with_id("greeting"));
    surface.add(Node::spacer(1));
    surface.add(Node::label("Points: –").with_id("points"));
    surface.add(Node::label("Tier: –").with_id("tier"));
    surface.add(Node::spacer(1));
    surface.add(Node::button("Refresh").with_id("refresh"));
    surface.add(Node::button("Menu").with_id("menu"));
    surface.add(Node::button("About").with_id("about"));
    surface.add(Node::button("Sign out").with_id("signout"));

    Screen::builder(SCREEN_ID)
        .surface(surface)
        .button(
            Selector::Id("refresh"),
            bound(|_, _| Some(Command::RefreshStatus)),
        )
        .button(
            Selector::Id("menu"),
            bound(|_, _| {
                Some(Command::RevealPanel {
                    screen: super::menu_panel::SCREEN_ID,
                    anim: Slide::Left,
                })
            }),
        )
        .button(
            Selector::Id("about"),
            bound(|_, _| {
                Some(Command::Show {
                    screen: super::about_screen::SCREEN_ID,
                    anim: Some(Slide::Left),
                })
            }),
        )
        .button(Selector::Id("signout"), bound(|_, _| Some(Command::SignOut)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::{EventRemap, InputEvent, InputKind};
    use ratatui::buffer::Buffer;
    use ratatui::layout::{Position, Rect, Size};

    const VIEWPORT: Size = Size {
        width: 60,
        height: 20,
    };

    #[test]
    fn test_menu_button_opens_panel() {
        let mut screen = build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);
        let area = Rect::new(0, 0, VIEWPORT.width, VIEWPORT.height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);

        let index = screen.surface().find_id("menu").unwrap();
        let target = screen.surface().node(index).unwrap().area;
        let commands = screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Press,
            position: Position::new(target.x + 1, target.y + 1),
        });
        assert!(matches!(
            commands.as_slice(),
            [Command::RevealPanel {
                screen: "menu",
                anim: Slide::Left,
            }]
        ));
    }

    #[test]
    fn test_status_labels_update() {
        let mut screen = build();
        apply_status(
            screen.surface_mut(),
            &MemberStatus::new(420, "Gold"),
        );
        let index = screen.surface().find_id("points").unwrap();
        let NodeKind::Label(text) = &screen.surface().node(index).unwrap().kind else {
            panic!("expected label");
        };
        assert_eq!(text, "Points: 420");
    }
}
