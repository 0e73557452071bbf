//! Drawer menu panel revealed beneath the home screen.

use crate::presentation::commands::Command;
use crate::presentation::view::{
    InputEvent, InputKind, Node, NodeKind, Screen, Selector, Slide, Surface, bound,
};

/// Stable id of this screen in the stack.
pub const SCREEN_ID: &str = "menu";

fn item_at(surface: &Surface, event: &InputEvent) -> Option<&'static str> {
    let InputEvent::Pointer { position, .. } = event else {
        return None;
    };
    let index = surface.node_at(*position)?;
    match surface.node(index)?.kind {
        NodeKind::Item { name, .. } => Some(name),
        _ => None,
    }
}

fn navigate(choice: &'static str) -> Option<Command> {
    match choice {
        "home" => Some(Command::ConcealPanel),
        "about" => Some(Command::Show {
            screen: super::about_screen::SCREEN_ID,
            anim: Some(Slide::Left),
        }),
        "signout" => Some(Command::SignOut),
        _ => None,
    }
}

/// Builds the menu panel.
#[must_use]
pub fn build() -> Screen {
    let mut surface = Surface::new();
    surface.add(Node::titlebar("Menu"));
    surface.add(Node::spacer(1));
    surface.add(Node::item("nav", "home", "Home"));
    surface.add(Node::item("nav", "about", "About"));
    surface.add(Node::item("nav", "signout", "Sign out"));

    Screen::builder(SCREEN_ID)
        .surface(surface)
        .event(
            InputKind::Press,
            Selector::Root,
            bound(|surface, event| item_at(surface, event).and_then(navigate)),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::EventRemap;
    use ratatui::buffer::Buffer;
    use ratatui::layout::{Position, Rect, Size};

    const VIEWPORT: Size = Size {
        width: 40,
        height: 12,
    };

    fn press_item(screen: &mut Screen, name: &str) -> Vec<Command> {
        let index = screen
            .surface()
            .iter()
            .find_map(|(i, n)| match n.kind {
                NodeKind::Item { name: item, .. } if item == name => Some(i),
                _ => None,
            })
            .unwrap();
        let area = screen.surface().node(index).unwrap().area;
        screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Press,
            position: Position::new(area.x + 2, area.y),
        })
    }

    fn prepared() -> Screen {
        let mut screen = build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);
        let area = Rect::new(0, 0, VIEWPORT.width, VIEWPORT.height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        screen
    }

    #[test]
    fn test_about_item_navigates() {
        let mut screen = prepared();
        let commands = press_item(&mut screen, "about");
        assert!(matches!(
            commands.as_slice(),
            [Command::Show {
                screen: "about",
                anim: Some(Slide::Left),
            }]
        ));
    }

    #[test]
    fn test_home_item_conceals() {
        let mut screen = prepared();
        let commands = press_item(&mut screen, "home");
        assert!(matches!(commands.as_slice(), [Command::ConcealPanel]));
    }

    #[test]
    fn test_signout_item() {
        let mut screen = prepared();
        let commands = press_item(&mut screen, "signout");
        assert!(matches!(commands.as_slice(), [Command::SignOut]));
    }
}
