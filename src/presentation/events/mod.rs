//! Terminal event translation.
//!
//! Converts raw crossterm events into the view layer's input vocabulary.
//! Mouse press/release pairs become clicks or horizontal swipes; with
//! touch-style input enabled the same pairs are reported as touch gestures
//! and screens' touch bindings fire without remapping.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::presentation::view::{InputEvent, InputKind};

/// Minimum horizontal travel, in columns, for a drag to count as a swipe.
const SWIPE_THRESHOLD: i32 = 5;

/// Folds mouse press/release pairs into gestures.
pub struct GestureRecognizer {
    touch_style: bool,
    origin: Option<Position>,
}

impl GestureRecognizer {
    /// Creates a recognizer; with `touch_style` the gestures are reported
    /// as touch events rather than mouse events.
    #[must_use]
    pub fn new(touch_style: bool) -> Self {
        Self {
            touch_style,
            origin: None,
        }
    }

    /// Translates one terminal event into zero or more input events.
    pub fn recognize(&mut self, event: &Event) -> Vec<InputEvent> {
        match event {
            Event::Key(key) => vec![InputEvent::Key(*key)],
            Event::Mouse(mouse) => self.recognize_mouse(mouse),
            _ => Vec::new(),
        }
    }

    fn recognize_mouse(&mut self, mouse: &MouseEvent) -> Vec<InputEvent> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some(position);
                let kind = if self.touch_style {
                    InputKind::TouchStart
                } else {
                    InputKind::MouseDown
                };
                vec![InputEvent::Pointer { kind, position }]
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(origin) = self.origin.take() else {
                    return Vec::new();
                };
                let travel = i32::from(position.x) - i32::from(origin.x);
                if travel <= -SWIPE_THRESHOLD {
                    return vec![InputEvent::Pointer {
                        kind: InputKind::SwipeLeft,
                        position,
                    }];
                }
                if travel >= SWIPE_THRESHOLD {
                    return vec![InputEvent::Pointer {
                        kind: InputKind::SwipeRight,
                        position,
                    }];
                }
                let activate = if self.touch_style {
                    InputKind::Tap
                } else {
                    InputKind::Click
                };
                vec![
                    InputEvent::Pointer {
                        kind: activate,
                        position,
                    },
                    InputEvent::Pointer {
                        kind: InputKind::Press,
                        position,
                    },
                ]
            }
            _ => Vec::new(),
        }
    }
}

/// Checks for the application-wide quit chords.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c' | 'q'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_short_press_release_is_click_then_press() {
        let mut recognizer = GestureRecognizer::new(false);
        let down = recognizer.recognize(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            10,
            5,
        ));
        assert_eq!(
            down,
            vec![InputEvent::Pointer {
                kind: InputKind::MouseDown,
                position: Position::new(10, 5),
            }]
        );

        let up = recognizer.recognize(&mouse(MouseEventKind::Up(MouseButton::Left), 11, 5));
        let kinds: Vec<InputKind> = up
            .iter()
            .map(|e| match e {
                InputEvent::Pointer { kind, .. } => *kind,
                InputEvent::Key(_) => unreachable!(),
            })
            .collect();
        assert_eq!(kinds, vec![InputKind::Click, InputKind::Press]);
    }

    #[test]
    fn test_long_horizontal_drag_is_swipe() {
        let mut recognizer = GestureRecognizer::new(false);
        recognizer.recognize(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 5));
        let up = recognizer.recognize(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 5));
        assert_eq!(
            up,
            vec![InputEvent::Pointer {
                kind: InputKind::SwipeLeft,
                position: Position::new(20, 5),
            }]
        );

        recognizer.recognize(&mouse(MouseEventKind::Down(MouseButton::Left), 20, 5));
        let up = recognizer.recognize(&mouse(MouseEventKind::Up(MouseButton::Left), 40, 5));
        assert_eq!(
            up,
            vec![InputEvent::Pointer {
                kind: InputKind::SwipeRight,
                position: Position::new(40, 5),
            }]
        );
    }

    #[test]
    fn test_touch_style_reports_touch_gestures() {
        let mut recognizer = GestureRecognizer::new(true);
        let down = recognizer.recognize(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 3));
        assert!(matches!(
            down.as_slice(),
            [InputEvent::Pointer {
                kind: InputKind::TouchStart,
                ..
            }]
        ));
        let up = recognizer.recognize(&mouse(MouseEventKind::Up(MouseButton::Left), 3, 3));
        assert!(matches!(
            up.first(),
            Some(InputEvent::Pointer {
                kind: InputKind::Tap,
                ..
            })
        ));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut recognizer = GestureRecognizer::new(false);
        let up = recognizer.recognize(&mouse(MouseEventKind::Up(MouseButton::Left), 3, 3));
        assert!(up.is_empty());
    }

    #[test]
    fn test_quit_chords() {
        let ctrl_c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert!(is_quit_event(&ctrl_c));

        let plain_q =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);
        assert!(!is_quit_event(&plain_q), "q must reach text fields");
    }
}
