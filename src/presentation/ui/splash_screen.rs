//! Splash screen with an animated logo intro.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Text,
    widgets::{Paragraph, Widget},
};
use tachyonfx::{Effect, Interpolation, fx};

use crate::presentation::commands::Command;
use crate::presentation::view::Screen;

/// Stable id of this screen in the stack.
pub const SCREEN_ID: &str = "splash";

const LOGO_TEXT: &str = "
░█▀█░█░█░█▀█░█▀▀░█░█░█▀▀░█▀█░█▀▄░█▀▄
░█▀▀░█░█░█░█░█░░░█▀█░█░░░█▀█░█▀▄░█░█
░▀░░░▀▀▀░▀░▀░▀▀▀░▀░▀░▀▀▀░▀░▀░▀░▀░▀▀░";

/// How long the logo stays up after the intro effect completes.
const DWELL: Duration = Duration::from_millis(600);

struct SplashFx {
    intro: Effect,
    intro_finished: bool,
    dwell_remaining: Duration,
    finished_reported: bool,
}

impl SplashFx {
    fn new() -> Self {
        Self {
            intro: fx::coalesce((800, Interpolation::CircOut)),
            intro_finished: false,
            dwell_remaining: DWELL,
            finished_reported: false,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, elapsed: Duration) {
        let text = Text::from(LOGO_TEXT.trim_matches('\n')).centered();
        let width = u16::try_from(
            text.lines
                .iter()
                .map(ratatui::prelude::Line::width)
                .max()
                .unwrap_or(0),
        )
        .unwrap_or(0);
        let height = u16::try_from(text.lines.len()).unwrap_or(0);

        let center = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width.min(area.width),
            height.min(area.height),
        );
        Paragraph::new(text).render(center, buf);

        if !self.intro_finished {
            let overflow = self.intro.process(elapsed.into(), buf, center);
            if overflow.is_some() {
                self.intro_finished = true;
            }
        }
    }

    /// Reports completion exactly once, after intro plus dwell.
    fn tick(&mut self, dt: Duration) -> Option<Command> {
        if !self.intro_finished || self.finished_reported {
            return None;
        }
        self.dwell_remaining = self.dwell_remaining.saturating_sub(dt);
        if self.dwell_remaining.is_zero() {
            self.finished_reported = true;
            return Some(Command::SplashFinished);
        }
        None
    }
}

/// Builds the splash screen.
#[must_use]
pub fn build() -> Screen {
    let fx = Rc::new(RefCell::new(SplashFx::new()));
    let render_fx = fx.clone();
    Screen::builder(SCREEN_ID)
        .render_with(move |_, area, buf, elapsed| {
            render_fx.borrow_mut().render(area, buf, elapsed);
        })
        .tick_with(move |_, dt| fx.borrow_mut().tick(dt))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finishes_once_after_intro_and_dwell() {
        let mut fx = SplashFx::new();
        assert!(fx.tick(Duration::from_secs(10)).is_none(), "intro not done yet");

        fx.intro_finished = true;
        assert!(fx.tick(Duration::from_millis(100)).is_none());
        assert!(matches!(
            fx.tick(Duration::from_secs(1)),
            Some(Command::SplashFinished)
        ));
        assert!(fx.tick(Duration::from_secs(1)).is_none(), "reported once");
    }
}
