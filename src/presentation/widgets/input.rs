//! Single-line text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// An editable single-line field with optional masking.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    masked: bool,
    label: String,
}

impl TextInput {
    /// Creates an empty input with the given border label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Masks the value with bullets when rendering.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value, placing the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clears the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts a character at the cursor.
    pub fn input_char(&mut self, c: char) {
        let at = self.byte_cursor();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.value.remove(at);
        }
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the end of the value.
    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn byte_cursor(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn display_text(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());
        let inner = block.inner(area);

        block.render(area, buf);
        Paragraph::new(self.display_text())
            .style(Style::default().fg(Color::White))
            .render(inner, buf);

        if self.focused && inner.width > 0 {
            // Wide characters occupy two columns; place the cursor after the
            // rendered width of the prefix, not its char count.
            let cursor_cols = if self.masked {
                self.cursor
            } else {
                let prefix: String = self.value.chars().take(self.cursor).collect();
                prefix.width()
            };
            let cursor_x =
                inner.x + u16::try_from(cursor_cols).unwrap_or(0).min(inner.width - 1);
            buf[(cursor_x, inner.y)]
                .set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_round_trip() {
        let mut input = TextInput::new("Member ID");
        input.input_char('a');
        input.input_char('c');
        input.move_left();
        input.input_char('b');
        assert_eq!(input.value(), "abc");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new("PIN").masked();
        input.set_value("1234");
        assert_eq!(input.display_text(), "••••");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Name");
        input.set_value("café");
        input.backspace();
        assert_eq!(input.value(), "caf");
    }
}
