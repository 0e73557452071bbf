//! Floating notification banner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::domain::notification::{Notification, NotificationLevel};

/// Renders an active notification over the top-right of the viewport.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    /// Wraps the notification to render.
    #[must_use]
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn accent(&self) -> Color {
        match self.notification.level {
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Alert => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        }
    }

    /// Computes the banner area within the viewport.
    #[must_use]
    pub fn area(viewport: Rect) -> Rect {
        let width = viewport.width.min(44);
        Rect {
            x: viewport.right().saturating_sub(width + 1),
            y: viewport.y + 1,
            width,
            height: 4.min(viewport.height),
        }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(Clear, area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent()))
            .title(Line::styled(
                format!(" {} ", self.notification.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(self.notification.message.as_str())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_hugs_top_right() {
        let viewport = Rect::new(0, 0, 100, 30);
        let area = NotificationPopup::area(viewport);
        assert_eq!(area.right(), 99);
        assert_eq!(area.y, 1);
        assert_eq!(area.width, 44);
    }

    #[test]
    fn test_area_fits_narrow_viewport() {
        let viewport = Rect::new(0, 0, 20, 5);
        let area = NotificationPopup::area(viewport);
        assert!(area.width <= 20);
        assert!(area.right() <= 20);
    }
}
