//! In-app notification model for user-visible alerts.

use std::time::{Duration, Instant};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Informational message.
    Info,
    /// Alert requiring attention (validation failures, rejected sign-in).
    Alert,
    /// Error message.
    Error,
}

/// A transient toast shown over the current screen.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notification was first rendered.
    pub displayed_at: Option<Instant>,
    /// How long the notification stays on screen.
    pub duration: Duration,
}

impl Notification {
    const DEFAULT_DURATION: Duration = Duration::from_secs(4);

    /// Creates a notification with the default display duration.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            displayed_at: None,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Creates an alert, the level used for form validation messages.
    #[must_use]
    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Alert, "Alert", message)
    }

    /// Overrides the display duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns whether the notification should be dropped.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Records the first render time.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
