//! Reusable widgets.

pub mod input;
pub mod notification_popup;

pub use input::TextInput;
pub use notification_popup::NotificationPopup;
