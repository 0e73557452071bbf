//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// In-app notification model.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use entities::{Credentials, MemberStatus, Session};
pub use errors::ApiError;
pub use notification::{Notification, NotificationLevel};
pub use ports::{MemberPort, SessionStorePort, SigninPort};
