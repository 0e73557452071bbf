//! Domain entities.

mod credentials;
mod member;
mod session;

pub use credentials::Credentials;
pub use member::MemberStatus;
pub use session::Session;
