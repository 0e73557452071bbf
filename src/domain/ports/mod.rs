//! Port definitions for external services.

mod member_port;
mod session_store_port;
mod signin_port;

pub use member_port::MemberPort;
pub use session_store_port::SessionStorePort;
pub use signin_port::SigninPort;

#[cfg(test)]
pub mod mocks {
    pub use super::member_port::mock::MockMemberPort;
    pub use super::session_store_port::mock::MockSessionStore;
    pub use super::signin_port::mock::MockSigninPort;
}
