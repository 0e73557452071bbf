//! Sign-in request and response DTOs.

use crate::domain::entities::{Credentials, Session};

/// Request to sign a member in.
#[derive(Debug, Clone)]
pub struct SigninRequest {
    /// Credentials entered by the user.
    pub credentials: Credentials,
    /// Whether to persist the resulting session.
    pub persist_session: bool,
}

impl SigninRequest {
    /// Creates a request that persists the session.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SigninResponse {
    /// The authenticated session.
    pub session: Session,
    /// Whether the session was written to storage.
    pub session_persisted: bool,
}
