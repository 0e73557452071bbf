//! Member session value object.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated member session returned by the sign-in endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    member_id: String,
    display_name: String,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session issued now.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        member_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            member_id: member_id.into(),
            display_name: display_name.into(),
            issued_at: Utc::now(),
        }
    }

    /// Returns the opaque session token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the member identifier.
    #[must_use]
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Returns the member display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns when the session was issued.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns a masked token for display.
    #[must_use]
    pub fn masked_token(&self) -> String {
        if self.token.len() <= 8 {
            return "*".repeat(self.token.len());
        }
        format!("{}...", &self.token[..4])
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.masked_token())
            .field("member_id", &self.member_id)
            .field("display_name", &self.display_name)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
