//! Member data port definition.

use async_trait::async_trait;

use crate::domain::entities::{MemberStatus, Session};
use crate::domain::errors::ApiError;

/// Port for fetching the signed-in member's loyalty status.
#[async_trait]
pub trait MemberPort: Send + Sync {
    /// Fetches the current status for the session's member.
    async fn fetch_status(&self, session: &Session) -> Result<MemberStatus, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock member port for testing.
    pub struct MockMemberPort {
        should_succeed: Arc<AtomicBool>,
        status: MemberStatus,
    }

    impl MockMemberPort {
        /// Creates a mock returning the given status.
        pub fn new(status: MemberStatus) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(true)),
                status,
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl MemberPort for MockMemberPort {
        async fn fetch_status(&self, _session: &Session) -> Result<MemberStatus, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(self.status.clone())
            } else {
                Err(ApiError::SessionExpired)
            }
        }
    }
}
