//! Sign-in port definition.

use async_trait::async_trait;

use crate::domain::entities::{Credentials, Session};
use crate::domain::errors::ApiError;

/// Port for the credential-submission endpoint.
///
/// The backend protocol is deliberately opaque: a single POST of the
/// credentials that either yields a session or an error.
#[async_trait]
pub trait SigninPort: Send + Sync {
    /// Submits credentials and returns the resulting session.
    async fn signin(&self, credentials: &Credentials) -> Result<Session, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock sign-in port for testing.
    pub struct MockSigninPort {
        should_succeed: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    impl MockSigninPort {
        /// Creates a new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }

        /// Returns how many times `signin` was called.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SigninPort for MockSigninPort {
        async fn signin(&self, credentials: &Credentials) -> Result<Session, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Session::new(
                    "mock-session-token",
                    "m-42",
                    credentials.username(),
                ))
            } else {
                Err(ApiError::invalid_credentials("mock rejection"))
            }
        }
    }
}
