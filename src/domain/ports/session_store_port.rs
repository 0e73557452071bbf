//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;

/// Port for session persistence between runs.
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Retrieves the stored session, if any.
    async fn load_session(&self) -> Result<Option<Session>, ApiError>;

    /// Stores the session.
    async fn store_session(&self, session: &Session) -> Result<(), ApiError>;

    /// Deletes the stored session.
    async fn clear_session(&self) -> Result<(), ApiError>;

    /// Checks whether a session is stored.
    async fn has_session(&self) -> Result<bool, ApiError> {
        Ok(self.load_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock session store for testing.
    pub struct MockSessionStore {
        session: Arc<RwLock<Option<Session>>>,
    }

    impl MockSessionStore {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                session: Arc::new(RwLock::new(None)),
            }
        }

        /// Creates mock storage seeded with a session.
        pub fn with_session(session: Session) -> Self {
            Self {
                session: Arc::new(RwLock::new(Some(session))),
            }
        }
    }

    impl Default for MockSessionStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStorePort for MockSessionStore {
        async fn load_session(&self) -> Result<Option<Session>, ApiError> {
            Ok(self.session.read().await.clone())
        }

        async fn store_session(&self, session: &Session) -> Result<(), ApiError> {
            *self.session.write().await = Some(session.clone());
            Ok(())
        }

        async fn clear_session(&self) -> Result<(), ApiError> {
            *self.session.write().await = None;
            Ok(())
        }
    }
}
