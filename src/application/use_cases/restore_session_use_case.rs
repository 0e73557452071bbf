//! Session restoration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::Session;
use crate::domain::ports::SessionStorePort;

/// Restores a persisted session at startup.
#[derive(Clone)]
pub struct RestoreSessionUseCase {
    session_store: Arc<dyn SessionStorePort>,
}

impl RestoreSessionUseCase {
    /// Creates a new restore use case.
    #[must_use]
    pub const fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    /// Returns the stored session, if one exists and can be read.
    ///
    /// Storage read failures are logged and treated as "no session" so a
    /// corrupt store never blocks the sign-in screen.
    pub async fn execute(&self) -> Option<Session> {
        match self.session_store.load_session().await {
            Ok(Some(session)) => {
                info!(member_id = %session.member_id(), "Restored stored session");
                Some(session)
            }
            Ok(None) => {
                debug!("No stored session found");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored session");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSessionStore;

    #[tokio::test]
    async fn test_restores_existing_session() {
        let store = Arc::new(MockSessionStore::with_session(Session::new(
            "tok", "m-1", "Alice",
        )));
        let use_case = RestoreSessionUseCase::new(store);

        let session = use_case.execute().await;
        assert_eq!(session.map(|s| s.member_id().to_string()), Some("m-1".into()));
    }

    #[tokio::test]
    async fn test_empty_store_yields_none() {
        let use_case = RestoreSessionUseCase::new(Arc::new(MockSessionStore::new()));
        assert!(use_case.execute().await.is_none());
    }
}
