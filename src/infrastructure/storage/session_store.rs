//! File-backed session store.

use std::path::PathBuf;

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStorePort;

const SESSION_FILE: &str = "session.toml";

/// Persists the member session as a TOML file under the platform data
/// directory.
///
/// If project directories cannot be determined, persistence is disabled and
/// every operation degrades to a no-op.
#[derive(Clone)]
pub struct FileSessionStore {
    session_path: Option<PathBuf>,
}

impl FileSessionStore {
    /// Creates a store rooted at the platform data directory.
    #[must_use]
    pub fn new() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("app", "punchcard", "punchcard") {
            let session_path = proj_dirs.data_dir().join(SESSION_FILE);
            Self {
                session_path: Some(session_path),
            }
        } else {
            warn!("Failed to determine project directories. Session persistence disabled.");
            Self { session_path: None }
        }
    }

    /// Creates a store writing to an explicit path. Used in tests.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            session_path: Some(path),
        }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn load_session(&self) -> Result<Option<Session>, ApiError> {
        let Some(path) = &self.session_path else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::storage_read(e.to_string()))?;

        match toml::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), ApiError> {
        let Some(path) = &self.session_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::storage_write(e.to_string()))?;
        }

        let content =
            toml::to_string_pretty(session).map_err(|e| ApiError::storage_write(e.to_string()))?;

        fs::write(path, content)
            .await
            .map_err(|e| ApiError::storage_write(e.to_string()))?;

        debug!(path = %path.display(), "Session written");
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), ApiError> {
        let Some(path) = &self.session_path else {
            return Ok(());
        };

        if path.exists() {
            fs::remove_file(path)
                .await
                .map_err(|e| ApiError::storage_write(e.to_string()))?;
        }

        Ok(())
    }
}
