//! Sign-in use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SigninRequest, SigninResponse};
use crate::domain::errors::ApiError;
use crate::domain::ports::{SessionStorePort, SigninPort};

/// Handles the member sign-in workflow.
#[derive(Clone)]
pub struct SigninUseCase {
    signin_port: Arc<dyn SigninPort>,
    session_store: Arc<dyn SessionStorePort>,
}

impl SigninUseCase {
    /// Creates a new sign-in use case.
    #[must_use]
    pub const fn new(
        signin_port: Arc<dyn SigninPort>,
        session_store: Arc<dyn SessionStorePort>,
    ) -> Self {
        Self {
            signin_port,
            session_store,
        }
    }

    /// Executes sign-in with the provided request.
    ///
    /// # Errors
    /// Returns an error if the credentials are incomplete or rejected.
    pub async fn execute(&self, request: SigninRequest) -> Result<SigninResponse, ApiError> {
        debug!(username = %request.credentials.username(), "Attempting sign-in");

        if !request.credentials.is_complete() {
            warn!("Incomplete credentials submitted");
            return Err(ApiError::invalid_credentials(
                "username and password are required",
            ));
        }

        let session = self.signin_port.signin(&request.credentials).await.map_err(|e| {
            warn!(error = %e, "Sign-in rejected");
            e
        })?;

        info!(
            member_id = %session.member_id(),
            display_name = %session.display_name(),
            "Successfully signed in"
        );

        let session_persisted = if request.persist_session {
            match self.session_store.store_session(&session).await {
                Ok(()) => {
                    info!("Session persisted");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Failed to persist session, continuing without");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled for this request");
            false
        };

        Ok(SigninResponse {
            session,
            session_persisted,
        })
    }

    /// Signs the member out, clearing any stored session.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be removed.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        info!("Signing out, clearing stored session");
        self.session_store.clear_session().await
    }
}
