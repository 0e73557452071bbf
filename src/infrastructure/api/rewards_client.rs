//! Rewards backend HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{ErrorBody, SigninBody, SigninResponseBody, StatusResponseBody};
use crate::domain::entities::{Credentials, MemberStatus, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::{MemberPort, SigninPort};

const SIGNIN_PATH: &str = "/api/app/signin";
const STATUS_PATH: &str = "/api/app/status";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the rewards backend.
pub struct RewardsApiClient {
    client: Client,
    base_url: String,
}

impl RewardsApiClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("punchcard/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    fn map_send_error(e: &reqwest::Error) -> ApiError {
        warn!(error = %e, "Failed to reach rewards backend");
        if e.is_timeout() {
            ApiError::network("request timed out")
        } else if e.is_connect() {
            ApiError::network("failed to connect to the rewards service")
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message.unwrap_or_else(|| format!("HTTP {status}")),
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::SessionExpired,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after_ms: 5000 },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                ApiError::network("the rewards service is temporarily unavailable")
            }
            _ => ApiError::unexpected(format!("unexpected response: {status} - {message}")),
        }
    }
}

#[async_trait]
impl SigninPort for RewardsApiClient {
    async fn signin(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let url = format!("{}{SIGNIN_PATH}", self.base_url);
        let body = SigninBody {
            username: credentials.username(),
            password: credentials.password(),
        };

        debug!(username = %credentials.username(), "Submitting credentials");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: SigninResponseBody = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse sign-in response");
            ApiError::unexpected(format!("failed to parse response: {e}"))
        })?;

        match (body.success, body.session) {
            (true, Some(session)) => {
                debug!(member_id = %session.member_id, "Sign-in accepted");
                Ok(Session::new(
                    session.token,
                    session.member_id,
                    session.display_name,
                ))
            }
            _ => Err(ApiError::invalid_credentials(
                body.message
                    .unwrap_or_else(|| "username or password not recognised".to_string()),
            )),
        }
    }
}

#[async_trait]
impl MemberPort for RewardsApiClient {
    async fn fetch_status(&self, session: &Session) -> Result<MemberStatus, ApiError> {
        let url = format!("{}{STATUS_PATH}", self.base_url);

        debug!(member_id = %session.member_id(), "Fetching member status");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", session.token()))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: StatusResponseBody = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse status response");
            ApiError::unexpected(format!("failed to parse response: {e}"))
        })?;

        if !body.success {
            return Err(ApiError::unexpected(
                body.message.unwrap_or_else(|| "status unavailable".to_string()),
            ));
        }

        Ok(MemberStatus::new(
            body.points,
            body.tier.unwrap_or_else(|| "Member".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let client = RewardsApiClient::new("https://rewards.example.com/").unwrap();
        assert_eq!(client.base_url, "https://rewards.example.com");
    }
}
