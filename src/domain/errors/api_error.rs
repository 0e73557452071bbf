//! Rewards API error types.

use thiserror::Error;

/// Errors produced by the rewards backend and session storage.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("credentials rejected: {message}")]
    InvalidCredentials { message: String },

    #[error("session expired or revoked")]
    SessionExpired,

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("failed to read stored session: {message}")]
    StorageReadFailed { message: String },

    #[error("failed to persist session: {message}")]
    StorageWriteFailed { message: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates an invalid-credentials error.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates a storage read error.
    #[must_use]
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::StorageReadFailed {
            message: message.into(),
        }
    }

    /// Creates a storage write error.
    #[must_use]
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWriteFailed {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::RateLimited { .. } | Self::InvalidCredentials { .. }
        )
    }

    /// Returns whether the error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(ApiError::network("timeout").is_recoverable());
        assert!(ApiError::RateLimited { retry_after_ms: 500 }.is_recoverable());
        assert!(!ApiError::storage_write("disk full").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = ApiError::invalid_credentials("bad password");
        assert_eq!(err.to_string(), "credentials rejected: bad password");
    }
}
