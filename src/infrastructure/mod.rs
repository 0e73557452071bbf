//! Infrastructure layer with adapters for external services.

/// Rewards backend HTTP client.
pub mod api;
/// Application configuration.
pub mod config;
/// Session persistence.
pub mod storage;

pub use api::RewardsApiClient;
pub use config::AppConfig;
pub use storage::FileSessionStore;
