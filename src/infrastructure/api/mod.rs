//! Rewards backend HTTP adapter.

mod dto;
mod rewards_client;

pub use rewards_client::RewardsApiClient;
