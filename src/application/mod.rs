//! Application layer with use cases and data transfer objects.

/// Data transfer objects.
pub mod dto;
/// Use case implementations.
pub mod use_cases;
