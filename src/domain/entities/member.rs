//! Member status entity.

use serde::{Deserialize, Serialize};

/// Loyalty status for a signed-in member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatus {
    points: u64,
    tier: String,
}

impl MemberStatus {
    /// Creates a member status.
    #[must_use]
    pub fn new(points: u64, tier: impl Into<String>) -> Self {
        Self {
            points,
            tier: tier.into(),
        }
    }

    /// Returns the points balance.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Returns the tier name.
    #[must_use]
    pub fn tier(&self) -> &str {
        &self.tier
    }
}

impl Default for MemberStatus {
    fn default() -> Self {
        Self::new(0, "Member")
    }
}
