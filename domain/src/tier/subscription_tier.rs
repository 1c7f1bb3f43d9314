//! Subscription tier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named service level, ordered by rank
///
/// The derived `Ord` follows declaration order, so `Free < Pro < Enterprise`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Enterprise,
}

/// Raised when an operation needs a higher tier than the caller holds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Requires tier {required} or higher (current: {actual})")]
pub struct TierError {
    pub required: SubscriptionTier,
    pub actual: SubscriptionTier,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Free,
        SubscriptionTier::Pro,
        SubscriptionTier::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }

    /// Ordinal rank used for tier comparisons
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Free => 0,
            SubscriptionTier::Pro => 1,
            SubscriptionTier::Enterprise => 2,
        }
    }

    /// Whether this tier satisfies `minimum`
    pub fn satisfies(&self, minimum: SubscriptionTier) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Guard evaluated at the start of a tier-restricted operation
    pub fn require(&self, minimum: SubscriptionTier) -> Result<(), TierError> {
        if self.satisfies(minimum) {
            Ok(())
        } else {
            Err(TierError {
                required: minimum,
                actual: *self,
            })
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "pro" => Ok(SubscriptionTier::Pro),
            "enterprise" => Ok(SubscriptionTier::Enterprise),
            other => Err(DomainError::UnknownTier(other.to_string())),
        }
    }
}
