//! Tier limit table

use super::subscription_tier::SubscriptionTier;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A quota bound: either a finite count or unlimited
///
/// In configuration files a limit is written as a non-negative integer,
/// `-1`, or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr", into = "LimitRepr")]
pub enum Limit {
    Finite(u64),
    Unlimited,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(i64),
    Word(String),
}

impl TryFrom<LimitRepr> for Limit {
    type Error = DomainError;

    fn try_from(repr: LimitRepr) -> Result<Self, Self::Error> {
        match repr {
            LimitRepr::Count(-1) => Ok(Limit::Unlimited),
            LimitRepr::Count(n) if n >= 0 => Ok(Limit::Finite(n as u64)),
            LimitRepr::Count(n) => Err(DomainError::InvalidLimit(n.to_string())),
            LimitRepr::Word(w) if w.eq_ignore_ascii_case("unlimited") => Ok(Limit::Unlimited),
            LimitRepr::Word(w) => Err(DomainError::InvalidLimit(w)),
        }
    }
}

impl From<Limit> for LimitRepr {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Finite(n) => LimitRepr::Count(i64::try_from(n).unwrap_or(i64::MAX)),
            Limit::Unlimited => LimitRepr::Word("unlimited".to_string()),
        }
    }
}

impl Limit {
    /// True once `used` has reached a finite limit
    pub fn is_reached(&self, used: u64) -> bool {
        match self {
            Limit::Finite(max) => used >= *max,
            Limit::Unlimited => false,
        }
    }

    /// True when `requested` is strictly above a finite limit
    pub fn is_exceeded_by(&self, requested: u64) -> bool {
        match self {
            Limit::Finite(max) => requested > *max,
            Limit::Unlimited => false,
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Finite(n) => write!(f, "{}", n),
            Limit::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Limits bound to one subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Queries admitted per accounting period
    pub queries_per_month: Limit,
    /// Personas a single request may fan out to
    pub personas_max: Limit,
    /// Estimated tokens a single request may reserve
    pub tokens_per_query: Limit,
}

impl TierLimits {
    pub const fn new(queries_per_month: Limit, personas_max: Limit, tokens_per_query: Limit) -> Self {
        Self {
            queries_per_month,
            personas_max,
            tokens_per_query,
        }
    }
}

/// Tier-to-limit mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub free: TierLimits,
    pub pro: TierLimits,
    pub enterprise: TierLimits,
}

impl TierTable {
    pub fn limits(&self, tier: SubscriptionTier) -> &TierLimits {
        match tier {
            SubscriptionTier::Free => &self.free,
            SubscriptionTier::Pro => &self.pro,
            SubscriptionTier::Enterprise => &self.enterprise,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            free: TierLimits::new(Limit::Finite(100), Limit::Finite(3), Limit::Finite(2000)),
            pro: TierLimits::new(Limit::Finite(10_000), Limit::Finite(8), Limit::Finite(8000)),
            enterprise: TierLimits::new(Limit::Unlimited, Limit::Unlimited, Limit::Finite(20_000)),
        }
    }
}
