//! Subscription tiers and their limits
//!
//! A tier is an ordered service level (`Free < Pro < Enterprise`). Each tier
//! is bound to a [`TierLimits`] triple; the full mapping is a [`TierTable`]
//! supplied at startup and immutable afterwards.

pub mod limits;
pub mod subscription_tier;

pub use limits::{Limit, TierLimits, TierTable};
pub use subscription_tier::{SubscriptionTier, TierError};
