//! Admission decision

use super::usage::UsageRecord;
use crate::tier::TierLimits;
use serde::{Deserialize, Serialize};

/// Why a request was not admitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    MonthlyQueriesExceeded,
    TokensPerQueryExceeded,
    PersonaLimitExceeded,
    /// The usage store could not be read; admission fails closed
    StorageUnavailable(String),
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::MonthlyQueriesExceeded => write!(f, "Monthly queries exceeded"),
            DenialReason::TokensPerQueryExceeded => write!(f, "Token limit per query exceeded"),
            DenialReason::PersonaLimitExceeded => write!(f, "Persona limit exceeded"),
            DenialReason::StorageUnavailable(e) => write!(f, "Usage storage unavailable: {}", e),
        }
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Denied(DenialReason),
}

impl Admission {
    /// Evaluate a request against the tier limits and current usage.
    ///
    /// Checks run in order: monthly queries, tokens per query, persona count.
    pub fn evaluate(
        limits: &TierLimits,
        usage: &UsageRecord,
        tokens_requested: u64,
        persona_count: usize,
    ) -> Self {
        if limits.queries_per_month.is_reached(usage.queries_used) {
            return Admission::Denied(DenialReason::MonthlyQueriesExceeded);
        }
        if limits.tokens_per_query.is_exceeded_by(tokens_requested) {
            return Admission::Denied(DenialReason::TokensPerQueryExceeded);
        }
        if limits.personas_max.is_exceeded_by(persona_count as u64) {
            return Admission::Denied(DenialReason::PersonaLimitExceeded);
        }
        Admission::Admitted
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    /// `(admitted, reason)` pair; the reason is `"OK"` when admitted
    pub fn as_pair(&self) -> (bool, String) {
        match self {
            Admission::Admitted => (true, "OK".to_string()),
            Admission::Denied(reason) => (false, reason.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{SubscriptionTier, TierTable};

    fn free() -> TierLimits {
        *TierTable::default().limits(SubscriptionTier::Free)
    }

    #[test]
    fn test_admits_within_limits() {
        let a = Admission::evaluate(&free(), &UsageRecord::default(), 1500, 3);
        assert!(a.is_admitted());
        assert_eq!(a.as_pair(), (true, "OK".to_string()));
    }

    #[test]
    fn test_denies_when_monthly_limit_met() {
        let a = Admission::evaluate(&free(), &UsageRecord::new(100, 0), 500, 1);
        assert_eq!(
            a.as_pair(),
            (false, "Monthly queries exceeded".to_string())
        );
    }

    #[test]
    fn test_denies_token_overrun() {
        let a = Admission::evaluate(&free(), &UsageRecord::default(), 2001, 1);
        assert_eq!(a, Admission::Denied(DenialReason::TokensPerQueryExceeded));
    }

    #[test]
    fn test_denies_persona_overrun() {
        let a = Admission::evaluate(&free(), &UsageRecord::default(), 100, 4);
        assert_eq!(a, Admission::Denied(DenialReason::PersonaLimitExceeded));
    }

    #[test]
    fn test_unlimited_disables_query_check() {
        let enterprise = *TierTable::default().limits(SubscriptionTier::Enterprise);
        let a = Admission::evaluate(&enterprise, &UsageRecord::new(u64::MAX, 0), 20_000, 50);
        assert!(a.is_admitted());
    }
}
