//! Quota ledger use case
//!
//! Answers admission queries and records consumption against the
//! [`QuotaStore`]. Admission fails closed when the store cannot be read;
//! recording is best-effort because by then the work is already done.

use crate::ports::quota_store::{QuotaStore, QuotaStoreError};
use personachain_domain::{
    AccountingPeriod, Admission, DenialReason, SubscriberId, SubscriptionTier, TierTable,
    UsageRecord,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-subscriber, per-month usage ledger
pub struct QuotaLedger {
    store: Arc<dyn QuotaStore>,
    tiers: TierTable,
}

impl QuotaLedger {
    pub fn new(store: Arc<dyn QuotaStore>, tiers: TierTable) -> Self {
        Self { store, tiers }
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Admission check for the current accounting period
    pub async fn check_admission(
        &self,
        subscriber: &SubscriberId,
        tier: SubscriptionTier,
        tokens_requested: u64,
        persona_count: usize,
    ) -> Admission {
        self.check_admission_at(
            AccountingPeriod::current(),
            subscriber,
            tier,
            tokens_requested,
            persona_count,
        )
        .await
    }

    pub async fn check_admission_at(
        &self,
        period: AccountingPeriod,
        subscriber: &SubscriberId,
        tier: SubscriptionTier,
        tokens_requested: u64,
        persona_count: usize,
    ) -> Admission {
        let usage = match self.store.load(subscriber, period).await {
            Ok(usage) => usage,
            Err(e) => {
                warn!("Admission denied for {}: {}", subscriber, e);
                return Admission::Denied(DenialReason::StorageUnavailable(e.to_string()));
            }
        };

        let admission = Admission::evaluate(
            self.tiers.limits(tier),
            &usage,
            tokens_requested,
            persona_count,
        );
        debug!(
            subscriber = %subscriber,
            period = %period,
            tier = %tier,
            queries_used = usage.queries_used,
            tokens_requested,
            admitted = admission.is_admitted(),
            "Admission check"
        );
        admission
    }

    /// Record one completed query for the current period
    pub async fn record_usage(&self, subscriber: &SubscriberId, tokens_used: u64) {
        self.record_usage_at(AccountingPeriod::current(), subscriber, tokens_used)
            .await;
    }

    /// Record one completed query; failures are logged, never returned
    pub async fn record_usage_at(
        &self,
        period: AccountingPeriod,
        subscriber: &SubscriberId,
        tokens_used: u64,
    ) -> Option<UsageRecord> {
        match self.store.increment(subscriber, period, tokens_used).await {
            Ok(record) => {
                debug!(
                    subscriber = %subscriber,
                    period = %period,
                    queries_used = record.queries_used,
                    tokens_used = record.tokens_used,
                    "Usage recorded"
                );
                Some(record)
            }
            Err(e) => {
                warn!("Failed to record usage for {}: {}", subscriber, e);
                None
            }
        }
    }

    /// Current-period usage for reporting
    pub async fn usage(&self, subscriber: &SubscriberId) -> Result<UsageRecord, QuotaStoreError> {
        self.store.load(subscriber, AccountingPeriod::current()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{BrokenStore, MemoryStore};

    fn u1() -> SubscriberId {
        SubscriberId::new("u1").unwrap()
    }

    fn october() -> AccountingPeriod {
        AccountingPeriod::new(2026, 10).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_subscriber_admitted() {
        let ledger = QuotaLedger::new(Arc::new(MemoryStore::default()), TierTable::default());
        let admission = ledger
            .check_admission_at(october(), &u1(), SubscriptionTier::Free, 1500, 3)
            .await;
        assert!(admission.is_admitted());
    }

    #[tokio::test]
    async fn test_hundred_first_query_denied() {
        let store = MemoryStore::seeded("u1", october(), UsageRecord::new(100, 5000));
        let ledger = QuotaLedger::new(Arc::new(store), TierTable::default());
        let admission = ledger
            .check_admission_at(october(), &u1(), SubscriptionTier::Free, 500, 1)
            .await;
        assert_eq!(
            admission.as_pair(),
            (false, "Monthly queries exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn test_new_period_starts_over() {
        let store = MemoryStore::seeded("u1", october(), UsageRecord::new(100, 5000));
        let ledger = QuotaLedger::new(Arc::new(store), TierTable::default());
        let admission = ledger
            .check_admission_at(october().next(), &u1(), SubscriptionTier::Free, 500, 1)
            .await;
        assert!(admission.is_admitted());
    }

    #[tokio::test]
    async fn test_storage_failure_fails_closed() {
        let ledger = QuotaLedger::new(
            Arc::new(BrokenStore { fail_load: true }),
            TierTable::default(),
        );
        let admission = ledger
            .check_admission_at(october(), &u1(), SubscriptionTier::Enterprise, 1, 1)
            .await;
        assert!(matches!(
            admission,
            Admission::Denied(DenialReason::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_record_usage_upserts() {
        let store = Arc::new(MemoryStore::default());
        let ledger = QuotaLedger::new(store.clone(), TierTable::default());

        ledger.record_usage_at(october(), &u1(), 120).await;
        let record = ledger.record_usage_at(october(), &u1(), 30).await;

        assert_eq!(record, Some(UsageRecord::new(2, 150)));
        assert_eq!(store.get("u1", october()), UsageRecord::new(2, 150));
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        let ledger = QuotaLedger::new(
            Arc::new(BrokenStore { fail_load: false }),
            TierTable::default(),
        );
        assert_eq!(ledger.record_usage_at(october(), &u1(), 10).await, None);
    }
}
