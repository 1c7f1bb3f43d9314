//! Process-local usage store

use async_trait::async_trait;
use personachain_application::ports::quota_store::{QuotaStore, QuotaStoreError};
use personachain_domain::{AccountingPeriod, SubscriberId, UsageRecord};
use std::collections::HashMap;
use std::sync::Mutex;

type Key = (String, String);

/// Usage store backed by a locked map; contents are lost on exit
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    rows: Mutex<HashMap<Key, UsageRecord>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(subscriber: &SubscriberId, period: AccountingPeriod) -> Key {
        (subscriber.as_str().to_string(), period.key())
    }

    fn poisoned() -> QuotaStoreError {
        QuotaStoreError::Unavailable("usage map lock poisoned".to_string())
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn load(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
    ) -> Result<UsageRecord, QuotaStoreError> {
        let rows = self.rows.lock().map_err(|_| Self::poisoned())?;
        Ok(rows
            .get(&Self::key(subscriber, period))
            .copied()
            .unwrap_or_default())
    }

    async fn increment(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
        tokens: u64,
    ) -> Result<UsageRecord, QuotaStoreError> {
        let mut rows = self.rows.lock().map_err(|_| Self::poisoned())?;
        let row = rows.entry(Self::key(subscriber, period)).or_default();
        *row = row.incremented(tokens);
        Ok(*row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn period() -> AccountingPeriod {
        AccountingPeriod::new(2026, 10).unwrap()
    }

    #[tokio::test]
    async fn test_missing_row_is_zero() {
        let store = InMemoryQuotaStore::new();
        let u = SubscriberId::new("nobody").unwrap();
        assert_eq!(store.load(&u, period()).await.unwrap(), UsageRecord::default());
    }

    #[tokio::test]
    async fn test_periods_are_independent() {
        let store = InMemoryQuotaStore::new();
        let u = SubscriberId::new("u1").unwrap();
        store.increment(&u, period(), 10).await.unwrap();
        assert_eq!(
            store.load(&u, period().next()).await.unwrap(),
            UsageRecord::default()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let u = SubscriberId::new("u1").unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                let u = u.clone();
                tokio::spawn(async move { store.increment(&u, period(), 7).await })
            })
            .collect();
        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        assert_eq!(store.load(&u, period()).await.unwrap(), UsageRecord::new(50, 350));
    }
}
