//! Hand-written port doubles shared by the use case tests.

use crate::ports::analytics::AnalyticsSink;
use crate::ports::quota_store::{QuotaStore, QuotaStoreError};
use async_trait::async_trait;
use personachain_domain::{AccountingPeriod, AnalyticsEvent, SubscriberId, UsageRecord};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store; one lock per operation keeps increments atomic
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<(String, String), UsageRecord>>,
}

impl MemoryStore {
    pub fn seeded(subscriber: &str, period: AccountingPeriod, usage: UsageRecord) -> Self {
        let store = Self::default();
        store
            .rows
            .lock()
            .unwrap()
            .insert((subscriber.to_string(), period.key()), usage);
        store
    }

    pub fn get(&self, subscriber: &str, period: AccountingPeriod) -> UsageRecord {
        self.rows
            .lock()
            .unwrap()
            .get(&(subscriber.to_string(), period.key()))
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuotaStore for MemoryStore {
    async fn load(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
    ) -> Result<UsageRecord, QuotaStoreError> {
        Ok(self.get(subscriber.as_str(), period))
    }

    async fn increment(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
        tokens: u64,
    ) -> Result<UsageRecord, QuotaStoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .entry((subscriber.to_string(), period.key()))
            .or_default();
        *row = row.incremented(tokens);
        Ok(*row)
    }
}

/// Store whose writes fail, and whose reads fail when `fail_load` is set
pub struct BrokenStore {
    pub fail_load: bool,
}

#[async_trait]
impl QuotaStore for BrokenStore {
    async fn load(
        &self,
        _subscriber: &SubscriberId,
        _period: AccountingPeriod,
    ) -> Result<UsageRecord, QuotaStoreError> {
        if self.fail_load {
            Err(QuotaStoreError::Unavailable("database is locked".to_string()))
        } else {
            Ok(UsageRecord::default())
        }
    }

    async fn increment(
        &self,
        _subscriber: &SubscriberId,
        _period: AccountingPeriod,
        _tokens: u64,
    ) -> Result<UsageRecord, QuotaStoreError> {
        Err(QuotaStoreError::Unavailable("disk full".to_string()))
    }
}

/// Sink that keeps every published event
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingSink {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type())
            .collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn publish(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}
