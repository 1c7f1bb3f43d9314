//! Quota store port
//!
//! Durable counters keyed by (subscriber, accounting period). The store,
//! not the caller, serializes concurrent increments for the same key.

use async_trait::async_trait;
use personachain_domain::{AccountingPeriod, SubscriberId, UsageRecord};
use thiserror::Error;

/// Errors surfaced by a quota store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuotaStoreError {
    #[error("Quota store unavailable: {0}")]
    Unavailable(String),

    #[error("Quota store query failed: {0}")]
    Query(String),
}

#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Usage for the key; a missing row reads as zero usage
    async fn load(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
    ) -> Result<UsageRecord, QuotaStoreError>;

    /// Atomically add one query and `tokens` to the key, creating the row
    /// if absent. Returns the updated record.
    async fn increment(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
        tokens: u64,
    ) -> Result<UsageRecord, QuotaStoreError>;
}
