//! SQLite-backed usage store

use async_trait::async_trait;
use personachain_application::ports::quota_store::{QuotaStore, QuotaStoreError};
use personachain_domain::{AccountingPeriod, SubscriberId, UsageRecord};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS usage (
    subscriber   TEXT    NOT NULL,
    period       TEXT    NOT NULL,
    queries_used INTEGER NOT NULL DEFAULT 0,
    tokens_used  INTEGER NOT NULL DEFAULT 0,
    updated_at   TEXT    NOT NULL,
    PRIMARY KEY (subscriber, period)
)";

/// Durable usage store
///
/// Each operation runs on the blocking pool. Increments are a single
/// `INSERT ... ON CONFLICT DO UPDATE`, so the row update is atomic in the
/// database itself.
#[derive(Clone)]
pub struct SqliteQuotaStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteQuotaStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QuotaStoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                QuotaStoreError::Unavailable(format!("{}: {}", parent.display(), e))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| QuotaStoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        info!("Usage database opened at {}", path.display());
        Self::with_connection(conn)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self, QuotaStoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| QuotaStoreError::Unavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, QuotaStoreError> {
        conn.execute(SCHEMA, [])
            .map_err(|e| QuotaStoreError::Query(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, QuotaStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| QuotaStoreError::Unavailable("connection lock poisoned".to_string()))?;
            op(&*conn).map_err(|e| QuotaStoreError::Query(e.to_string()))
        })
        .await
        .map_err(|e| QuotaStoreError::Unavailable(e.to_string()))?
    }
}

fn to_record(queries: i64, tokens: i64) -> UsageRecord {
    UsageRecord::new(queries.max(0) as u64, tokens.max(0) as u64)
}

#[async_trait]
impl QuotaStore for SqliteQuotaStore {
    async fn load(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
    ) -> Result<UsageRecord, QuotaStoreError> {
        let subscriber = subscriber.as_str().to_string();
        let key = period.key();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT queries_used, tokens_used FROM usage
                 WHERE subscriber = ?1 AND period = ?2",
                params![subscriber, key],
                |row| Ok(to_record(row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map(Option::unwrap_or_default)
        })
        .await
    }

    async fn increment(
        &self,
        subscriber: &SubscriberId,
        period: AccountingPeriod,
        tokens: u64,
    ) -> Result<UsageRecord, QuotaStoreError> {
        let subscriber = subscriber.as_str().to_string();
        let key = period.key();
        let tokens = i64::try_from(tokens).unwrap_or(i64::MAX);
        let now = chrono::Utc::now().to_rfc3339();

        let record = self
            .with_conn(move |conn| {
                conn.query_row(
                    "INSERT INTO usage (subscriber, period, queries_used, tokens_used, updated_at)
                     VALUES (?1, ?2, 1, ?3, ?4)
                     ON CONFLICT(subscriber, period) DO UPDATE SET
                         queries_used = queries_used + 1,
                         tokens_used = tokens_used + ?3,
                         updated_at = ?4
                     RETURNING queries_used, tokens_used",
                    params![subscriber, key, tokens, now],
                    |row| Ok(to_record(row.get(0)?, row.get(1)?)),
                )
            })
            .await?;

        debug!(
            "Usage row now {} queries / {} tokens",
            record.queries_used, record.tokens_used
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> AccountingPeriod {
        AccountingPeriod::new(2026, 10).unwrap()
    }

    fn u1() -> SubscriberId {
        SubscriberId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn test_upsert_accumulates() {
        let store = SqliteQuotaStore::open_in_memory().unwrap();
        assert_eq!(store.load(&u1(), period()).await.unwrap(), UsageRecord::default());

        store.increment(&u1(), period(), 120).await.unwrap();
        let record = store.increment(&u1(), period(), 30).await.unwrap();

        assert_eq!(record, UsageRecord::new(2, 150));
        assert_eq!(store.load(&u1(), period()).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_usage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("usage.db");

        {
            let store = SqliteQuotaStore::open(&path).unwrap();
            store.increment(&u1(), period(), 42).await.unwrap();
        }

        let store = SqliteQuotaStore::open(&path).unwrap();
        assert_eq!(
            store.load(&u1(), period()).await.unwrap(),
            UsageRecord::new(1, 42)
        );
        assert_eq!(
            store.load(&u1(), period().next()).await.unwrap(),
            UsageRecord::default()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_lose_nothing() {
        let store = SqliteQuotaStore::open_in_memory().unwrap();

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment(&u1(), period(), 25).await })
            })
            .collect();
        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        assert_eq!(
            store.load(&u1(), period()).await.unwrap(),
            UsageRecord::new(40, 1000)
        );
    }
}
