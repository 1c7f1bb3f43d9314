//! Usage ledger storage
//!
//! Both stores serialize updates per (subscriber, period) key so that
//! concurrent increments never lose an update.

mod memory;
mod sqlite;

pub use memory::InMemoryQuotaStore;
pub use sqlite::SqliteQuotaStore;
