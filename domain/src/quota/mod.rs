//! Usage quota domain
//!
//! Consumption is bucketed per subscriber per [`AccountingPeriod`]
//! (calendar month). A [`UsageRecord`] only ever grows within a period and
//! starts over implicitly when the period key changes. [`Admission`] is the
//! pure decision evaluated against a tier's limits before any work starts.

pub mod admission;
pub mod period;
pub mod usage;

pub use admission::{Admission, DenialReason};
pub use period::AccountingPeriod;
pub use usage::UsageRecord;
