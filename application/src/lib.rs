//! Application layer for personachain
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use ports::{
    analytics::{AnalyticsSink, NoAnalytics},
    generation::{Generation, GenerationError, GenerationPort},
    progress::{NoProgress, ProgressNotifier},
    quota_store::{QuotaStore, QuotaStoreError},
};
pub use use_cases::quota_ledger::QuotaLedger;
pub use use_cases::reason::{ReasonError, ReasonInput, ReasonUseCase, UsageStats};
