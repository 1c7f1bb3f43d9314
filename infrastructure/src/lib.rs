//! Infrastructure layer for personachain
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod analytics;
pub mod config;
pub mod providers;
pub mod quota;

// Re-export commonly used types
pub use analytics::{
    AnalyticsError, AnalyticsHandler, AnalyticsWorker, ChannelAnalyticsSink,
    JsonlAnalyticsHandler, TracingAnalyticsHandler,
};
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
    QuotaBackend,
};
pub use providers::LocalStubGenerator;
pub use quota::{InMemoryQuotaStore, SqliteQuotaStore};
