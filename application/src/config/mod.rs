//! Application-level configuration.
//!
//! - [`OrchestratorConfig`] - fan-out bound, token budgets and deadlines

pub mod orchestrator_config;

pub use orchestrator_config::OrchestratorConfig;
