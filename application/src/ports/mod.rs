//! Ports (interfaces) for external dependencies
//!
//! These traits define the boundaries between the application layer
//! and infrastructure/presentation layers.

pub mod analytics;
pub mod generation;
pub mod progress;
pub mod quota_store;
