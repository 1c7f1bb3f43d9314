//! Analytics events emitted by the orchestrator

pub mod event;

pub use event::AnalyticsEvent;
