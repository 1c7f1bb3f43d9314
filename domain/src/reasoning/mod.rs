//! Reasoning records - immutable outputs of one orchestration.
//!
//! - [`ReasoningStep`] - one persona's output (successful or degraded)
//! - [`ReasoningChain`] - the complete result record returned to the caller

pub mod chain;
pub mod step;

pub use chain::ReasoningChain;
pub use step::{ReasoningStep, ReasoningType, step_confidence};
