//! Synthesis strategies
//!
//! A strategy reduces the ordered persona steps into one synthesis string
//! before the final-answer call. Strategies are pure and total: they never
//! fail, including on an empty step sequence.

pub mod strategy;

pub use strategy::{NO_REASONING_SENTINEL, SynthesisStrategy};
