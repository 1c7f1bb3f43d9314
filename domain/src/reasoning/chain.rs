//! Reasoning chain - the result record of one orchestration

use super::step::{ReasoningStep, duration_secs};
use crate::synthesis::SynthesisStrategy;
use crate::tier::SubscriptionTier;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Complete, immutable result of reasoning about one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningChain {
    pub chain_id: Uuid,
    pub query: String,
    /// Steps in registry order, not completion order
    pub persona_steps: Vec<ReasoningStep>,
    pub synthesis: String,
    pub final_answer: String,
    /// Mean of step confidences; 0 when there are no steps
    pub confidence_score: f64,
    #[serde(with = "duration_secs")]
    pub execution_time: Duration,
    /// Sum of step token counts
    pub total_tokens: u64,
    pub tier_used: SubscriptionTier,
    pub strategy: SynthesisStrategy,
    /// The request deadline expired before every persona finished
    #[serde(default)]
    pub partial: bool,
}

impl ReasoningChain {
    /// Assemble a chain, deriving the aggregate confidence and token total
    /// from the steps.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        query: impl Into<String>,
        persona_steps: Vec<ReasoningStep>,
        synthesis: impl Into<String>,
        final_answer: impl Into<String>,
        execution_time: Duration,
        tier_used: SubscriptionTier,
        strategy: SynthesisStrategy,
        partial: bool,
    ) -> Self {
        Self {
            chain_id: Uuid::new_v4(),
            query: query.into(),
            confidence_score: Self::aggregate_confidence(&persona_steps),
            total_tokens: persona_steps.iter().map(|s| s.tokens_used).sum(),
            persona_steps,
            synthesis: synthesis.into(),
            final_answer: final_answer.into(),
            execution_time,
            tier_used,
            strategy,
            partial,
        }
    }

    /// Arithmetic mean of step confidences, exactly 0 for no steps
    pub fn aggregate_confidence(steps: &[ReasoningStep]) -> f64 {
        if steps.is_empty() {
            return 0.0;
        }
        steps.iter().map(|s| s.confidence).sum::<f64>() / steps.len() as f64
    }

    pub fn successful_steps(&self) -> impl Iterator<Item = &ReasoningStep> {
        self.persona_steps.iter().filter(|s| s.is_success())
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &ReasoningStep> {
        self.persona_steps.iter().filter(|s| !s.is_success())
    }
}
