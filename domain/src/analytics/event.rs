//! Analytics event value object

use crate::core::subscriber::SubscriberId;
use crate::quota::DenialReason;
use crate::reasoning::ReasoningChain;
use crate::synthesis::SynthesisStrategy;
use crate::tier::SubscriptionTier;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fire-and-forget event describing one orchestration outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    ReasoningCompleted {
        chain_id: Uuid,
        subscriber: SubscriberId,
        tier: SubscriptionTier,
        strategy: SynthesisStrategy,
        personas: usize,
        failed_personas: usize,
        tokens: u64,
        confidence: f64,
        execution_ms: u64,
        partial: bool,
    },
    QuotaDenied {
        subscriber: SubscriberId,
        tier: SubscriptionTier,
        reason: String,
        tokens_requested: u64,
    },
}

impl AnalyticsEvent {
    pub fn completed(chain: &ReasoningChain, subscriber: &SubscriberId) -> Self {
        AnalyticsEvent::ReasoningCompleted {
            chain_id: chain.chain_id,
            subscriber: subscriber.clone(),
            tier: chain.tier_used,
            strategy: chain.strategy,
            personas: chain.persona_steps.len(),
            failed_personas: chain.failed_steps().count(),
            tokens: chain.total_tokens,
            confidence: chain.confidence_score,
            execution_ms: chain.execution_time.as_millis() as u64,
            partial: chain.partial,
        }
    }

    pub fn denied(
        subscriber: &SubscriberId,
        tier: SubscriptionTier,
        reason: &DenialReason,
        tokens_requested: u64,
    ) -> Self {
        AnalyticsEvent::QuotaDenied {
            subscriber: subscriber.clone(),
            tier,
            reason: reason.to_string(),
            tokens_requested,
        }
    }

    /// Event type identifier (e.g. "reasoning_completed")
    pub fn event_type(&self) -> &'static str {
        match self {
            AnalyticsEvent::ReasoningCompleted { .. } => "reasoning_completed",
            AnalyticsEvent::QuotaDenied { .. } => "quota_denied",
        }
    }
}
