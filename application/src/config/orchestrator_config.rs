//! Orchestrator parameters - fan-out control.
//!
//! Supplied at startup and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fan-out control parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Persona generations allowed in flight at once within one request
    pub max_concurrent_personas: usize,
    /// Default per-persona token budget when the request gives none
    pub max_tokens_per_persona: u64,
    /// Token budget of the final-answer call
    pub final_answer_max_tokens: u64,
    /// Deadline for a single persona invocation
    pub persona_timeout: Option<Duration>,
    /// Outer deadline for the whole fan-out
    pub request_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_personas: 3,
            max_tokens_per_persona: 500,
            final_answer_max_tokens: 300,
            persona_timeout: Some(Duration::from_secs(30)),
            request_timeout: None,
        }
    }
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    /// Zero is clamped to one so the fan-out can always make progress
    pub fn with_max_concurrent_personas(mut self, max: usize) -> Self {
        self.max_concurrent_personas = max.max(1);
        self
    }

    pub fn with_max_tokens_per_persona(mut self, tokens: u64) -> Self {
        self.max_tokens_per_persona = tokens;
        self
    }

    pub fn with_final_answer_max_tokens(mut self, tokens: u64) -> Self {
        self.final_answer_max_tokens = tokens;
        self
    }

    pub fn with_persona_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.persona_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.max_concurrent_personas, 3);
        assert_eq!(config.max_tokens_per_persona, 500);
        assert_eq!(config.final_answer_max_tokens, 300);
        assert_eq!(config.persona_timeout, Some(Duration::from_secs(30)));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = OrchestratorConfig::default()
            .with_max_concurrent_personas(0)
            .with_max_tokens_per_persona(250)
            .with_request_timeout(Some(Duration::from_secs(5)));

        assert_eq!(config.max_concurrent_personas, 1);
        assert_eq!(config.max_tokens_per_persona, 250);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
