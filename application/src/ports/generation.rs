//! Generation port
//!
//! Defines the interface the orchestrator uses to obtain one completion
//! from a language model. Provider selection, retries and transport live
//! behind it.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors a generation provider can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Persona task aborted")]
    Aborted,
}

/// One completion and the tokens it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub tokens_consumed: u64,
}

impl Generation {
    pub fn new(text: impl Into<String>, tokens_consumed: u64) -> Self {
        Self {
            text: text.into(),
            tokens_consumed,
        }
    }
}

/// Capability to turn a prompt into text
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u64) -> Result<Generation, GenerationError>;
}
