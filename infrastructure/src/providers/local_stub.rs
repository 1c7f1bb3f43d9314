//! Deterministic offline generator
//!
//! Echoes the prompt back behind a fixed marker. Used when no remote
//! provider is configured and throughout local testing.

use async_trait::async_trait;
use personachain_application::ports::generation::{Generation, GenerationError, GenerationPort};
use personachain_domain::core::string::{take_chars, word_count};
use std::time::Duration;
use tracing::trace;

/// Marker prefixed to every stub response
pub const STUB_MARKER: &str = "LOCAL_STUB_RESPONSE:\n";

const ECHO_CHARS: usize = 200;
const MIN_TOKENS: u64 = 10;

/// Generation port that never leaves the process
#[derive(Debug, Clone)]
pub struct LocalStubGenerator {
    latency: Duration,
}

impl LocalStubGenerator {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(10),
        }
    }

    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn reply(prompt: &str) -> String {
        let head = take_chars(prompt, ECHO_CHARS);
        if head.len() < prompt.len() {
            format!("{}{}...", STUB_MARKER, head)
        } else {
            format!("{}{}", STUB_MARKER, prompt)
        }
    }
}

impl Default for LocalStubGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationPort for LocalStubGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u64) -> Result<Generation, GenerationError> {
        let text = Self::reply(prompt);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let tokens = (word_count(&text) as u64).max(MIN_TOKENS).min(max_tokens);
        trace!("Stub generated {} tokens", tokens);
        Ok(Generation::new(text, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_short_prompt_echoed_whole() {
        let stub = LocalStubGenerator::new();
        let g = stub.generate("As The Skeptic, analyze: hi", 500).await.unwrap();
        assert_eq!(g.text, "LOCAL_STUB_RESPONSE:\nAs The Skeptic, analyze: hi");
        // 5 words, floored at 10
        assert_eq!(g.tokens_consumed, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_prompt_truncated() {
        let prompt = "word ".repeat(100);
        let g = LocalStubGenerator::new().generate(&prompt, 500).await.unwrap();
        assert!(g.text.ends_with("..."));
        assert_eq!(g.text.chars().count(), STUB_MARKER.len() + 200 + 3);
        // marker, 40 echoed words, then the detached ellipsis
        assert_eq!(g.tokens_consumed, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokens_capped_by_budget() {
        let prompt = "word ".repeat(100);
        let g = LocalStubGenerator::new().generate(&prompt, 5).await.unwrap();
        assert_eq!(g.tokens_consumed, 5);
    }

    #[tokio::test]
    async fn test_zero_latency() {
        let stub = LocalStubGenerator::new().with_latency(Duration::ZERO);
        assert!(stub.generate("q", 100).await.is_ok());
    }
}
