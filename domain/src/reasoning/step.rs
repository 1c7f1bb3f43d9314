//! Reasoning step value object

use crate::core::string::word_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Confidence never exceeds this, however long the response
pub const MAX_STEP_CONFIDENCE: f64 = 0.9;

/// Word count at which the length bonus saturates
const CONFIDENCE_SATURATION_WORDS: f64 = 200.0;

/// Length-based confidence heuristic for a successful step:
/// `min(0.9, 0.5 + 0.4 * min(1, words / 200))`.
pub fn step_confidence(content: &str) -> f64 {
    let ratio = (word_count(content) as f64 / CONFIDENCE_SATURATION_WORDS).min(1.0);
    (0.5 + 0.4 * ratio).min(MAX_STEP_CONFIDENCE)
}

/// Kind of reasoning a step carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningType {
    /// The persona produced an analysis
    Analysis,
    /// The persona invocation failed; content holds the error marker
    Failed,
}

/// One persona's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub step_id: Uuid,
    pub persona_name: String,
    pub content: String,
    pub confidence: f64,
    pub reasoning_type: ReasoningType,
    pub tokens_used: u64,
    #[serde(with = "duration_secs")]
    pub processing_time: Duration,
    pub timestamp: DateTime<Utc>,
}

impl ReasoningStep {
    /// A step for a persona that answered
    pub fn success(
        persona_name: impl Into<String>,
        content: impl Into<String>,
        tokens_used: u64,
        processing_time: Duration,
    ) -> Self {
        let content = content.into();
        Self {
            step_id: Uuid::new_v4(),
            persona_name: persona_name.into(),
            confidence: step_confidence(&content),
            content,
            reasoning_type: ReasoningType::Analysis,
            tokens_used,
            processing_time,
            timestamp: Utc::now(),
        }
    }

    /// A degraded step: error marker content, zero tokens, zero confidence
    pub fn failure(
        persona_name: impl Into<String>,
        error: impl std::fmt::Display,
        processing_time: Duration,
    ) -> Self {
        Self {
            step_id: Uuid::new_v4(),
            persona_name: persona_name.into(),
            content: format!("Error: {}", error),
            confidence: 0.0,
            reasoning_type: ReasoningType::Failed,
            tokens_used: 0,
            processing_time,
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.reasoning_type != ReasoningType::Failed
    }
}

/// Serialize a `Duration` as fractional seconds
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert_eq!(step_confidence(""), 0.5);
        let hundred = "word ".repeat(100);
        assert!((step_confidence(&hundred) - 0.7).abs() < 1e-9);
        let long = "word ".repeat(1000);
        assert!((step_confidence(&long) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_failure_step() {
        let step = ReasoningStep::failure("The Skeptic", "timed out", Duration::ZERO);
        assert_eq!(step.content, "Error: timed out");
        assert_eq!(step.confidence, 0.0);
        assert_eq!(step.tokens_used, 0);
        assert!(!step.is_success());
    }

    #[test]
    fn test_success_step_ids_unique() {
        let a = ReasoningStep::success("A", "x", 1, Duration::ZERO);
        let b = ReasoningStep::success("A", "x", 1, Duration::ZERO);
        assert_ne!(a.step_id, b.step_id);
        assert!(a.is_success());
    }

    #[test]
    fn test_processing_time_serialized_as_seconds() {
        let step = ReasoningStep::success("A", "x", 1, Duration::from_millis(1500));
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["processing_time"], 1.5);
        assert_eq!(value["reasoning_type"], "analysis");
    }
}
