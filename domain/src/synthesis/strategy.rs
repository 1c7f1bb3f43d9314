//! Synthesis strategy variants

use crate::core::error::DomainError;
use crate::core::string::take_chars;
use crate::reasoning::ReasoningStep;
use serde::{Deserialize, Serialize};

/// Output of [`SynthesisStrategy::Concatenative`] for no steps
pub const NO_REASONING_SENTINEL: &str = "No reasoning steps provided.";

/// Characters of each step kept by [`SynthesisStrategy::Fluid`]
const FLUID_DIGEST_CHARS: usize = 120;

const HYPOTHESIS_SEPARATOR: &str = " | ";

/// Closed set of synthesis strategies
///
/// Adding a strategy means adding a variant and a branch in
/// [`apply`](Self::apply); the orchestrator is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStrategy {
    /// Labeled block per step with its confidence
    #[default]
    Concatenative,
    /// One truncated line per persona
    Fluid,
    /// Raw contents as parallel hypotheses, unweighted
    HypothesisMerge,
}

impl SynthesisStrategy {
    pub const ALL: [SynthesisStrategy; 3] = [
        SynthesisStrategy::Concatenative,
        SynthesisStrategy::Fluid,
        SynthesisStrategy::HypothesisMerge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisStrategy::Concatenative => "concatenative",
            SynthesisStrategy::Fluid => "fluid",
            SynthesisStrategy::HypothesisMerge => "hypothesis_merge",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SynthesisStrategy::Concatenative => "Labeled per-persona blocks with confidence",
            SynthesisStrategy::Fluid => "Condensed one-line-per-persona digest",
            SynthesisStrategy::HypothesisMerge => "Persona outputs merged as parallel hypotheses",
        }
    }

    /// Reduce the steps into a synthesis string
    pub fn apply(&self, _query: &str, steps: &[ReasoningStep]) -> String {
        match self {
            SynthesisStrategy::Concatenative => concatenative(steps),
            SynthesisStrategy::Fluid => fluid(steps),
            SynthesisStrategy::HypothesisMerge => hypothesis_merge(steps),
        }
    }
}

fn concatenative(steps: &[ReasoningStep]) -> String {
    if steps.is_empty() {
        return NO_REASONING_SENTINEL.to_string();
    }
    let mut out = String::from("## Synthesis\n\n");
    for step in steps {
        out.push_str(&format!(
            "**{}** (Conf: {:.2}):\n{}\n\n",
            step.persona_name, step.confidence, step.content
        ));
    }
    out
}

fn fluid(steps: &[ReasoningStep]) -> String {
    let lines: Vec<String> = steps
        .iter()
        .map(|s| format!("{}: {}", s.persona_name, take_chars(&s.content, FLUID_DIGEST_CHARS)))
        .collect();
    format!("Fluid synthesis:\n{}", lines.join("\n"))
}

fn hypothesis_merge(steps: &[ReasoningStep]) -> String {
    let hypotheses: Vec<&str> = steps.iter().map(|s| s.content.as_str()).collect();
    format!(
        "Hypothesis-merge synthesis:\n{}",
        hypotheses.join(HYPOTHESIS_SEPARATOR)
    )
}

impl std::fmt::Display for SynthesisStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SynthesisStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "concatenative" => Ok(SynthesisStrategy::Concatenative),
            "fluid" | "fluid_reasoning" => Ok(SynthesisStrategy::Fluid),
            "hypothesis_merge" | "quantum_inspired" => Ok(SynthesisStrategy::HypothesisMerge),
            other => Err(DomainError::UnknownStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn step(name: &str, content: &str) -> ReasoningStep {
        ReasoningStep::success(name, content, 10, Duration::ZERO)
    }

    #[test]
    fn test_every_strategy_tolerates_empty_input() {
        for strategy in SynthesisStrategy::ALL {
            let out = strategy.apply("q", &[]);
            assert!(!out.is_empty(), "{} produced empty output", strategy);
        }
        assert_eq!(
            SynthesisStrategy::Concatenative.apply("q", &[]),
            NO_REASONING_SENTINEL
        );
        assert_eq!(SynthesisStrategy::Fluid.apply("q", &[]), "Fluid synthesis:\n");
    }

    #[test]
    fn test_concatenative_blocks() {
        let out = SynthesisStrategy::Concatenative.apply("q", &[step("The Skeptic", "doubt")]);
        assert_eq!(out, "## Synthesis\n\n**The Skeptic** (Conf: 0.50):\ndoubt\n\n");
    }

    #[test]
    fn test_fluid_truncates_and_keeps_order() {
        let long = "x".repeat(300);
        let out = SynthesisStrategy::Fluid.apply("q", &[step("A", &long), step("B", "short")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Fluid synthesis:");
        assert_eq!(lines[1], format!("A: {}", "x".repeat(120)));
        assert_eq!(lines[2], "B: short");
    }

    #[test]
    fn test_hypothesis_merge_joins_raw_contents() {
        let out =
            SynthesisStrategy::HypothesisMerge.apply("q", &[step("A", "one"), step("B", "two")]);
        assert_eq!(out, "Hypothesis-merge synthesis:\none | two");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "hypothesis-merge".parse::<SynthesisStrategy>(),
            Ok(SynthesisStrategy::HypothesisMerge)
        );
        assert_eq!(
            "fluid_reasoning".parse::<SynthesisStrategy>(),
            Ok(SynthesisStrategy::Fluid)
        );
        assert!("magic".parse::<SynthesisStrategy>().is_err());
    }
}
