//! Output formatter trait

use super::html::HtmlFormatter;
use super::json::JsonFormatter;
use super::markdown::MarkdownFormatter;
use personachain_domain::{OutputFormat, ReasoningChain};

/// Pure rendering of a finished reasoning chain
pub trait OutputFormatter {
    fn format(&self, chain: &ReasoningChain) -> String;
}

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Html => Box::new(HtmlFormatter),
    }
}

/// Shared fixture for the renderer tests
#[cfg(test)]
pub(crate) fn sample_chain(partial: bool) -> ReasoningChain {
    use personachain_domain::{ReasoningStep, SubscriptionTier, SynthesisStrategy};
    use std::time::Duration;

    let steps = vec![
        ReasoningStep::success(
            "The Skeptic",
            "Tests catch <regressions> & document intent.",
            12,
            Duration::from_millis(20),
        ),
        ReasoningStep::failure("The Optimist", "Provider error: rate limited", Duration::ZERO),
    ];
    let synthesis = SynthesisStrategy::Concatenative.apply("Is unit testing important?", &steps);
    ReasoningChain::assemble(
        "Is unit testing important?",
        steps,
        synthesis,
        "Yes.",
        Duration::from_millis(1250),
        SubscriptionTier::Free,
        SynthesisStrategy::Concatenative,
        partial,
    )
}
