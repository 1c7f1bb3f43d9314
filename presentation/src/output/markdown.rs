//! Markdown report

use super::formatter::OutputFormatter;
use personachain_domain::ReasoningChain;

pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, chain: &ReasoningChain) -> String {
        let mut out = String::new();

        out.push_str("# PersonaChain Reasoning\n\n");
        out.push_str(&format!("**Query:** {}\n\n", chain.query));
        out.push_str(&format!(
            "**Tier:** {} | **Strategy:** {} | **Confidence:** {:.2} | **Tokens:** {} | **Time:** {:.2}s\n\n",
            chain.tier_used,
            chain.strategy,
            chain.confidence_score,
            chain.total_tokens,
            chain.execution_time.as_secs_f64()
        ));
        if chain.partial {
            out.push_str("> Partial result: the request deadline passed before every persona finished.\n\n");
        }

        out.push_str("## Persona Perspectives\n\n");
        if chain.persona_steps.is_empty() {
            out.push_str("_No personas ran for this request._\n\n");
        }
        for step in &chain.persona_steps {
            let status = if step.is_success() { "" } else { " (failed)" };
            out.push_str(&format!(
                "### {}{}\n\n_Confidence {:.2}, {} tokens, {} ms_\n\n{}\n\n",
                step.persona_name,
                status,
                step.confidence,
                step.tokens_used,
                step.processing_time.as_millis(),
                step.content
            ));
        }

        out.push_str("---\n\n");
        out.push_str(chain.synthesis.trim_end());
        out.push_str("\n\n## Final Answer\n\n");
        out.push_str(&chain.final_answer);
        out.push('\n');
        out
    }
}
