//! Standalone HTML report

use super::formatter::OutputFormatter;
use html_escape::encode_text;
use personachain_domain::ReasoningChain;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;line-height:1.5}\
.step{border-left:4px solid #4a7;padding:0 1rem;margin:1rem 0}\
.step.failed{border-color:#c44}\
.meta{color:#666;font-size:.9em}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem}";

pub struct HtmlFormatter;

impl OutputFormatter for HtmlFormatter {
    fn format(&self, chain: &ReasoningChain) -> String {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!(
            "<title>PersonaChain: {}</title>\n<style>{}</style>\n</head>\n<body>\n",
            encode_text(&chain.query),
            STYLE
        ));
        out.push_str(&format!(
            "<h1>{}</h1>\n<p class=\"meta\">Tier {} &middot; strategy {} &middot; confidence {:.2} &middot; {} tokens &middot; {:.2}s</p>\n",
            encode_text(&chain.query),
            chain.tier_used,
            chain.strategy,
            chain.confidence_score,
            chain.total_tokens,
            chain.execution_time.as_secs_f64()
        ));
        if chain.partial {
            out.push_str("<p class=\"meta\"><strong>Partial result:</strong> the request deadline passed before every persona finished.</p>\n");
        }

        out.push_str("<h2>Persona Perspectives</h2>\n");
        for step in &chain.persona_steps {
            let class = if step.is_success() { "step" } else { "step failed" };
            out.push_str(&format!(
                "<section class=\"{}\">\n<h3>{}</h3>\n<p class=\"meta\">confidence {:.2} &middot; {} tokens</p>\n<p>{}</p>\n</section>\n",
                class,
                encode_text(&step.persona_name),
                step.confidence,
                step.tokens_used,
                encode_text(&step.content)
            ));
        }

        out.push_str(&format!(
            "<h2>Synthesis</h2>\n<pre>{}</pre>\n",
            encode_text(&chain.synthesis)
        ));
        out.push_str(&format!(
            "<h2>Final Answer</h2>\n<p>{}</p>\n</body>\n</html>\n",
            encode_text(&chain.final_answer)
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::formatter::sample_chain;

    #[test]
    fn test_html_escapes_content() {
        let out = HtmlFormatter.format(&sample_chain(false));
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("Tests catch &lt;regressions&gt; &amp; document intent."));
        assert!(!out.contains("<regressions>"));
        assert!(out.contains("class=\"step failed\""));
        assert!(out.trim_end().ends_with("</html>"));
    }
}
