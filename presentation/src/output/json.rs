//! JSON record output

use super::formatter::OutputFormatter;
use personachain_domain::ReasoningChain;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, chain: &ReasoningChain) -> String {
        serde_json::to_string_pretty(chain).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("Failed to serialize chain: {}", e) }).to_string()
        })
    }
}
