//! Output format value object

use serde::{Deserialize, Serialize};

/// Rendering of a reasoning chain
///
/// Every format is a pure rendering of the same result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
    /// Standalone HTML document
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_markdown() {
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Html).unwrap();
        assert_eq!(json, "\"html\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
