//! Persona configuration entity

use crate::core::error::DomainError;
use crate::tier::SubscriptionTier;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the query in a prompt template
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Configuration for a single persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Registry key (e.g. "skeptic")
    pub id: String,
    /// Display name recorded on each reasoning step
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thinking_style: String,
    /// Format string with one `{query}` placeholder
    pub prompt_template: String,
    /// Minimum tier required to run this persona
    #[serde(default)]
    pub tier: SubscriptionTier,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Reserved for ranking; not used by synthesis
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

impl PersonaConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            thinking_style: String::new(),
            prompt_template: prompt_template.into(),
            tier: SubscriptionTier::Free,
            enabled: true,
            weight: 1.0,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_thinking_style(mut self, style: impl Into<String>) -> Self {
        self.thinking_style = style.into();
        self
    }

    pub fn with_tier(mut self, tier: SubscriptionTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether a caller on `tier` may run this persona
    pub fn is_eligible(&self, tier: SubscriptionTier) -> bool {
        self.enabled && tier.satisfies(self.tier)
    }

    /// Render the prompt template with the query substituted
    pub fn render_prompt(&self, query: &str) -> String {
        self.prompt_template.replace(QUERY_PLACEHOLDER, query)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidPersona {
                id: self.id.clone(),
                reason: "id cannot be empty".to_string(),
            });
        }
        if !self.prompt_template.contains(QUERY_PLACEHOLDER) {
            return Err(DomainError::InvalidPersona {
                id: self.id.clone(),
                reason: format!("prompt template has no {} placeholder", QUERY_PLACEHOLDER),
            });
        }
        Ok(())
    }
}
