//! Persona registry

use super::config::PersonaConfig;
use crate::core::error::DomainError;
use crate::tier::SubscriptionTier;

/// Ordered, immutable collection of personas
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaRegistry {
    personas: Vec<PersonaConfig>,
}

impl PersonaRegistry {
    /// Build a registry, rejecting invalid templates and duplicate ids
    pub fn new(personas: Vec<PersonaConfig>) -> Result<Self, DomainError> {
        for (i, persona) in personas.iter().enumerate() {
            persona.validate()?;
            if personas[..i].iter().any(|p| p.id == persona.id) {
                return Err(DomainError::InvalidPersona {
                    id: persona.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }
        Ok(Self { personas })
    }

    pub fn get(&self, id: &str) -> Option<&PersonaConfig> {
        self.personas.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> impl Iterator<Item = &PersonaConfig> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Personas a caller on `tier` may run, in registry order.
    ///
    /// With `requested`, the result is narrowed to those ids; unknown,
    /// disabled or tier-ineligible ids are dropped without error.
    pub fn eligible_personas(
        &self,
        tier: SubscriptionTier,
        requested: Option<&[String]>,
    ) -> Vec<PersonaConfig> {
        self.personas
            .iter()
            .filter(|p| p.is_eligible(tier))
            .filter(|p| requested.is_none_or(|ids| ids.iter().any(|id| id == &p.id)))
            .cloned()
            .collect()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        let analyze = |name: &str| format!("As {}, analyze: {{query}}", name);
        Self {
            personas: vec![
                PersonaConfig::new("skeptic", "The Skeptic", analyze("The Skeptic"))
                    .with_description("Critical thinker who challenges assumptions")
                    .with_thinking_style("Critical"),
                PersonaConfig::new("optimist", "The Optimist", analyze("The Optimist"))
                    .with_description("Opportunity-focused positive thinker")
                    .with_thinking_style("Positive"),
                PersonaConfig::new("analyst", "The Analyst", analyze("The Analyst"))
                    .with_description("Data-driven systematic thinker")
                    .with_thinking_style("Analytical"),
                PersonaConfig::new("strategist", "The Strategist", analyze("The Strategist"))
                    .with_description("Long-range planner weighing trade-offs")
                    .with_thinking_style("Strategic")
                    .with_tier(SubscriptionTier::Pro),
                PersonaConfig::new("ethicist", "The Ethicist", analyze("The Ethicist"))
                    .with_description("Examines consequences for the people affected")
                    .with_thinking_style("Ethical")
                    .with_tier(SubscriptionTier::Pro),
                PersonaConfig::new("futurist", "The Futurist", analyze("The Futurist"))
                    .with_description("Extrapolates trends and second-order effects")
                    .with_thinking_style("Speculative")
                    .with_tier(SubscriptionTier::Enterprise),
            ],
        }
    }
}
