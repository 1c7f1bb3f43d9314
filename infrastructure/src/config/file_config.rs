//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use personachain_application::OrchestratorConfig;
use personachain_domain::{DomainError, OutputFormat, PersonaConfig, PersonaRegistry, TierTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use personachain_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("orchestrator.max_concurrent_personas cannot be 0")]
    ZeroConcurrency,

    #[error("{0} cannot be 0")]
    ZeroTimeout(&'static str),

    #[error("analytics.queue_capacity cannot be 0")]
    ZeroQueueCapacity,

    #[error("invalid [[personas]] entry: {0}")]
    InvalidPersona(#[from] DomainError),
}

/// Raw orchestrator configuration (`[orchestrator]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Personas generating at the same time within one request
    pub max_concurrent_personas: usize,
    /// Default token budget per persona call
    pub max_tokens_per_persona: u64,
    /// Token budget for the final-answer call
    pub final_answer_max_tokens: u64,
    /// Per-persona deadline in seconds
    pub persona_timeout_seconds: Option<u64>,
    /// Whole-request deadline in seconds
    pub request_timeout_seconds: Option<u64>,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            max_concurrent_personas: defaults.max_concurrent_personas,
            max_tokens_per_persona: defaults.max_tokens_per_persona,
            final_answer_max_tokens: defaults.final_answer_max_tokens,
            persona_timeout_seconds: defaults.persona_timeout.map(|d| d.as_secs()),
            request_timeout_seconds: defaults.request_timeout.map(|d| d.as_secs()),
        }
    }
}

impl FileOrchestratorConfig {
    pub fn to_orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_max_concurrent_personas(self.max_concurrent_personas)
            .with_max_tokens_per_persona(self.max_tokens_per_persona)
            .with_final_answer_max_tokens(self.final_answer_max_tokens)
            .with_persona_timeout(self.persona_timeout_seconds.map(Duration::from_secs))
            .with_request_timeout(self.request_timeout_seconds.map(Duration::from_secs))
    }
}

/// Usage ledger backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaBackend {
    /// Durable SQLite database
    #[default]
    Sqlite,
    /// Process-local map, lost on exit
    Memory,
}

/// Raw quota configuration (`[quota]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuotaConfig {
    pub backend: QuotaBackend,
    /// SQLite file; defaults to `<data_dir>/personachain/usage.db`
    pub database_path: Option<PathBuf>,
}

impl FileQuotaConfig {
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("personachain")
                .join("usage.db")
        })
    }
}

/// Raw analytics configuration (`[analytics]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalyticsConfig {
    /// Bounded queue size; events beyond it are dropped
    pub queue_capacity: usize,
    /// Append events as JSON lines to this file instead of the log
    pub jsonl_path: Option<PathBuf>,
}

impl Default for FileAnalyticsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            jsonl_path: None,
        }
    }
}

/// Raw output configuration (`[output]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub orchestrator: FileOrchestratorConfig,
    pub tiers: TierTable,
    /// Replacement persona registry; empty keeps the built-in one
    pub personas: Vec<PersonaConfig>,
    pub quota: FileQuotaConfig,
    pub analytics: FileAnalyticsConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.orchestrator.max_concurrent_personas == 0 {
            return Err(ConfigValidationError::ZeroConcurrency);
        }
        if let Some(0) = self.orchestrator.persona_timeout_seconds {
            return Err(ConfigValidationError::ZeroTimeout(
                "orchestrator.persona_timeout_seconds",
            ));
        }
        if let Some(0) = self.orchestrator.request_timeout_seconds {
            return Err(ConfigValidationError::ZeroTimeout(
                "orchestrator.request_timeout_seconds",
            ));
        }
        if self.analytics.queue_capacity == 0 {
            return Err(ConfigValidationError::ZeroQueueCapacity);
        }
        self.persona_registry()?;
        Ok(())
    }

    /// Build the persona registry, falling back to the built-in personas
    pub fn persona_registry(&self) -> Result<PersonaRegistry, ConfigValidationError> {
        if self.personas.is_empty() {
            return Ok(PersonaRegistry::default());
        }
        Ok(PersonaRegistry::new(self.personas.clone())?)
    }
}
