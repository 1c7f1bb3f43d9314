//! Configuration file loading for personachain
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./personachain.toml` or `./.personachain.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/personachain/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnalyticsConfig, FileConfig, FileOrchestratorConfig,
    FileOutputConfig, FileOutputFormat, FileQuotaConfig, QuotaBackend,
};
pub use loader::ConfigLoader;
