//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["personachain.toml", ".personachain.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./personachain.toml` or `./.personachain.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/personachain/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Self::base();

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring discovery
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Self::base()
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(FileConfig::default()))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("personachain").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND  ] Project:  {}", path.display()),
            None => println!("  [       ] Project:  ./personachain.toml or ./.personachain.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<7}] Global:   {}", mark, path.display());
        }

        println!("  [       ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuotaBackend;
    use personachain_domain::Limit;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.orchestrator.max_concurrent_personas, 3);
        assert_eq!(config.quota.backend, QuotaBackend::Sqlite);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("personachain"));
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personachain.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[orchestrator]\nmax_concurrent_personas = 5\n\n[tiers.free]\nqueries_per_month = 10\n\n[quota]\nbackend = \"memory\""
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.orchestrator.max_concurrent_personas, 5);
        assert_eq!(config.orchestrator.max_tokens_per_persona, 500);
        assert_eq!(config.tiers.free.queries_per_month, Limit::Finite(10));
        // untouched keys of the same table keep their defaults
        assert_eq!(config.tiers.free.tokens_per_query, Limit::Finite(2000));
        assert_eq!(config.tiers.enterprise.queries_per_month, Limit::Unlimited);
        assert_eq!(config.quota.backend, QuotaBackend::Memory);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[tiers.free]\nqueries_per_month = \"lots\"\n").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }
}
