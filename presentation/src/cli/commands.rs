//! CLI command definitions

use clap::{Parser, ValueEnum};
use personachain_domain::{SubscriptionTier, SynthesisStrategy};
use std::path::PathBuf;

/// Output format for reasoning chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report
    Markdown,
    /// Pretty-printed JSON record
    Json,
    /// Standalone HTML document
    Html,
}

impl From<OutputFormat> for personachain_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => personachain_domain::OutputFormat::Markdown,
            OutputFormat::Json => personachain_domain::OutputFormat::Json,
            OutputFormat::Html => personachain_domain::OutputFormat::Html,
        }
    }
}

/// CLI arguments for personachain
#[derive(Parser, Debug)]
#[command(name = "personachain")]
#[command(author, version, about = "Multi-persona reasoning with tiered quotas")]
#[command(long_about = r#"
PersonaChain sends one query to several reasoning personas in parallel and
combines their answers.

Each request:
1. Admission: the subscriber's monthly quota and tier limits are checked
2. Fan-out: every eligible persona reasons about the query independently
3. Synthesis: the persona answers are merged by the selected strategy
4. Final answer: a concise answer is generated from the synthesis

Configuration files are loaded from (in priority order):
1. --config <path>            Explicit config file
2. ./personachain.toml        Project-level config
3. ~/.config/personachain/config.toml   Global config

Example:
  personachain "Is unit testing important?"
  personachain --tier pro --strategy fluid -p skeptic -p strategist "Should we rewrite in Rust?"
  personachain --subscriber alice --show-usage
"#)]
pub struct Cli {
    /// The query to reason about (not required with --show-usage)
    pub query: Option<String>,

    /// Subscription tier of the caller
    #[arg(short, long, default_value = "free")]
    pub tier: SubscriptionTier,

    /// Output format (defaults to the config file's, then markdown)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Personas to run (can be specified multiple times; default: all eligible)
    #[arg(short, long = "persona", value_name = "ID")]
    pub personas: Vec<String>,

    /// Subscriber id for quota accounting (default: anonymous)
    #[arg(short, long, value_name = "ID")]
    pub subscriber: Option<String>,

    /// Synthesis strategy: concatenative, fluid, hypothesis_merge
    #[arg(long, default_value = "concatenative")]
    pub strategy: SynthesisStrategy,

    /// Token budget per persona call
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show the subscriber's usage for the current month and exit
    #[arg(long)]
    pub show_usage: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Persona subset, `None` meaning every eligible persona
    pub fn persona_subset(&self) -> Option<Vec<String>> {
        (!self.personas.is_empty()).then(|| self.personas.clone())
    }
}
