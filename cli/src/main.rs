//! CLI entrypoint for PersonaChain
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use personachain_application::{
    AnalyticsSink, QuotaLedger, QuotaStore, ReasonInput, ReasonUseCase,
};
use personachain_domain::{AccountingPeriod, OutputFormat, Query, SubscriberId};
use personachain_infrastructure::{
    AnalyticsHandler, ChannelAnalyticsSink, ConfigLoader, FileConfig, InMemoryQuotaStore,
    JsonlAnalyticsHandler, LocalStubGenerator, QuotaBackend, SqliteQuotaStore,
    TracingAnalyticsHandler,
};
use personachain_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, UsageReport, formatter_for,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let output_format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    info!("Starting PersonaChain");

    // === Dependency Injection ===
    let store = build_quota_store(&config)?;
    let ledger = Arc::new(QuotaLedger::new(store, config.tiers));

    let subscriber = match &cli.subscriber {
        Some(id) => SubscriberId::new(id.as_str())?,
        None => SubscriberId::anonymous(),
    };

    if cli.show_usage {
        let usage = ledger
            .usage(&subscriber)
            .await
            .context("Failed to read usage")?;
        let report = UsageReport::new(
            subscriber,
            AccountingPeriod::current(),
            cli.tier.as_str(),
            usage,
            *config.tiers.limits(cli.tier),
        );
        let out = match output_format {
            OutputFormat::Json => ConsoleFormatter::usage_json(&report),
            _ => ConsoleFormatter::usage(&report),
        };
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    let query = match cli.query.as_deref() {
        Some(q) => Query::new(q)?,
        None => bail!("A query is required. Use --show-usage to inspect quota instead."),
    };

    let handler: Arc<dyn AnalyticsHandler> = match &config.analytics.jsonl_path {
        Some(path) => Arc::new(
            JsonlAnalyticsHandler::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Arc::new(TracingAnalyticsHandler),
    };
    let (sink, worker) = ChannelAnalyticsSink::spawn(config.analytics.queue_capacity, handler);
    let analytics: Arc<dyn AnalyticsSink> = Arc::new(sink.clone());

    let use_case = ReasonUseCase::new(
        Arc::new(LocalStubGenerator::new()),
        Arc::new(config.persona_registry()?),
        ledger,
    )
    .with_config(config.orchestrator.to_orchestrator_config())
    .with_analytics(analytics);

    let mut input = ReasonInput::new(query, subscriber, cli.tier).with_strategy(cli.strategy);
    if let Some(personas) = cli.persona_subset() {
        input = input.with_personas(personas);
    }
    if let Some(tokens) = cli.max_tokens {
        input = input.with_max_tokens_per_persona(tokens);
    }

    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    };

    let handled = worker.shutdown().await;
    debug!(
        handled,
        dropped = sink.dropped(),
        "Analytics consumer stopped"
    );

    let chain = match result {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
            return Ok(ExitCode::from(if e.is_quota_exceeded() { 2 } else { 1 }));
        }
    };

    println!("{}", formatter_for(output_format).format(&chain));

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;
    Ok(config)
}

fn build_quota_store(config: &FileConfig) -> Result<Arc<dyn QuotaStore>> {
    let store: Arc<dyn QuotaStore> = match config.quota.backend {
        QuotaBackend::Memory => Arc::new(InMemoryQuotaStore::new()),
        QuotaBackend::Sqlite => {
            let path = config.quota.resolved_database_path();
            Arc::new(
                SqliteQuotaStore::open(&path)
                    .with_context(|| format!("Failed to open usage database {}", path.display()))?,
            )
        }
    };
    Ok(store)
}
