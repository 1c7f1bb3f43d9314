//! Tracing subscriber setup

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter for a `-v` count: warn by default, then info, debug, trace
pub fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// Install the global subscriber.
///
/// With `log_file`, records are also appended to that file through a
/// non-blocking writer; keep the returned guard alive until exit so the
/// writer flushes.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter_for(verbosity))
            .with(console)
            .try_init()
            .context("Failed to initialize logging")?;
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .context("--log-file must name a file")?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(console)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(Some(guard))
}
