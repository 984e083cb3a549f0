use std::io;
use std::path::Path;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub(crate) const LOG_FILE_PREFIX: &str = "intake.log";

/// Where submission logs go besides the rolling JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogEcho {
    /// The screen owns the terminal; file only.
    None,
    Stderr,
}

pub(crate) fn init_tracing(
    log_dir: &Path,
    echo: LogEcho,
    default_level: &str,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .json();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match echo {
        LogEcho::Stderr => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact();
            registry.with(stderr_layer).init();
        }
        LogEcho::None => registry.init(),
    }

    Ok(file_guard)
}
