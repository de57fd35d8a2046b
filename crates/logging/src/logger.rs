//! Subscriber installation

use std::path::Path;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use common::error::{Error, Result};
use provider_config::{LogFormat, LoggingConfig};

/// Keeps the background log writer alive; flushes on drop
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Builds the event filter: `RUST_LOG` wins over the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Installs the global subscriber.
///
/// A second call leaves the existing subscriber in place and returns an
/// empty guard.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = build_filter(&config.level)?;

    let (writer, worker, ansi) = match &config.file {
        Some(path) => {
            let (writer, worker) = file_writer(path)?;
            (writer, Some(worker), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer).with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_ansi(ansi).with_writer(writer))
            .try_init(),
    };

    if result.is_err() {
        debug!("Global subscriber already installed, keeping it");
        return Ok(LoggingGuard { _worker: None });
    }

    debug!(format = ?config.format, level = %config.level, "Logging initialized");

    Ok(LoggingGuard { _worker: worker })
}

fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Config(format!("Log file path has no file name: {}", path.display())))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory).map_err(|e| {
        Error::Config(format!("Cannot create log directory {}: {}", directory.display(), e))
    })?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, worker) = tracing_appender::non_blocking(appender);

    Ok((BoxMakeWriter::new(non_blocking), worker))
}
