//! Structured logging setup using tracing.
//!
//! JSON output by default, for log aggregation. `LOG_FORMAT=pretty` switches
//! to the human-readable formatter. With a log file configured, output is
//! appended to that file instead of stdout.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Output format of the log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}', expected 'json' or 'pretty'")),
        }
    }
}

/// Logging setup errors. Reported on stderr since no subscriber exists yet.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn build_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(filter)?)
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `filter` - The log filter directive (e.g., "info,tsnap_sync=debug")
/// * `format` - JSON or pretty output
/// * `log_file` - Append to this file instead of writing to stdout
///
/// # Panics
///
/// Panics if the subscriber has already been initialized.
pub fn init_logging(
    filter: &str,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<(), LoggingError> {
    let filter_layer = build_filter(filter)?;

    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_ansi(log_file.is_none())
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter_layer)
        .init();

    tracing::info!(filter = %filter, ?format, log_file = ?log_file, "Logging initialized");
    Ok(())
}

/// Initialize logging for tests (with simpler output).
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
