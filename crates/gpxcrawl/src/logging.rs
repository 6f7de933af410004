//! Log sink setup.
//!
//! Crawl events go to two places: an append-only log file that survives
//! across runs, and stderr for live tailing. The filter comes from
//! `RUST_LOG` and defaults to `info`.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Error, Result};

pub const DEFAULT_FILTER: &str = "info";

/// Keeps the non-blocking file writer alive.
///
/// Dropping it flushes whatever is still buffered.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Split a log path into the directory and file name `tracing_appender`
/// expects. A bare file name lives in the working directory.
pub fn split_log_path(log_file: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = log_file
        .file_name()
        .ok_or_else(|| Error::Logging(format!("log path {} has no file name", log_file.display())))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}

/// Install the global subscriber.
///
/// Existing log content is kept; new events are appended. Fails if the log
/// directory cannot be created or a subscriber is already installed.
pub fn init_logging(log_file: &Path) -> Result<LoggingGuard> {
    let (dir, name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::Logging(format!("cannot create {}: {e}", dir.display())))?;

    let appender = tracing_appender::rolling::never(&dir, &name);
    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
