//! Tracing setup driven by the config file
//!
//! The log level comes from `log_level`, never from the environment.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::domain::config::AppConfig;

/// Where log lines may go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr, or the configured log file
    StderrOrFile,
    /// Only the configured log file; nothing is logged without one
    FileOnly,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {message}")]
    OpenFile { path: String, message: String },

    #[error("Failed to install logger: {0}")]
    Install(String),
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when logging stays disabled.
pub fn init_logging(config: &AppConfig, target: LogTarget) -> Result<bool, LoggingError> {
    let level = config.log_level_or_default();
    let log_file = config.log_file_path();

    if level == "off" || (target == LogTarget::FileOnly && log_file.is_none()) {
        return Ok(false);
    }

    let filter = EnvFilter::new(level);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = open_log_file(&path)?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => subscriber.with_writer(std::io::stderr).try_init(),
    };

    installed
        .map(|_| true)
        .map_err(|e| LoggingError::Install(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::OpenFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
