use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_NAME;
use crate::error::{Result, UtilsError};

/// Env filter from `RUST_LOG` with this crate pinned at the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    let directive = format!("{}={}", env!("CARGO_CRATE_NAME"), level)
        .parse()
        .map_err(|e| UtilsError::Logging(format!("Invalid log level '{}': {}", level, e)))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Initializes the logging system with console output and, when a log
/// directory is configured, a daily-rotated JSON file.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.level)?;
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(non_blocking_writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| UtilsError::Logging(e.to_string()))?;

    Ok(guard)
}
