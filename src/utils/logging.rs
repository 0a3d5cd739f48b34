//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventicHub application.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventicHubError, Result};

/// Initialize logging based on configuration.
///
/// When a log directory is configured the returned guard must be kept alive
/// for the lifetime of the program, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| EventicHubError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let guard = match &config.file_path {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "eventichub.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
                .try_init()
                .map_err(|e| EventicHubError::Config(format!("Logging already initialized: {}", e)))?;

            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()
                .map_err(|e| EventicHubError::Config(format!("Logging already initialized: {}", e)))?;

            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log authentication transitions
pub fn log_auth_event(event: &str, user_id: Option<&str>, email: Option<&str>) {
    info!(
        event = event,
        user_id = user_id,
        email = email,
        "Authentication state changed"
    );
}

/// Log a single request against a remote table
pub fn log_data_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Data operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Data operation failed"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
