//! Logging system configuration and initialization
//!
//! Console and optional file output driven by [`LoggingConfig`], with
//! module-level filters and a RUST_LOG override.

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the non-blocking file writer alive for the process lifetime.
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging with custom configuration.
///
/// The RUST_LOG environment variable overrides the configured level and
/// module filters entirely, e.g. `RUST_LOG="debug,sqlx::query=debug"`.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => {
            let mut directives = config.level.clone();
            for (module, level) in &config.module_filters {
                directives.push_str(&format!(",{module}={level}"));
            }
            EnvFilter::try_new(directives)?
        }
    };

    let console_layer = if config.console_output {
        let layer = fmt::layer().with_target(true);
        if config.json_format {
            Some(layer.json().boxed())
        } else {
            Some(layer.boxed())
        }
    } else {
        None
    };

    let file_layer = if config.file_output {
        let log_dir = config
            .file_directory
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from("logs"));
        let appender = tracing_appender::rolling::daily(log_dir, "post-sync.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(fmt::layer().with_ansi(false).with_writer(writer).boxed())
    } else {
        None
    };

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
