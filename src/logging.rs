//! Logging setup and configuration.

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::error::AppError;

/// Sets up logging with both console and file output.
///
/// Console output goes to stderr so stdout stays free for the rendered page.
pub fn setup_logging(config: &Config) -> Result<(), AppError> {
    let file_writer = file_writer(config)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("podcastr=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(true))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .map_err(|e| AppError::ConfigurationError {
            msg: format!("Failed to install global subscriber: {e}"),
        })?;

    Ok(())
}

/// Daily rolling log files under `config.logs_path`, written off-thread.
///
/// The worker guard is leaked so buffered lines are flushed for the life of the process.
fn file_writer(config: &Config) -> Result<NonBlocking, AppError> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("podcastr")
        .filename_suffix("log")
        .max_log_files(7)
        .build(&config.logs_path)
        .map_err(|e| AppError::ConfigurationError {
            msg: format!(
                "Failed to initialize rolling file appender at '{}': {}",
                config.logs_path.to_string_lossy(),
                e
            ),
        })?;

    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    std::mem::forget(guard);

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_logs_path_that_is_a_file_is_rejected() {
        let mut config = Config::new();
        config.logs_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");

        let err = setup_logging(&config).unwrap_err();

        match err {
            AppError::ConfigurationError { msg } => {
                assert!(msg.contains("rolling file appender"), "{msg}");
            }
            other => panic!("Expected ConfigurationError, got {other:?}"),
        }
    }
}
