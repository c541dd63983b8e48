//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::ClientConfig;

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The configured filter does not parse.
    #[error("invalid log level filter {filter:?}: {source}")]
    InvalidFilter {
        /// The rejected filter.
        filter: String,
        /// The parser error.
        #[source]
        source: ParseError,
    },

    /// Another global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `config.log_level`.
/// Emits JSON lines when `config.log_json` is set.
pub fn init_tracing(config: &ClientConfig) -> Result<(), LoggingError> {
    let filter = build_filter(&config.log_level)?;

    let installed = if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn build_filter(log_level: &str) -> Result<EnvFilter, LoggingError> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    EnvFilter::try_new(log_level).map_err(|source| LoggingError::InvalidFilter {
        filter: log_level.to_owned(),
        source,
    })
}
