//! Client configuration.

use std::env;

/// dynomap client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Tracing filter used when `RUST_LOG` is unset (default: `info`).
    pub log_level: String,
    /// Emit JSON log lines (default: false).
    pub log_json: bool,
    /// `ConsistentRead` for get and query contexts that leave it unset
    /// (default: false). Scans are never consistent.
    pub consistent_read: bool,
}

impl ClientConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("DYNOMAP_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
            log_json: env_bool("DYNOMAP_LOG_JSON", false),
            consistent_read: env_bool("DYNOMAP_CONSISTENT_READ", false),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_json: false,
            consistent_read: false,
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}
