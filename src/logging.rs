//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Events go to stderr. `RUST_LOG` takes precedence over the configured
//! level when it is set. `DASHBOARD_LOG_FORMAT` picks the output format.

use std::io;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format.
    Pretty,
    /// Single-line format.
    #[default]
    Compact,
}

/// Environment variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "DASHBOARD_LOG_FORMAT";

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format \"{other}\"")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this application's own events.
    pub level: Level,
    /// Level for dependencies (windowing, rendering backends).
    pub dependency_level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            dependency_level: Level::WARN,
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Defaults, with the format taken from `DASHBOARD_LOG_FORMAT` when set.
    pub fn from_env() -> Self {
        Self::default().with_format_var(std::env::var(LOG_FORMAT_VAR).ok().as_deref())
    }

    /// Unrecognised values keep the current format.
    pub fn with_format_var(mut self, value: Option<&str>) -> Self {
        if let Some(format) = value.and_then(|v| v.parse().ok()) {
            self.format = format;
        }
        self
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn directive(&self) -> String {
        format!(
            "{},{}={}",
            self.dependency_level.as_str().to_lowercase(),
            env!("CARGO_CRATE_NAME"),
            self.level.as_str().to_lowercase()
        )
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_quiets_dependencies() {
        let config = LogConfig::default();
        assert_eq!(config.directive(), "warn,sleep_health_dashboard=info");
    }

    #[test]
    fn directive_follows_configured_level() {
        let config = LogConfig {
            level: Level::DEBUG,
            dependency_level: Level::ERROR,
            ..LogConfig::default()
        };
        assert_eq!(config.directive(), "error,sleep_health_dashboard=debug");
    }

    #[test]
    fn format_variable_selects_pretty() {
        let config = LogConfig::default().with_format_var(Some("Pretty"));
        assert_eq!(config.format, LogFormat::Pretty);

        let config = LogConfig::default().with_format_var(Some(" compact "));
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn unknown_format_keeps_default() {
        assert!("json".parse::<LogFormat>().is_err());
        let config = LogConfig::default().with_format_var(Some("json"));
        assert_eq!(config.format, LogFormat::Compact);
        let config = LogConfig::default().with_format_var(None);
        assert_eq!(config.format, LogFormat::Compact);
    }
}
