//! Command-line configuration parsed from the environment.
//!
//! The only setting is the log level, read from `TAGX_LOG_LEVEL` and
//! overridable with `--log-level`.

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable holding the default log level.
pub const LOG_LEVEL_ENV: &str = "TAGX_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so normal runs print only the command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every reduction performed by the parser.
    Trace,
    /// Parse outcomes and canonical forms.
    Debug,
    /// Command progress.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a single `tagx` invocation.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if `TAGX_LOG_LEVEL` holds an
    /// unknown level.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|val| val.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { log_level })
    }

    /// Apply command-line overrides on top of environment-derived values.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("debug", LogLevel::Debug)]
    #[case("info", LogLevel::Info)]
    #[case("warn", LogLevel::Warn)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case(" Info ", LogLevel::Info)]
    fn log_level_parses_valid_values(#[case] raw: &str, #[case] expected: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().unwrap(), expected);
    }

    #[test]
    fn log_level_rejects_unknown_values() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("unknown log level 'verbose'"));
    }

    #[test]
    fn override_replaces_environment_level() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Trace));
        assert_eq!(config.log_level, LogLevel::Trace);
        let config = config.apply_overrides(None);
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn lookup_reads_log_level() {
        let config = CliConfig::from_lookup(|key| {
            (key == LOG_LEVEL_ENV).then(|| "error".to_string())
        });
        assert_eq!(config.unwrap().log_level, LogLevel::Error);
    }

    #[test]
    fn lookup_defaults_when_unset() {
        let config = CliConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn lookup_rejects_invalid_level() {
        let err = CliConfig::from_lookup(|_| Some("chatty".to_string())).unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }
}
