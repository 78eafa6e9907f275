//! Structured logging for the `tagx` binary.
//!
//! Logs go to stderr so that stdout carries only command output. Records
//! emitted by the library through the `log` facade are forwarded into the
//! same subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `TAGX_LOG_LEVEL`
/// 3. `warn`
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    // The first subscriber wins.
    if result.is_err() {
        tracing::trace!("logging already initialised");
    }
}
