//! Error types for the `tagx` command line.

use thiserror::Error;

/// Failures raised while configuring the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
