//! `tagx`: parse, check and evaluate Cucumber tag expressions from the shell.
//!
//! ```text
//! $ tagx parse "@fast and not @wip"
//! ( @fast and not ( @wip ) )
//! $ tagx eval "@fast and not @wip" --tag @fast
//! true
//! ```

use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod logging;

fn main() -> eyre::Result<ExitCode> {
    cli::run()
}
