//! Command dispatch for the `tagx` entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use tag_expressions::{Expression, parse};

use crate::config::{CliConfig, LogLevel};
use crate::logging::init_logging;

/// Parse, validate and evaluate Cucumber tag expressions.
#[derive(Debug, Parser)]
#[command(name = "tagx", author, version, about)]
pub(crate) struct Cli {
    /// Log level written to stderr; overrides `TAGX_LOG_LEVEL`.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the canonical, fully parenthesised form of an expression.
    Parse {
        /// Tag expression to parse.
        expression: String,
    },
    /// Evaluate an expression against a set of tags.
    Eval(EvalArgs),
    /// Check that an expression is well formed.
    Check {
        /// Tag expression to check.
        expression: String,
    },
}

#[derive(Debug, Args)]
pub(crate) struct EvalArgs {
    /// Tag expression to evaluate.
    pub expression: String,
    /// Tag carried by the evaluated item; repeat for several tags.
    #[arg(long = "tag", short = 't', value_name = "TAG")]
    pub tags: Vec<String>,
    /// Exit with status 1 when the expression does not match.
    #[arg(long)]
    pub exit_code: bool,
}

/// Parse the command line and run the selected command.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the expression cannot be
/// parsed, or stdout cannot be written.
pub(crate) fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()
        .wrap_err("failed to load configuration")?
        .apply_overrides(cli.log_level);
    init_logging(&config);
    tracing::debug!(?config, "configuration loaded");

    let mut stdout = io::stdout().lock();
    let code = execute(&mut stdout, &cli.command)?;
    stdout.flush().wrap_err("failed to flush output to stdout")?;
    Ok(code)
}

fn execute(writer: &mut dyn Write, command: &Commands) -> Result<ExitCode> {
    match command {
        Commands::Parse { expression } => {
            handle_parse(writer, expression)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Eval(args) => {
            let matched = handle_eval(writer, &args.expression, &args.tags)?;
            if args.exit_code && !matched {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { expression } => {
            handle_check(writer, expression)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_expression(expression: &str) -> Result<Expression> {
    parse(expression).wrap_err_with(|| format!("invalid tag expression `{expression}`"))
}

fn handle_parse(writer: &mut dyn Write, expression: &str) -> Result<()> {
    let parsed = parse_expression(expression)?;
    writeln!(writer, "{parsed}").wrap_err("failed to write canonical form")
}

fn handle_eval(writer: &mut dyn Write, expression: &str, tags: &[String]) -> Result<bool> {
    let parsed = parse_expression(expression)?;
    let matched = parsed.matches(tags.iter().map(String::as_str));
    tracing::info!(expression = %parsed, ?tags, matched, "evaluated expression");
    writeln!(writer, "{matched}").wrap_err("failed to write evaluation result")?;
    Ok(matched)
}

fn handle_check(writer: &mut dyn Write, expression: &str) -> Result<()> {
    parse_expression(expression)?;
    writeln!(writer, "ok").wrap_err("failed to write check result")
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    fn output_of(command: &Commands) -> (ExitCode, String) {
        let mut buffer = Vec::new();
        let code = execute(&mut buffer, command).unwrap();
        (code, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_writes_canonical_form() {
        let command = Commands::Parse {
            expression: "a and not b or c".to_string(),
        };
        let (code, out) = output_of(&command);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, "( ( a and not ( b ) ) or c )\n");
    }

    #[rstest]
    #[case("a and b", &["a", "b"], "true\n")]
    #[case("a and b", &["a"], "false\n")]
    #[case("", &[], "true\n")]
    fn eval_writes_result(#[case] expression: &str, #[case] tags: &[&str], #[case] expected: &str) {
        let command = Commands::Eval(EvalArgs {
            expression: expression.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            exit_code: false,
        });
        let (code, out) = output_of(&command);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, expected);
    }

    #[test]
    fn eval_exit_code_reports_mismatch() {
        let command = Commands::Eval(EvalArgs {
            expression: "a".to_string(),
            tags: vec!["b".to_string()],
            exit_code: true,
        });
        let (code, out) = output_of(&command);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(out, "false\n");
    }

    #[test]
    fn check_rejects_malformed_expression() {
        let command = Commands::Check {
            expression: "a and or".to_string(),
        };
        let mut buffer = Vec::new();
        let report = execute(&mut buffer, &command).unwrap_err();
        assert!(buffer.is_empty());
        let rendered = format!("{report:?}");
        assert!(rendered.contains("invalid tag expression `a and or`"), "{rendered}");
        assert!(rendered.contains("Expected operand after and"), "{rendered}");
    }

    #[test]
    fn cli_accepts_repeated_tags_and_global_log_level() {
        let cli = Cli::try_parse_from([
            "tagx", "eval", "a or b", "--tag", "a", "-t", "c", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Commands::Eval(args) = cli.command else {
            panic!("expected eval command");
        };
        assert_eq!(args.tags, ["a", "c"]);
        assert!(!args.exit_code);
    }

    #[test]
    fn cli_rejects_unknown_log_level() {
        let err = Cli::try_parse_from(["tagx", "--log-level", "loud", "check", "a"]).unwrap_err();
        assert!(err.to_string().contains("unknown log level 'loud'"), "{err}");
    }
}
