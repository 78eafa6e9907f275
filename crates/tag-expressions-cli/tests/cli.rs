//! End-to-end tests for the `tagx` binary.
#![expect(
    clippy::expect_used,
    reason = "binary smoke tests fail loudly on harness errors"
)]

use assert_cmd::Command;
use rstest::rstest;
use std::str;

fn tagx() -> Command {
    let mut cmd = Command::cargo_bin("tagx").expect("binary exists");
    cmd.env_remove("TAGX_LOG_LEVEL");
    cmd
}

fn stdout_of(output: &std::process::Output) -> &str {
    str::from_utf8(&output.stdout).expect("utf8 stdout")
}

fn stderr_of(output: &std::process::Output) -> &str {
    str::from_utf8(&output.stderr).expect("utf8 stderr")
}

#[test]
fn parse_prints_canonical_form() {
    let output = tagx()
        .args(["parse", "@fast and not (@wip or @flaky)"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "( @fast and not ( @wip or @flaky ) )\n");
}

#[rstest]
#[case(&["--tag", "@fast"], "true\n")]
#[case(&["--tag", "@fast", "--tag", "@wip"], "false\n")]
#[case(&[], "false\n")]
fn eval_prints_result(#[case] tags: &[&str], #[case] expected: &str) {
    let output = tagx()
        .args(["eval", "@fast and not @wip"])
        .args(tags)
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn eval_exit_code_flags_mismatch() {
    let output = tagx()
        .args(["eval", "@fast", "--tag", "@slow", "--exit-code"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "false\n");
}

#[test]
fn check_prints_ok() {
    let output = tagx()
        .args(["check", r"x\(1\) or y"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "ok\n");
}

#[test]
fn syntax_error_reports_diagnostic() {
    let output = tagx()
        .args(["parse", "a and or"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Expected operand after and"), "{stderr}");
    assert!(stderr.contains("Expression: a and or"), "{stderr}");
    assert!(
        stderr.contains(&format!("{}^ (HERE)", "_".repeat(18))),
        "{stderr}"
    );
}

#[test]
fn invalid_log_level_in_environment_is_rejected() {
    let output = tagx()
        .env("TAGX_LOG_LEVEL", "chatty")
        .args(["check", "a"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("unknown log level 'chatty'"), "{stderr}");
}

#[test]
fn log_level_flag_overrides_environment() {
    let output = tagx()
        .env("TAGX_LOG_LEVEL", "error")
        .args(["--log-level", "debug", "parse", "a or b"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "( a or b )\n");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("parsed tag expression"), "{stderr}");
}
