//! E2E tests for complete CLI workflows
//! Tests the entire application through the command-line interface

use std::process::Command;

const CLI_BINARY: &str = env!("CARGO_BIN_EXE_termish");

fn run_command(args: &[&str]) -> std::process::Output {
    Command::new(CLI_BINARY)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to execute {CLI_BINARY}"))
}

fn run_command_string(command: &str) -> std::process::Output {
    run_command(&["-c", command])
}

#[test]
fn test_basic_echo() {
    let output = run_command_string("echo \"hello\"");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[test]
fn test_arithmetic() {
    let output = run_command_string("echo 2 + 3 * 4; echo (2 + 3) * 4");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "14\n20\n");
}

#[test]
fn test_command_not_found() {
    let output = run_command_string("nonexistent_command_12345");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonexistent_command_12345"));
    assert!(stderr.contains("ERR_UNKNOWN_COMMAND"));
}

#[test]
fn test_variable_stack() {
    let output = run_command_string("stack set greeting \"hi\"; echo $greeting + \" there\"");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hi there");
}

#[test]
fn test_sequence_stops_at_error() {
    let output = run_command_string("echo \"first\"; user \"\"; echo \"second\"");

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "first");
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_EXEC"));
}

#[test]
fn test_lex_error() {
    let output = run_command_string("echo \"unterminated");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_LEX"));
}

#[test]
fn test_help_lists_commands() {
    let output = run_command_string("help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("List of all available commands:"));
    assert!(stdout.contains("  license"));
}

#[test]
fn test_user_and_device_flags() {
    let output = run_command(&["--user", "ammon", "--device", "box", "-c", "cd src; echo (cd .)"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "~/src");
}

#[test]
fn test_missing_script_file() {
    let output = run_command(&["does_not_exist.tsh"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does_not_exist.tsh"));
}
