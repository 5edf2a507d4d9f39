//! E2E tests for script file execution
//! Tests running Termish scripts from files

use std::fs;
use std::process::Command;
use tempfile::NamedTempFile;

const CLI_BINARY: &str = env!("CARGO_BIN_EXE_termish");

fn run_script(content: &str) -> std::process::Output {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, content).unwrap();

    Command::new(CLI_BINARY)
        .arg(temp_file.path().to_str().unwrap())
        .output()
        .unwrap()
}

#[test]
fn test_script_file_execution() {
    let output = run_script("echo \"hello from script\"");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "hello from script"
    );
}

#[test]
fn test_multi_line_script_shares_state() {
    let output = run_script("count = 1\ncount += 41\n\n   echo $count");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "42\n");
}

#[test]
fn test_script_answers_confirmation() {
    let output = run_script("maybe; echo \"done\"\nn");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "example question [y/n]\n> n\nuser said no\nman....\ndone\n"
    );
}

#[test]
fn test_script_stack_listing() {
    let output = run_script("stack set b 2\nstack set a \"one\"\nstack list");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], format!("name{}value", " ".repeat(12)));
    assert_eq!(lines[1], format!("- b{}2", " ".repeat(15)));
    assert_eq!(lines[2], format!("- a{}one", " ".repeat(15)));
}

#[test]
fn test_script_error_sets_exit_code() {
    let output = run_script("echo 1\nclear -x\necho 2");

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_SYNTAX"));
}

#[test]
fn test_script_path_warning() {
    let output = run_script("echo 1; ./other.tsh");

    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("The filesystem hasn't been implemented yet")
    );
}
