//! Integration tests for parser + interpreter pipeline
//! Tests line execution, the variable stack and the confirmation flow

use termish_interpreter::{InputMode, Interpreter, SessionConfig, Severity, Value};

fn session() -> Interpreter {
    let mut interpreter = Interpreter::new();
    interpreter.context_mut().echo = false;
    interpreter
}

fn output(lines: &[&str]) -> Vec<String> {
    let mut interpreter = session();
    for line in lines {
        interpreter.submit_line(line);
    }
    interpreter
        .logger()
        .messages()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(output(&["echo 2 + 3 * 4", "echo (2 + 3) * 4"]), vec!["14", "20"]);
}

#[test]
fn test_javascript_style_values() {
    assert_eq!(
        output(&[
            "echo \"2 + 2 = \" + (2 + 2)",
            "echo 7 / 2",
            "echo 1 / 0",
            "echo \"a\" * 2",
            "echo !0",
            "echo ~5",
            "echo 1 << 4 >> 2",
            "echo [1, \"b\", true]",
        ]),
        vec!["2 + 2 = 4", "3.5", "Infinity", "NaN", "true", "-6", "4", "1,b,true"]
    );
}

#[test]
fn test_stack_set_then_echo() {
    assert_eq!(output(&["stack set x 5; echo $x"]), vec!["5"]);
}

#[test]
fn test_stack_get_as_subexpression() {
    let mut interpreter = session();
    interpreter.submit_line("stack set x 5");
    interpreter.submit_line("y = (stack get x)");
    interpreter.submit_line("z = (stack get missingKey)");

    assert_eq!(interpreter.store().get("y"), Value::from(5.0));
    assert!(!interpreter.store().contains("z"));
}

#[test]
fn test_stack_get_logs_outside_expressions() {
    assert_eq!(output(&["stack set x \"hi\"", "stack get $x"]), vec!["hi"]);
}

#[test]
fn test_flush_then_list() {
    assert_eq!(
        output(&["a = 1; b = 2", "stack flush", "stack list"]),
        vec![format!("name{}value", " ".repeat(12)), String::new()]
    );
}

#[test]
fn test_increment_forms() {
    let mut interpreter = session();
    interpreter.store_mut().set("n", Value::from(3.0));

    interpreter.submit_line("echo ++$n");
    assert_eq!(interpreter.store().get("n"), Value::from(4.0));

    interpreter.submit_line("echo $n++");
    assert_eq!(interpreter.store().get("n"), Value::from(5.0));

    assert_eq!(interpreter.logger().messages(), vec!["4", "4"]);
}

#[test]
fn test_string_counter_coerces() {
    assert_eq!(output(&["n = \"41\"", "n++", "echo $n"]), vec!["42"]);
}

#[test]
fn test_errors_are_logged_not_raised() {
    let mut interpreter = session();
    interpreter.submit_line("frobnicate");
    interpreter.submit_line("stack pop");
    interpreter.submit_line("echo \"still alive\"");

    let entries = interpreter.logger().entries();
    assert_eq!(entries[0].severity, Severity::Error);
    assert!(entries[0].message.contains("frobnicate"));
    assert_eq!(entries[1].severity, Severity::Error);
    assert!(entries[1]
        .message
        .contains("First argument must be one of: set, get, list, or flush"));
    assert_eq!(entries[2].message, "still alive");
}

#[test]
fn test_confirmation_flow() {
    let mut interpreter = session();
    interpreter.submit_line("yn");
    assert_eq!(interpreter.input_mode(), InputMode::Write);

    interpreter.submit_line("nope");
    assert_eq!(interpreter.input_mode(), InputMode::Write);

    interpreter.submit_line("y");
    assert_eq!(interpreter.input_mode(), InputMode::Command);

    let messages = interpreter.logger().messages();
    assert_eq!(messages.iter().filter(|m| **m == "user said yes").count(), 1);
    assert!(!messages.contains(&"user said no"));

    // the answer is not parsed as a command afterwards
    interpreter.submit_line("y");
    assert!(interpreter.logger().messages().last().unwrap().starts_with("ERR_UNKNOWN_COMMAND"));
}

#[test]
fn test_session_identity() {
    let mut interpreter = Interpreter::with_config(SessionConfig {
        user: "guest".to_string(),
        device: "kiosk".to_string(),
        ..SessionConfig::default()
    });
    assert_eq!(interpreter.prompt(), "guest@kiosk:~$ ");

    interpreter.submit_line("user root; cd ~/../..; cd etc");
    assert_eq!(interpreter.prompt(), "root@kiosk:/etc$ ");
    assert_eq!(interpreter.context().home(), "/home/root");
}
