//! Handlers for the built-in commands
//!
//! The parser resolves every command name to a [`CommandKind`]; this module
//! binds each kind to the function that runs it. Handlers log through the
//! session log unless the event is in piping mode, in which case their
//! output only travels back as the returned value.

use crate::confirm::Confirmation;
use crate::value::Value;
use crate::{ExecutionEvent, Interpreter, Outcome};
use termish_ast::{Argument, CommandKind, Expression, ShellError};
use termish_parser::commands;

pub type Handler = fn(&mut Interpreter, &ExecutionEvent<'_>) -> Result<Outcome, ShellError>;

/// Lines the `test` command runs with echo switched off
const TEST_LINES: &[&str] = &[
    "echo \"these commands are synthetic user inputs!\"",
    "motd",
    "help",
    "echo \"2 + 2 = \" + (2 + 2)",
];

const HELP_FOOTER: &str = "Use help <command> to learn more about a specific command";

/// Column width never drops below this in `stack list`
const MIN_COLUMN: usize = 16;

#[must_use]
pub fn handler(kind: CommandKind) -> Handler {
    match kind {
        CommandKind::Help => help,
        CommandKind::Echo => echo,
        CommandKind::Clear => clear,
        CommandKind::User => user,
        CommandKind::Stack => stack,
        CommandKind::Motd => motd,
        CommandKind::Cd => cd,
        CommandKind::Test => test,
        CommandKind::Confirm => confirm,
        CommandKind::License => license,
        CommandKind::Assign => assign,
        CommandKind::Evaluate => evaluate,
    }
}

fn help(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    let text = match event.text(0) {
        None => format!(
            "List of all available commands:\n  {}\n\n{HELP_FOOTER}\n",
            commands::names().collect::<Vec<_>>().join("\n  ")
        ),
        Some(name) => match commands::lookup(name) {
            None => return Err(ShellError::unknown_command(name, 0)),
            Some(spec) => format!("{}\n", spec.help.unwrap_or("[no documentation]")),
        },
    };
    Ok(interpreter.emit(event, text))
}

fn echo(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    let value = interpreter.evaluate(event.expression(0)?)?;
    Ok(interpreter.emit(event, value))
}

fn clear(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    interpreter.logger.clear();
    if event.text(0).is_some() {
        interpreter.print_motd();
    }
    Ok(Outcome::Value(Value::empty()))
}

fn user(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    let name = event.text(0).unwrap_or_default();
    if name.is_empty() {
        return Err(ShellError::execution("First argument of user cannot be empty"));
    }
    if interpreter.context.user != name {
        interpreter.context.set_user(name);
    }
    Ok(Outcome::Value(Value::from(name)))
}

fn stack(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    match event.text(0) {
        Some("set") => {
            let name = event.required_text(1)?;
            let value = interpreter.evaluate(event.expression(2)?)?;
            interpreter.store.set(name, value.clone());
            Ok(Outcome::Value(value))
        }
        Some("get") => {
            let value = interpreter.store.get(event.required_text(1)?);
            Ok(interpreter.emit(event, value))
        }
        Some("list") if event.piping => {
            let pairs: Vec<String> = interpreter
                .store
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            Ok(Outcome::Value(Value::Str(pairs.join("&"))))
        }
        Some("list") => {
            for line in list_table(interpreter) {
                interpreter.logger.log(line);
            }
            Ok(Outcome::Value(Value::empty()))
        }
        Some("flush") => {
            interpreter.store.clear();
            Ok(Outcome::Value(Value::empty()))
        }
        _ => Err(ShellError::execution(
            "First argument must be one of: set, get, list, or flush",
        )),
    }
}

/// Header, one row per variable, and a trailing blank line
fn list_table(interpreter: &Interpreter) -> Vec<String> {
    let width = interpreter
        .store
        .iter()
        .map(|(name, _)| name.len() + 4)
        .fold(MIN_COLUMN, usize::max);

    let mut lines = vec![format!("name{}value", " ".repeat(width - 4))];
    lines.extend(
        interpreter
            .store
            .iter()
            .map(|(name, value)| format!("- {name}{}{value}", " ".repeat(width - name.len()))),
    );
    lines.push(String::new());
    lines
}

fn motd(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    let banner = interpreter.context.motd.clone();
    Ok(interpreter.emit(event, banner))
}

fn cd(interpreter: &mut Interpreter, event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    let cwd = interpreter.context.change_dir(event.text(0)).to_string();
    log::debug!("cwd is now {cwd}");
    Ok(Outcome::Value(Value::Str(cwd)))
}

fn test(interpreter: &mut Interpreter, _event: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    interpreter.context.echo = false;
    for line in TEST_LINES {
        interpreter.run_synthetic(line);
    }
    interpreter.context.echo = true;
    Ok(Outcome::Value(Value::empty()))
}

fn confirm(_: &mut Interpreter, _: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    Ok(Outcome::Confirm(Confirmation::example()))
}

fn license(_: &mut Interpreter, _: &ExecutionEvent<'_>) -> Result<Outcome, ShellError> {
    Ok(Outcome::Confirm(Confirmation::license()))
}

fn assign(
    interpreter: &mut Interpreter,
    event: &ExecutionEvent<'_>,
) -> Result<Outcome, ShellError> {
    let name = event.required_text(0)?;
    let value = interpreter.evaluate(event.expression(1)?)?;
    interpreter.store.set(name, value.clone());
    Ok(Outcome::Value(value))
}

fn evaluate(
    interpreter: &mut Interpreter,
    event: &ExecutionEvent<'_>,
) -> Result<Outcome, ShellError> {
    interpreter.evaluate(event.expression(0)?).map(Outcome::Value)
}

impl ExecutionEvent<'_> {
    fn text(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).and_then(Argument::as_text)
    }

    fn required_text(&self, index: usize) -> Result<&str, ShellError> {
        self.text(index)
            .ok_or_else(|| ShellError::execution(format!("Missing argument {}", index + 1)))
    }

    fn expression(&self, index: usize) -> Result<&Expression, ShellError> {
        self.parameters
            .get(index)
            .and_then(Argument::as_expression)
            .ok_or_else(|| {
                ShellError::execution(format!("Argument {} must be an expression", index + 1))
            })
    }
}

impl Interpreter {
    /// Log `output` unless piping, and hand it back as the command's value
    fn emit(&mut self, event: &ExecutionEvent<'_>, output: impl Into<Value>) -> Outcome {
        let value = output.into();
        if !event.piping {
            self.logger.log(value.to_string());
        }
        Outcome::Value(value)
    }
}
