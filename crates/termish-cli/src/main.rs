//! Termish CLI
//!
//! Command-line front end for the Termish interpreter: run a line with `-c`,
//! a script file line by line, or an interactive session.

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use std::process;
use termish_interpreter::{Interpreter, SessionConfig, Severity};

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("termish: {e:#}");
            process::exit(1);
        }
    }
}

fn cli() -> Command {
    Command::new("termish")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Termish command-language interpreter")
        .arg(
            Arg::new("command")
                .short('c')
                .long("command")
                .value_name("STRING")
                .help("Execute command string")
                .num_args(1),
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Script file to execute, one line per command line")
                .index(1),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .value_name("NAME")
                .help("Session user name"),
        )
        .arg(
            Arg::new("device")
                .long("device")
                .value_name("NAME")
                .help("Device name shown in the prompt"),
        )
        .arg(
            Arg::new("no-motd")
                .long("no-motd")
                .action(ArgAction::SetTrue)
                .help("Do not print the banner when an interactive session starts"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log interpreter diagnostics to stderr"),
        )
}

fn config_from(matches: &ArgMatches) -> SessionConfig {
    let mut config = SessionConfig::default();
    if let Some(user) = matches.get_one::<String>("user") {
        config.user.clone_from(user);
    }
    if let Some(device) = matches.get_one::<String>("device") {
        config.device.clone_from(device);
    }
    config
}

fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    let session = Session::new(config_from(matches));

    if let Some(command_str) = matches.get_one::<String>("command") {
        return execute_string(session, command_str);
    }
    if let Some(file_path) = matches.get_one::<String>("file") {
        return execute_file(session, file_path);
    }
    repl(session, !matches.get_flag("no-motd"))
}

/// An interpreter plus the part of its log already written out
struct Session {
    interpreter: Interpreter,
    cursor: usize,
    epoch: usize,
    saw_error: bool,
}

impl Session {
    fn new(config: SessionConfig) -> Self {
        Self {
            interpreter: Interpreter::with_config(config),
            cursor: 0,
            epoch: 0,
            saw_error: false,
        }
    }

    fn submit(&mut self, line: &str) {
        self.interpreter.submit_line(line);
    }

    /// Write log entries that appeared since the last flush. Errors and
    /// warnings go to `err`, everything else to `out`.
    fn flush(&mut self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        let logger = self.interpreter.logger();
        if logger.epoch() != self.epoch {
            self.epoch = logger.epoch();
            self.cursor = 0;
        }
        for entry in logger.since(self.cursor) {
            match entry.severity {
                Severity::Info => writeln!(out, "{}", entry.message)?,
                Severity::Warning => writeln!(err, "warning: {}", entry.message)?,
                Severity::Error => {
                    self.saw_error = true;
                    writeln!(err, "{}", entry.message)?;
                }
            }
        }
        self.cursor = logger.len();
        Ok(())
    }

    fn exit_code(&self) -> i32 {
        i32::from(self.saw_error)
    }
}

/// Run every line of `source` without echoing the lines themselves
fn run_source(
    session: &mut Session,
    source: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    for line in source.lines() {
        if !session.interpreter.is_awaiting_confirmation() {
            session.interpreter.context_mut().echo = false;
        }
        session.submit(line);
        session.flush(out, err)?;
    }
    Ok(())
}

fn execute_string(mut session: Session, command_str: &str) -> anyhow::Result<i32> {
    run_source(&mut session, command_str, &mut io::stdout(), &mut io::stderr())?;
    Ok(session.exit_code())
}

fn execute_file(mut session: Session, file_path: &str) -> anyhow::Result<i32> {
    let content =
        std::fs::read_to_string(file_path).with_context(|| format!("cannot read {file_path}"))?;
    log::debug!("running {file_path} ({} lines)", content.lines().count());
    run_source(&mut session, &content, &mut io::stdout(), &mut io::stderr())?;
    Ok(session.exit_code())
}

fn repl(mut session: Session, motd: bool) -> anyhow::Result<i32> {
    let mut editor = DefaultEditor::new()?;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if motd {
        session.interpreter.print_motd();
    }
    session.flush(&mut stdout, &mut stderr)?;

    loop {
        let prompt = session.interpreter.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                // the editor already shows the typed line
                session.interpreter.context_mut().echo = false;
                session.submit(&line);
                session.flush(&mut stdout, &mut stderr)?;
            }
            Err(ReadlineError::Interrupted) => {
                log::debug!("interrupted, line discarded");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(session.exit_code())
}
