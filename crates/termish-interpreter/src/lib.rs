//! Termish interpreter
//!
//! Owns one terminal session: the variable store, the user-visible log, the
//! session context and a pending confirmation, if any. A host feeds it whole
//! lines with [`Interpreter::submit_line`] and renders the log afterwards.

use std::collections::VecDeque;
use termish_ast::{Argument, Command, ShellError};

pub mod builtins;
pub mod confirm;
pub mod context;
pub mod evaluator;
pub mod logger;
pub mod store;
pub mod value;

pub use confirm::{Confirmation, InputMode, PendingConfirmation};
pub use context::{InterpreterContext, SessionConfig};
pub use logger::{Entry, Logger, Severity};
pub use store::VariableStore;
pub use value::Value;

/// Arguments handed to a handler for one execution
#[derive(Debug, Clone, Copy)]
pub struct ExecutionEvent<'a> {
    pub parameters: &'a [Argument],
    /// Output is returned to an enclosing expression instead of logged
    pub piping: bool,
}

/// What running a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    /// The command needs a yes/no answer before it can finish
    Confirm(Confirmation),
}

pub struct Interpreter {
    pub(crate) context: InterpreterContext,
    pub(crate) store: VariableStore,
    pub(crate) logger: Logger,
    pub(crate) pending: Option<PendingConfirmation>,
    pub(crate) call_depth: usize,
}

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            context: InterpreterContext::new(config),
            store: VariableStore::new(),
            logger: Logger::new(),
            pending: None,
            call_depth: 0,
        }
    }

    /// Handle one line of user input
    ///
    /// The line answers the pending confirmation if there is one, otherwise
    /// it is parsed and executed. Errors never escape: they are appended to
    /// the log with [`Severity::Error`].
    pub fn submit_line(&mut self, line: &str) {
        self.context.can_type = false;
        let result = match self.pending.take() {
            Some(pending) => self.answer_confirmation(pending, line),
            None => self.execute_line(line),
        };
        if let Err(error) = result {
            self.report(&error);
        }
        self.context.can_type = true;
    }

    /// Parse and run a line of commands
    ///
    /// Leading spaces are ignored and blank lines do nothing. When the echo
    /// flag is on the line is logged as `> line` first.
    ///
    /// # Errors
    ///
    /// Returns `ShellError` if the line does not parse or a command fails.
    /// Statements after the failing one are not run.
    pub fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        let line = line.trim_start_matches(' ');
        if line.trim().is_empty() {
            return Ok(());
        }
        if self.context.echo {
            self.logger.log(format!("> {line}"));
        }

        let mut parser = termish_parser::Parser::new(line)?;
        let parsed = parser.parse();
        for warning in parser.warnings() {
            self.logger.warn(warning.as_str());
        }
        self.run_commands(parsed?.into())
    }

    /// Run a line produced by a command rather than typed by the user
    pub(crate) fn run_synthetic(&mut self, line: &str) {
        if let Err(error) = self.execute_line(line) {
            self.report(&error);
        }
    }

    /// Execute commands in order, stopping at the first error. A command
    /// that asks for confirmation parks the rest of the queue with it.
    pub(crate) fn run_commands(
        &mut self,
        mut commands: VecDeque<Command>,
    ) -> Result<(), ShellError> {
        while let Some(command) = commands.pop_front() {
            match self.execute(&command, false)? {
                Outcome::Value(_) => {}
                Outcome::Confirm(confirmation) => {
                    return self.begin_confirmation(confirmation, commands);
                }
            }
        }
        Ok(())
    }

    /// Execute one command with a fresh [`ExecutionEvent`]
    ///
    /// # Errors
    ///
    /// Returns `ShellError` if the command's handler fails
    pub fn execute(&mut self, command: &Command, piping: bool) -> Result<Outcome, ShellError> {
        log::trace!("execute {} (piping: {piping})", command.name);
        let event = ExecutionEvent {
            parameters: &command.parameters,
            piping,
        };
        builtins::handler(command.kind)(self, &event)
    }

    /// Log the message of the day
    pub fn print_motd(&mut self) {
        let banner = self.context.motd.clone();
        self.logger.log(banner);
    }

    fn report(&mut self, error: &ShellError) {
        log::warn!("line rejected: {error}");
        self.logger.error(error.to_string());
    }

    #[must_use]
    pub const fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VariableStore {
        &mut self.store
    }

    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    #[must_use]
    pub const fn context(&self) -> &InterpreterContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut InterpreterContext {
        &mut self.context
    }

    #[must_use]
    pub const fn input_mode(&self) -> InputMode {
        self.context.input_mode
    }

    #[must_use]
    pub const fn is_awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    /// Prompt for the next line: the shell prompt, or `> ` while a
    /// confirmation is waiting for its answer
    #[must_use]
    pub fn prompt(&self) -> String {
        match self.context.input_mode {
            InputMode::Command => self.context.prompt(),
            InputMode::Write => "> ".to_string(),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
