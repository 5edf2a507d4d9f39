//! Yes/no confirmation prompts
//!
//! A command that needs confirmation does not block. It hands back a
//! [`Confirmation`]; the interpreter logs the question, switches the input
//! mode to [`InputMode::Write`] and parks the rest of the line in a
//! [`PendingConfirmation`]. The next submitted line is the answer.

use crate::Interpreter;
use std::collections::VecDeque;
use termish_ast::{Command, ShellError};

/// What the next submitted line is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Lines are parsed as commands
    #[default]
    Command,
    /// Lines answer a pending confirmation
    Write,
}

const BAD_INPUT: &str = "value must be one of y or n!";

pub const LICENSE: &str = "MIT License

Copyright (c) 2024 bscit

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
";

/// Which continuation runs on `y` / `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Example,
    License,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub kind: ConfirmKind,
    pub question: &'static str,
}

impl Confirmation {
    #[must_use]
    pub const fn example() -> Self {
        Self {
            kind: ConfirmKind::Example,
            question: "example question",
        }
    }

    #[must_use]
    pub const fn license() -> Self {
        Self {
            kind: ConfirmKind::License,
            question: "u sure?",
        }
    }

    /// Lines run when the user answers `y`
    fn on_yes(&self) -> Vec<String> {
        match self.kind {
            ConfirmKind::Example => vec![echo_line("user said yes"), echo_line("yay!!!")],
            ConfirmKind::License => LICENSE.lines().map(echo_line).collect(),
        }
    }

    /// Lines run when the user answers `n`
    fn on_no(&self) -> Vec<String> {
        match self.kind {
            ConfirmKind::Example => vec![echo_line("user said no"), echo_line("man....")],
            ConfirmKind::License => Vec::new(),
        }
    }
}

/// A suspended line waiting for its yes/no answer
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub confirmation: Confirmation,
    /// Statements of the suspended line that still have to run
    pub remaining: VecDeque<Command>,
}

/// `echo "<text>"` with quotes and backslashes escaped
fn echo_line(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("echo \"{escaped}\"")
}

impl Interpreter {
    /// Log the question and wait for the next line
    pub(crate) fn begin_confirmation(
        &mut self,
        confirmation: Confirmation,
        remaining: VecDeque<Command>,
    ) -> Result<(), ShellError> {
        if self.pending.is_some() {
            return Err(ShellError::execution("a confirmation is already pending"));
        }
        self.logger.log(format!("{} [y/n]", confirmation.question));
        self.await_answer(PendingConfirmation {
            confirmation,
            remaining,
        });
        Ok(())
    }

    /// Resolve the pending confirmation with a line of raw input
    pub(crate) fn answer_confirmation(
        &mut self,
        pending: PendingConfirmation,
        input: &str,
    ) -> Result<(), ShellError> {
        if self.context.echo {
            self.logger.log(format!("> {input}"));
        }
        self.context.input_mode = InputMode::Command;
        self.context.echo = false;
        self.context.can_type = false;

        let lines = match input {
            "y" => pending.confirmation.on_yes(),
            "n" => pending.confirmation.on_no(),
            _ => {
                log::debug!("bad confirmation answer {input:?}");
                self.logger.log(BAD_INPUT);
                self.await_answer(pending);
                return Ok(());
            }
        };

        for line in &lines {
            self.run_synthetic(line);
        }
        self.context.echo = true;
        self.run_commands(pending.remaining)
    }

    fn await_answer(&mut self, pending: PendingConfirmation) {
        self.context.input_mode = InputMode::Write;
        self.context.echo = true;
        self.context.can_type = true;
        self.pending = Some(pending);
    }
}
