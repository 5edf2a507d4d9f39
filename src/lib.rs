//! Termish: a small command-language interpreter for terminal emulators
//!
//! The workspace crates are re-exported here so that embedders depend on a
//! single package.

pub use termish_ast as ast;
pub use termish_interpreter as interpreter;
pub use termish_lexer as lexer;
pub use termish_parser as parser;

pub use termish_ast::{Command, CommandKind, ShellError};
pub use termish_interpreter::{Interpreter, SessionConfig};
