//! Abstract Syntax Tree definitions for Termish
//!
//! Commands and expressions keep the byte span of the source they came from
//! so that errors raised at execution time can still point into the line.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Binary operators, grouped by precedence level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    BitOr,
    BitAnd,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOperator {
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "|" => Self::BitOr,
            "&" => Self::BitAnd,
            "^" => Self::BitXor,
            "<<" => Self::ShiftLeft,
            ">>" => Self::ShiftRight,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators. `Increment`/`Decrement` write back to the variable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    BitNot,
    Not,
    Increment,
    Decrement,
}

impl UnaryOperator {
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "-" => Self::Negate,
            "~" => Self::BitNot,
            "!" => Self::Not,
            "++" => Self::Increment,
            "--" => Self::Decrement,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::BitNot => "~",
            Self::Not => "!",
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// Whether the operator mutates the variable it is applied to
    #[must_use]
    pub const fn is_step(self) -> bool {
        matches!(self, Self::Increment | Self::Decrement)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression tree produced by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    String(String),
    /// A bare word in value position evaluates to its own text
    Word(String),
    Boolean(bool),
    Variable(String),
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
        prefix: bool,
    },
    /// A nested command whose result feeds the enclosing expression
    Call(Box<Command>),
    Array(Vec<Expression>),
}

impl Expression {
    #[must_use]
    pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn unary(operator: UnaryOperator, operand: Self, prefix: bool) -> Self {
        Self::Unary {
            operator,
            operand: Box::new(operand),
            prefix,
        }
    }
}

/// Built-in command variants. The parser resolves a command name to one of
/// these once; the interpreter binds each variant to its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Echo,
    Clear,
    User,
    Stack,
    Motd,
    Cd,
    Test,
    /// `yn` / `maybe` yes-or-no demo
    Confirm,
    License,
    /// `name = expr` and compound assignment forms
    Assign,
    /// Bare step expressions such as `$n++` or `--$n`
    Evaluate,
}

/// A single parsed argument of a command
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Expression(Expression),
    Word(String),
    /// Quoted string with the quotes removed
    Text(String),
    Path(String),
    /// `-flag` style option, stored without the dash
    Flag(String),
}

impl Argument {
    /// Text of a word-like argument
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Word(text) | Self::Text(text) | Self::Path(text) | Self::Flag(text) => {
                Some(text)
            }
            Self::Expression(_) => None,
        }
    }

    #[must_use]
    pub const fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

/// A parsed, not yet executed command
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub kind: CommandKind,
    pub parameters: Vec<Argument>,
    pub span: Span,
}

impl Command {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: CommandKind,
        parameters: Vec<Argument>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters,
            span,
        }
    }
}

/// Error types with location information
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("ERR_LEX: {message} at position {offset}")]
    Lex { message: String, offset: usize },

    #[error("ERR_SYNTAX: {message} at position {offset}")]
    Syntax { message: String, offset: usize },

    #[error("ERR_UNKNOWN_COMMAND: Unknown command: {name}\ntry using the help command to get help")]
    UnknownCommand { name: String, offset: usize },

    #[error("ERR_EXEC: {message}")]
    Execution { message: String },
}

impl ShellError {
    #[must_use]
    pub fn lex(message: impl Into<String>, offset: usize) -> Self {
        Self::Lex {
            message: message.into(),
            offset,
        }
    }

    #[must_use]
    pub fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    #[must_use]
    pub fn unknown_command(name: impl Into<String>, offset: usize) -> Self {
        Self::UnknownCommand {
            name: name.into(),
            offset,
        }
    }

    #[must_use]
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Lex { offset, .. }
            | Self::Syntax { offset, .. }
            | Self::UnknownCommand { offset, .. } => Some(*offset),
            Self::Execution { .. } => None,
        }
    }
}
