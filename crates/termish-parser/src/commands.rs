//! Built-in command table
//!
//! Each built-in has a bespoke argument grammar. The table is declared once
//! as a static slice, in the order `help` lists commands, and indexed by name
//! on first use.

use crate::string_utils::token_to_string;
use crate::Parser;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use termish_ast::{Argument, CommandKind, ShellError};
use termish_lexer::TokenKind;

/// Parses the arguments following a command name
pub type ArgumentParser = fn(&mut Parser<'_>) -> Result<Vec<Argument>, ShellError>;

pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    /// One-line documentation shown by `help <name>`
    pub help: Option<&'static str>,
    pub parse_arguments: ArgumentParser,
}

pub static BUILTINS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        kind: CommandKind::Help,
        help: Some(
            "the ever helpful help command, helps you get some of that sweet help when you need it",
        ),
        parse_arguments: help_arguments,
    },
    CommandSpec {
        name: "echo",
        kind: CommandKind::Echo,
        help: Some("prints the value to the log"),
        parse_arguments: single_expression,
    },
    CommandSpec {
        name: "clear",
        kind: CommandKind::Clear,
        help: Some("clears the log, `clear -motd` prints the motd again afterwards"),
        parse_arguments: clear_arguments,
    },
    CommandSpec {
        name: "user",
        kind: CommandKind::User,
        help: Some("changes the username"),
        parse_arguments: user_arguments,
    },
    CommandSpec {
        name: "stack",
        kind: CommandKind::Stack,
        help: Some(
            "provides basic functionality that allows the user to read and write to the variable stack",
        ),
        parse_arguments: stack_arguments,
    },
    CommandSpec {
        name: "motd",
        kind: CommandKind::Motd,
        help: Some("print the motd"),
        parse_arguments: no_arguments,
    },
    CommandSpec {
        name: "cd",
        kind: CommandKind::Cd,
        help: Some("changes the working directory, `cd` alone goes home"),
        parse_arguments: cd_arguments,
    },
    CommandSpec {
        name: "test",
        kind: CommandKind::Test,
        help: Some("runs a few synthetic commands"),
        parse_arguments: no_arguments,
    },
    CommandSpec {
        name: "yn",
        kind: CommandKind::Confirm,
        help: Some("asks an example yes or no question"),
        parse_arguments: no_arguments,
    },
    CommandSpec {
        name: "maybe",
        kind: CommandKind::Confirm,
        help: None,
        parse_arguments: no_arguments,
    },
    CommandSpec {
        name: "license",
        kind: CommandKind::License,
        help: Some("prints the license, after asking nicely"),
        parse_arguments: no_arguments,
    },
];

static TABLE: Lazy<HashMap<&'static str, &'static CommandSpec>> =
    Lazy::new(|| BUILTINS.iter().map(|spec| (spec.name, spec)).collect());

/// Resolve a command name to its table entry
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    TABLE.get(name).copied()
}

/// Registered command names, in declaration order
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|spec| spec.name)
}

const STACK_VERB_ERROR: &str = "First argument must be one of: set, get, list, or flush";
const CLEAR_FLAGS: &[&str] = &["m", "motd"];

fn no_arguments(_parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    Ok(Vec::new())
}

fn single_expression(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    Ok(vec![Argument::Expression(parser.expression()?)])
}

/// `help [name]`
fn help_arguments(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    if parser.lookahead().kind != TokenKind::Word {
        return Ok(Vec::new());
    }
    let name = parser.eat(TokenKind::Word)?;
    if lookup(&name.text).is_none() {
        return Err(ShellError::unknown_command(name.text, name.span.start));
    }
    Ok(vec![Argument::Word(name.text)])
}

/// `clear [-flag]`
fn clear_arguments(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    let lookahead = parser.lookahead();
    let kind = lookahead.kind;
    let is_dash = (kind == TokenKind::AdditiveOperator && lookahead.text == "-")
        || (kind == TokenKind::UnaryOperator && lookahead.text == "--");
    if !is_dash {
        return Ok(Vec::new());
    }
    let dash = parser.eat(kind)?;
    let flag = parser.eat(TokenKind::Word)?;
    if !CLEAR_FLAGS.contains(&flag.text.as_str()) {
        return Err(ShellError::syntax(
            format!("Unknown flag `{}{}` for clear", dash.text, flag.text),
            dash.span.start,
        ));
    }
    Ok(vec![Argument::Flag(flag.text)])
}

/// `user "name"` or `user name`
fn user_arguments(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    let token = parser.eat_any(&[TokenKind::String, TokenKind::Word])?;
    Ok(vec![Argument::Text(token_to_string(&token))])
}

/// `stack set <name> <expr>`, `stack get <name>`, `stack list`, `stack flush`
fn stack_arguments(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    let verb = parser.eat(TokenKind::Word)?;
    match verb.text.as_str() {
        "set" => {
            let name = variable_name(parser)?;
            let value = parser.expression()?;
            Ok(vec![
                Argument::Word(verb.text),
                Argument::Word(name),
                Argument::Expression(value),
            ])
        }
        "get" => {
            let name = variable_name(parser)?;
            Ok(vec![Argument::Word(verb.text), Argument::Word(name)])
        }
        "list" | "flush" => Ok(vec![Argument::Word(verb.text)]),
        _ => Err(ShellError::syntax(STACK_VERB_ERROR, verb.span.start)),
    }
}

/// `name` or `$name`
fn variable_name(parser: &mut Parser<'_>) -> Result<String, ShellError> {
    if parser.lookahead().kind == TokenKind::Dollar {
        parser.eat(TokenKind::Dollar)?;
    }
    Ok(parser.eat(TokenKind::Word)?.text)
}

/// `cd [path]`; adjacent path-like tokens are glued back together so that
/// `docs/../src` reads as one path
fn cd_arguments(parser: &mut Parser<'_>) -> Result<Vec<Argument>, ShellError> {
    if parser.lookahead().kind.is_terminator() {
        return Ok(Vec::new());
    }

    let kind = parser.lookahead().kind;
    let is_tilde = kind == TokenKind::UnaryOperator && parser.lookahead().text == "~";
    let mut path = match kind {
        TokenKind::String => {
            let token = parser.eat(TokenKind::String)?;
            return Ok(vec![Argument::Path(token_to_string(&token))]);
        }
        TokenKind::UnaryOperator if is_tilde => parser.eat(TokenKind::UnaryOperator)?.text,
        _ => {
            parser
                .eat_any(&[TokenKind::Path, TokenKind::Word, TokenKind::Dot, TokenKind::Number])?
                .text
        }
    };

    while parser.lookahead_is_adjacent() && is_path_piece(parser) {
        let kind = parser.lookahead().kind;
        path.push_str(&parser.eat(kind)?.text);
    }

    Ok(vec![Argument::Path(path)])
}

fn is_path_piece(parser: &Parser<'_>) -> bool {
    let token = parser.lookahead();
    match token.kind {
        TokenKind::Path | TokenKind::Word | TokenKind::Dot | TokenKind::Number => true,
        TokenKind::MultiplicativeOperator => token.text == "/",
        TokenKind::AdditiveOperator => token.text == "-",
        _ => false,
    }
}
