//! Recursive-descent parser for Termish command lines
//!
//! Drives the lexer one token of lookahead at a time and turns a line of
//! `;`-separated statements into [`Command`] values. Expressions are parsed
//! with the usual precedence climbing: additive, multiplicative, bitwise,
//! then primaries.

use termish_ast::{
    Argument, BinaryOperator, Command, CommandKind, Expression, ShellError, Span, UnaryOperator,
};
use termish_lexer::{Lexer, Token, TokenKind};

// Built-in command table and per-command argument grammars
pub mod commands;

// String processing utilities
pub mod string_utils;

pub use commands::{CommandSpec, BUILTINS};

/// Depth budget for one line: each paren, unary operator, array, nested
/// command and chained binary operand spends one level
pub const MAX_DEPTH: usize = 256;

const FILESYSTEM_WARNING: &str = "The filesystem hasn't been implemented yet";

/// Parse a line into the commands it contains
///
/// # Errors
///
/// Returns `ShellError` on the first lexical or syntax error in the line.
pub fn parse(line: &str) -> Result<Vec<Command>, ShellError> {
    Parser::new(line)?.parse()
}

pub struct Parser<'input> {
    lexer: Lexer<'input>,
    lookahead: Token,
    last_end: usize,
    depth: usize,
    warnings: Vec<String>,
}

impl<'input> Parser<'input> {
    /// Create a new parser for the given line. Leading spaces are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ShellError` if the first token cannot be lexed
    pub fn new(input: &'input str) -> Result<Self, ShellError> {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token()?;
        Ok(Self {
            last_end: lookahead.span.start,
            lexer,
            lookahead,
            depth: 0,
            warnings: Vec::new(),
        })
    }

    /// Parse the whole line into a list of commands
    ///
    /// # Errors
    ///
    /// Returns `ShellError` if there are lexical or syntax errors in the line;
    /// no partial result is produced.
    pub fn parse(&mut self) -> Result<Vec<Command>, ShellError> {
        let mut commands = vec![self.statement()?];
        self.expect_terminator()?;

        while self.lookahead.kind == TokenKind::Semicolon {
            self.eat(TokenKind::Semicolon)?;
            if self.lookahead.kind == TokenKind::Path {
                let path = self.eat(TokenKind::Path)?;
                log::warn!("ignoring path statement {}", path.text);
                self.warnings.push(FILESYSTEM_WARNING.to_string());
            } else {
                commands.push(self.statement()?);
            }
            self.expect_terminator()?;
        }

        self.eat(TokenKind::EoL)?;
        log::debug!(
            "parsed {} command(s) from {:?}",
            commands.len(),
            self.lexer.input()
        );
        Ok(commands)
    }

    /// Warnings collected while parsing, for the caller to surface
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The current lookahead token
    #[must_use]
    pub const fn lookahead(&self) -> &Token {
        &self.lookahead
    }

    fn statement(&mut self) -> Result<Command, ShellError> {
        match self.lookahead.kind {
            TokenKind::Word => {
                let name = self.eat(TokenKind::Word)?;
                if let Some(spec) = commands::lookup(&name.text) {
                    return self.command_body(spec, name);
                }
                self.assignment(name)
            }
            TokenKind::Dollar => {
                self.eat(TokenKind::Dollar)?;
                let name = self.eat(TokenKind::Word)?;
                self.assignment(name)
            }
            TokenKind::UnaryOperator if self.lookahead_is_step() => {
                let start = self.lookahead.offset();
                let operand = self.unary()?;
                Ok(Command::new(
                    step_target(&operand),
                    CommandKind::Evaluate,
                    vec![Argument::Expression(operand)],
                    Span::new(start, self.last_end),
                ))
            }
            TokenKind::EoL | TokenKind::Semicolon => Err(self.unexpected_end()),
            _ => Err(ShellError::unknown_command(
                self.lookahead.text.clone(),
                self.lookahead.offset(),
            )),
        }
    }

    /// Parse the arguments of a registered command whose name was just eaten
    fn command_body(&mut self, spec: &CommandSpec, name: Token) -> Result<Command, ShellError> {
        self.enter()?;
        let parameters = (spec.parse_arguments)(self)?;
        self.leave();
        Ok(Command::new(
            name.text,
            spec.kind,
            parameters,
            Span::new(name.span.start, self.last_end),
        ))
    }

    /// `name = expr`, `name++`, `name--` or `name <op>= expr`
    fn assignment(&mut self, name: Token) -> Result<Command, ShellError> {
        let start = name.span.start;
        let variable = Expression::Variable(name.text.clone());

        match self.lookahead.kind {
            TokenKind::Equals => {
                self.eat(TokenKind::Equals)?;
                let value = if self.lookahead.kind.is_terminator() {
                    Expression::String(String::new())
                } else {
                    self.expression()?
                };
                Ok(self.assign_command(name, value, start))
            }
            TokenKind::UnaryOperator if self.lookahead_is_step() => {
                let operator = self.unary_operator()?;
                if !self.lookahead.kind.is_terminator() {
                    return Err(ShellError::unknown_command(name.text, start));
                }
                Ok(Command::new(
                    name.text,
                    CommandKind::Evaluate,
                    vec![Argument::Expression(Expression::unary(operator, variable, false))],
                    Span::new(start, self.last_end),
                ))
            }
            TokenKind::AdditiveOperator
            | TokenKind::MultiplicativeOperator
            | TokenKind::BitwiseOperator => {
                let operator = self.binary_operator()?;
                if self.lookahead.kind != TokenKind::Equals {
                    return Err(ShellError::unknown_command(name.text, start));
                }
                self.eat(TokenKind::Equals)?;
                let right = self.expression()?;
                let value = Expression::binary(operator, variable, right);
                Ok(self.assign_command(name, value, start))
            }
            _ => Err(ShellError::unknown_command(name.text, start)),
        }
    }

    fn assign_command(&self, name: Token, value: Expression, start: usize) -> Command {
        Command::new(
            name.text.clone(),
            CommandKind::Assign,
            vec![Argument::Word(name.text), Argument::Expression(value)],
            Span::new(start, self.last_end),
        )
    }

    /// Parse an expression
    ///
    /// # Errors
    ///
    /// Returns `ShellError` if the tokens do not form an expression
    pub fn expression(&mut self) -> Result<Expression, ShellError> {
        self.additive()
    }

    fn additive(&mut self) -> Result<Expression, ShellError> {
        self.binary_level(TokenKind::AdditiveOperator, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Result<Expression, ShellError> {
        self.binary_level(TokenKind::MultiplicativeOperator, Self::bitwise)
    }

    fn bitwise(&mut self) -> Result<Expression, ShellError> {
        self.binary_level(TokenKind::BitwiseOperator, Self::primary)
    }

    /// Left-associative chain of `operand (op operand)*` at one precedence level
    ///
    /// Every appended operand deepens the tree by one, so it counts against
    /// the depth budget until the chain ends.
    fn binary_level(
        &mut self,
        kind: TokenKind,
        operand: fn(&mut Self) -> Result<Expression, ShellError>,
    ) -> Result<Expression, ShellError> {
        let mut left = operand(self)?;
        let mut chained = 0;
        while self.lookahead.kind == kind {
            let operator = self.binary_operator()?;
            self.enter()?;
            chained += 1;
            let right = operand(self)?;
            left = Expression::binary(operator, left, right);
        }
        self.depth -= chained;
        Ok(left)
    }

    fn primary(&mut self) -> Result<Expression, ShellError> {
        if self.lookahead.kind == TokenKind::LeftParen {
            self.eat(TokenKind::LeftParen)?;
            self.enter()?;
            let expression = self.expression()?;
            self.leave();
            self.eat(TokenKind::RightParen)?;
            return Ok(expression);
        }
        self.unary()
    }

    fn unary(&mut self) -> Result<Expression, ShellError> {
        match self.lookahead.kind {
            TokenKind::UnaryOperator => {
                let operator = self.unary_operator()?;
                self.enter()?;
                let operand = if operator.is_step() {
                    self.variable()?
                } else {
                    self.primary()?
                };
                self.leave();
                Ok(Expression::unary(operator, operand, true))
            }
            TokenKind::AdditiveOperator if self.lookahead.text == "-" => {
                self.eat(TokenKind::AdditiveOperator)?;
                self.enter()?;
                let operand = self.primary()?;
                self.leave();
                Ok(Expression::unary(UnaryOperator::Negate, operand, true))
            }
            TokenKind::Dollar => {
                let variable = self.variable()?;
                if self.lookahead.kind == TokenKind::UnaryOperator && self.lookahead_is_step() {
                    let operator = self.unary_operator()?;
                    return Ok(Expression::unary(operator, variable, false));
                }
                Ok(variable)
            }
            TokenKind::LeftBracket => self.array(),
            TokenKind::Word if commands::lookup(&self.lookahead.text).is_some() => {
                let name = self.eat(TokenKind::Word)?;
                let spec = commands::lookup(&name.text)
                    .ok_or_else(|| ShellError::unknown_command(name.text.clone(), name.offset()))?;
                let command = self.command_body(spec, name)?;
                Ok(Expression::Call(Box::new(command)))
            }
            _ => self.literal(),
        }
    }

    fn literal(&mut self) -> Result<Expression, ShellError> {
        match self.lookahead.kind {
            TokenKind::Dollar => self.variable(),
            TokenKind::Number => {
                let token = self.eat(TokenKind::Number)?;
                let value = token.text.parse::<f64>().map_err(|_| {
                    ShellError::syntax(format!("Invalid number `{}`", token.text), token.offset())
                })?;
                Ok(Expression::Number(value))
            }
            TokenKind::String => {
                let token = self.eat(TokenKind::String)?;
                Ok(Expression::String(string_utils::token_to_string(&token)))
            }
            TokenKind::Word => Ok(Expression::Word(self.eat(TokenKind::Word)?.text)),
            TokenKind::Boolean => {
                let token = self.eat(TokenKind::Boolean)?;
                Ok(Expression::Boolean(token.text == "true"))
            }
            TokenKind::EoL | TokenKind::Semicolon => Err(self.unexpected_end()),
            _ => Err(ShellError::syntax(
                format!(
                    "Unexpected {} `{}`, expected variable, string, or word",
                    self.lookahead.kind, self.lookahead.text
                ),
                self.lookahead.offset(),
            )),
        }
    }

    /// `$name` or `$0`
    fn variable(&mut self) -> Result<Expression, ShellError> {
        self.eat(TokenKind::Dollar)?;
        let token = self.eat_any(&[TokenKind::Word, TokenKind::Number, TokenKind::Boolean])?;
        Ok(Expression::Variable(token.text))
    }

    /// `[a, b, ...]`
    fn array(&mut self) -> Result<Expression, ShellError> {
        self.eat(TokenKind::LeftBracket)?;
        self.enter()?;
        let mut elements = Vec::new();
        while self.lookahead.kind != TokenKind::RightBracket {
            elements.push(self.expression()?);
            if self.lookahead.kind != TokenKind::RightBracket {
                self.eat(TokenKind::Comma)?;
            }
        }
        self.leave();
        self.eat(TokenKind::RightBracket)?;
        Ok(Expression::Array(elements))
    }

    fn binary_operator(&mut self) -> Result<BinaryOperator, ShellError> {
        let token = self.eat(self.lookahead.kind)?;
        BinaryOperator::from_symbol(&token.text).ok_or_else(|| {
            ShellError::syntax(format!("Unknown operator `{}`", token.text), token.offset())
        })
    }

    fn unary_operator(&mut self) -> Result<UnaryOperator, ShellError> {
        let token = self.eat(TokenKind::UnaryOperator)?;
        UnaryOperator::from_symbol(&token.text).ok_or_else(|| {
            ShellError::syntax(format!("Unknown operator `{}`", token.text), token.offset())
        })
    }

    fn lookahead_is_step(&self) -> bool {
        self.lookahead.kind == TokenKind::UnaryOperator
            && matches!(self.lookahead.text.as_str(), "++" | "--")
    }

    /// Consume the lookahead if it has the expected kind
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming the expected kind, or "Unexpected end of
    /// input" if the line ended first.
    pub fn eat(&mut self, kind: TokenKind) -> Result<Token, ShellError> {
        self.eat_any(&[kind])
    }

    /// Consume the lookahead if it has any of the expected kinds
    ///
    /// # Errors
    ///
    /// Same as [`Parser::eat`].
    pub fn eat_any(&mut self, kinds: &[TokenKind]) -> Result<Token, ShellError> {
        if !kinds.contains(&self.lookahead.kind) {
            if self.lookahead.kind.is_terminator() {
                return Err(self.unexpected_end());
            }
            let expected = kinds
                .iter()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(" | ");
            return Err(ShellError::syntax(
                format!(
                    "Unexpected {} `{}`, expected {expected}",
                    self.lookahead.kind, self.lookahead.text
                ),
                self.lookahead.offset(),
            ));
        }

        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.lookahead, next);
        self.last_end = token.span.end;
        Ok(token)
    }

    /// Whether the lookahead starts right where the previous token ended
    #[must_use]
    pub fn lookahead_is_adjacent(&self) -> bool {
        self.lookahead.span.start == self.last_end
    }

    fn expect_terminator(&self) -> Result<(), ShellError> {
        if self.lookahead.kind.is_terminator() {
            Ok(())
        } else {
            Err(ShellError::syntax(
                format!(
                    "Expected end of input, got {} `{}`",
                    self.lookahead.kind, self.lookahead.text
                ),
                self.lookahead.offset(),
            ))
        }
    }

    fn unexpected_end(&self) -> ShellError {
        ShellError::syntax("Unexpected end of input", self.lookahead.offset())
    }

    fn enter(&mut self) -> Result<(), ShellError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ShellError::syntax(
                "Expression is nested too deeply",
                self.lookahead.offset(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

fn step_target(expression: &Expression) -> String {
    match expression {
        Expression::Unary { operand, .. } => match operand.as_ref() {
            Expression::Variable(name) => name.clone(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}
