//! Lexical analysis for Termish
//!
//! Tokens are recognised with logos, one at a time, anchored at the lexer's
//! current position. The parser pulls tokens on demand; the end of a line is
//! an explicit [`TokenKind::EoL`] token rather than exhaustion.

use logos::Logos;
use std::fmt;
use termish_ast::{ShellError, Span};

/// Token kinds. Where two patterns can match the same text, logos picks the
/// longest match and then the higher priority; keyword tokens beat `Word`.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Double-quoted string, backslash escapes allowed, closing quote required
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token("=")]
    Equals,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("?")]
    Question,

    #[token("$")]
    Dollar,

    #[token("+")]
    #[token("-")]
    AdditiveOperator,

    #[token("*")]
    #[token("/")]
    MultiplicativeOperator,

    #[token("|")]
    #[token("&")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    BitwiseOperator,

    /// `++` and `--`, plus the prefix-only `~` and `!`. A lone `-` lexes as
    /// an additive operator and is turned into negation by the parser.
    #[token("++")]
    #[token("--")]
    #[token("~")]
    #[token("!")]
    UnaryOperator,

    /// Relative or absolute path such as `..`, `./docs`, `~/src` or `/etc`
    #[regex(r"~/[a-zA-Z0-9_.~/\-]*")]
    #[regex(r"\.\.(/[a-zA-Z0-9_.~/\-]*)?")]
    #[regex(r"\./[a-zA-Z0-9_.~/\-]*")]
    #[regex(r"/[a-zA-Z_.~][a-zA-Z0-9_.~/\-]*")]
    Path,

    /// Non-negative integer or decimal; the sign is a separate token
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z_0-9]*")]
    Word,

    #[token("true")]
    #[token("false")]
    Boolean,

    /// Trailing whitespace up to the end of the line
    EoL,
}

impl TokenKind {
    /// Human readable name used in parser diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Equals => "=",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Question => "?",
            Self::Dollar => "$",
            Self::AdditiveOperator => "additiveOperator",
            Self::MultiplicativeOperator => "multiplicativeOperator",
            Self::BitwiseOperator => "bitwiseOperator",
            Self::UnaryOperator => "unaryOperator",
            Self::Path => "path",
            Self::Number => "number",
            Self::Word => "word",
            Self::Boolean => "boolean",
            Self::EoL => "EoL",
        }
    }

    /// Whether this kind ends a statement
    #[must_use]
    pub const fn is_terminator(self) -> bool {
        matches!(self, Self::EoL | Self::Semicolon)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}>", self.kind, self.text)
    }
}

/// Cursor into the source line. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    pub fn advance(&mut self, n: usize) {
        self.offset += n;
    }
}

/// Pull-based lexer over a single source line
pub struct Lexer<'input> {
    input: &'input str,
    position: Position,
}

impl<'input> Lexer<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        let mut lexer = Self {
            input,
            position: Position::default(),
        };
        lexer.skip_spaces();
        lexer
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn input(&self) -> &'input str {
        self.input
    }

    /// Recognise the token at the current position without consuming it
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Lex` if no token pattern matches at the cursor,
    /// including an unterminated string literal.
    pub fn peek(&self) -> Result<Token, ShellError> {
        let start = self.position.offset;
        let rest = &self.input[start..];

        if rest.trim().is_empty() {
            return Ok(Token {
                kind: TokenKind::EoL,
                text: rest.to_string(),
                span: Span::new(start, self.input.len()),
            });
        }

        let mut lexer = TokenKind::lexer(rest);
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                Ok(Token {
                    kind,
                    text: lexer.slice().to_string(),
                    span: Span::new(start + span.start, start + span.end),
                })
            }
            Some(Err(())) | None => {
                let symbol = rest.chars().next().unwrap_or(' ');
                Err(ShellError::lex(format!("Invalid symbol `{symbol}`"), start))
            }
        }
    }

    /// Consume the token at the current position, then skip following spaces
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Lex` under the same conditions as [`Lexer::peek`].
    pub fn next_token(&mut self) -> Result<Token, ShellError> {
        let token = self.peek()?;
        self.position.advance(token.text.len());
        self.skip_spaces();
        log::trace!("token {token}");
        Ok(token)
    }

    /// Tokenize the rest of the line, up to and including the `EoL` token
    ///
    /// # Errors
    ///
    /// Returns the first lexical error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ShellError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eol = token.kind == TokenKind::EoL;
            tokens.push(token);
            if is_eol {
                break;
            }
        }
        Ok(tokens)
    }

    fn skip_spaces(&mut self) {
        let skipped = self.input[self.position.offset..]
            .bytes()
            .take_while(|byte| *byte == b' ')
            .count();
        self.position.advance(skipped);
    }
}
