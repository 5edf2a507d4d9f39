//! String processing utilities for the Termish parser
//!
//! Quote removal for string tokens and the text of word-like tokens.

use termish_lexer::{Token, TokenKind};

/// Remove the surrounding double quotes of a string token and resolve
/// backslash escapes (`\"` becomes `"`, `\\` becomes `\`)
pub fn remove_quotes(text: &str) -> String {
    let inner = match text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) if text.len() >= 2 => inner,
        _ => return text.to_string(),
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(escaped) => result.push(escaped),
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// Convert a token to its string representation
///
/// Handles quote removal for string tokens and preserves other token text
pub fn token_to_string(token: &Token) -> String {
    match token.kind {
        TokenKind::String => remove_quotes(&token.text),
        _ => token.text.clone(),
    }
}
