//! Token definitions for Lilith.

use lilith_common::{Position, Span};
use std::fmt;

/// Text of the error token produced when input ends inside a string.
pub const UNTERMINATED_STRING: &str = "unterminated string";

/// A token with its kind, text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text of the token. Strings hold their unescaped contents and
    /// error tokens hold the error message.
    pub text: String,
    pub span: Span,
    /// Where the token starts.
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// True for `(` as opposed to `{`.
    pub fn is_paren(&self) -> bool {
        self.text == "(" || self.text == ")"
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(` or `{`.
    ListBegin,
    /// `)` or `}`.
    ListEnd,
    String,
    Long,
    Double,
    Symbol,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::ListBegin => "list begin",
            TokenKind::ListEnd => "list end",
            TokenKind::String => "string",
            TokenKind::Long => "integer",
            TokenKind::Double => "decimal",
            TokenKind::Symbol => "symbol",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}
