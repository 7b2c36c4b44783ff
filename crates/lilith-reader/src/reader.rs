//! Recursive reader over the token stream.

use lilith_common::{Position, Span};
use lilith_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use lilith_eval::Value;
use lilith_lexer::{Token, TokenKind, Tokenizer, UNTERMINATED_STRING};
use thiserror::Error;

/// What went wrong while reading.
/// 读取失败的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    UnterminatedString,
    UnexpectedCharacter,
    InvalidNumber,
    /// A closing bracket that does not match the open list, or one with no
    /// list open at all.
    UnexpectedClose,
    MissingClose,
}

impl ReadErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ReadErrorKind::UnterminatedString => ErrorCode::UnterminatedString,
            ReadErrorKind::UnexpectedCharacter => ErrorCode::UnexpectedCharacter,
            ReadErrorKind::InvalidNumber => ErrorCode::InvalidNumber,
            ReadErrorKind::UnexpectedClose => ErrorCode::UnexpectedClose,
            ReadErrorKind::MissingClose => ErrorCode::MissingClose,
        }
    }
}

/// A failure to read source text.
/// 读取源代码失败。
#[derive(Debug, Clone, PartialEq, Error)]
#[error("at {position} - {message}")]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub message: String,
    pub position: Position,
    pub span: Span,
}

impl ReadError {
    fn new(kind: ReadErrorKind, message: impl Into<String>, position: Position, span: Span) -> Self {
        let error = Self {
            kind,
            message: message.into(),
            position,
            span,
        };
        tracing::debug!(kind = ?error.kind, at = %error.position, "read error: {}", error.message);
        error
    }

    /// Convert into a diagnostic for rendering against the source.
    /// 转换为可针对源码渲染的诊断信息。
    pub fn to_diagnostic(&self) -> Diagnostic {
        let stage = match self.kind {
            ReadErrorKind::UnterminatedString | ReadErrorKind::UnexpectedCharacter => {
                DiagnosticKind::Tokenizer
            }
            _ => DiagnosticKind::Reader,
        };
        let label = match self.kind {
            ReadErrorKind::MissingClose => "list opened here is never closed",
            ReadErrorKind::UnexpectedClose => "unexpected closing bracket",
            ReadErrorKind::UnterminatedString => "string starts here",
            ReadErrorKind::InvalidNumber => "cannot be read as a number",
            ReadErrorKind::UnexpectedCharacter => "unexpected character in this token",
        };
        Diagnostic::error(stage, self.span, self.message.clone())
            .with_code(self.kind.code())
            .at(self.position)
            .with_label(Label::new(self.span, label))
    }
}

impl From<ReadError> for Value {
    fn from(error: ReadError) -> Self {
        Value::Error(error.to_string())
    }
}

/// Reads top-level expressions one at a time.
/// 逐个读取顶层表达式。
pub struct Reader<'src> {
    tokens: Tokenizer<'src>,
}

impl<'src> Reader<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: Tokenizer::new(source),
        }
    }

    /// Read the next top-level expression, or `None` at end of input.
    /// 读取下一个顶层表达式，输入结束时返回 `None`。
    pub fn read_next(&mut self) -> Option<Result<Value, ReadError>> {
        let token = self.tokens.next_token()?;
        Some(self.read_token(token))
    }

    fn read_token(&mut self, token: Token) -> Result<Value, ReadError> {
        match token.kind {
            TokenKind::ListBegin => self.read_list(&token),
            TokenKind::ListEnd => Err(unexpected_close(&token)),
            _ => read_atom(token),
        }
    }

    fn read_list(&mut self, open: &Token) -> Result<Value, ReadError> {
        let paren = open.is_paren();
        let mut items = Vec::new();

        while let Some(token) = self.tokens.next_token() {
            if token.kind == TokenKind::ListEnd {
                if token.is_paren() != paren {
                    return Err(unexpected_close(&token));
                }
                return Ok(if paren {
                    Value::SExpr(items)
                } else {
                    Value::QExpr(items)
                });
            }
            items.push(self.read_token(token)?);
        }

        Err(ReadError::new(
            ReadErrorKind::MissingClose,
            "missing close bracket",
            self.tokens.position(),
            Span::new(open.span.start, self.tokens.offset()),
        ))
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<Value, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}

fn unexpected_close(token: &Token) -> ReadError {
    ReadError::new(
        ReadErrorKind::UnexpectedClose,
        format!("unexpected '{}'", token.text),
        token.position,
        token.span,
    )
}

fn invalid_number(token: &Token) -> ReadError {
    ReadError::new(
        ReadErrorKind::InvalidNumber,
        format!("invalid number {}", token.text),
        token.position,
        token.span,
    )
}

fn read_atom(token: Token) -> Result<Value, ReadError> {
    match token.kind {
        TokenKind::String => Ok(Value::String(token.text)),
        TokenKind::Long => token
            .text
            .parse::<i64>()
            .map(Value::Long)
            .map_err(|_| invalid_number(&token)),
        TokenKind::Double => match token.text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Double(n)),
            _ => Err(invalid_number(&token)),
        },
        TokenKind::Symbol => Ok(match boolean_literal(&token.text) {
            Some(b) => Value::Bool(b),
            None => Value::Symbol(token.text),
        }),
        TokenKind::Error => {
            let kind = if token.text == UNTERMINATED_STRING {
                ReadErrorKind::UnterminatedString
            } else {
                ReadErrorKind::UnexpectedCharacter
            };
            Err(ReadError::new(kind, token.text, token.position, token.span))
        }
        // brackets are dispatched by `read_token`
        TokenKind::ListBegin | TokenKind::ListEnd => Err(unexpected_close(&token)),
    }
}

fn boolean_literal(text: &str) -> Option<bool> {
    match text {
        "#t" | "#true" => Some(true),
        "#f" | "#false" => Some(false),
        _ => None,
    }
}
