//! Error codes for Lilith diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Tokenizer errors (E0001 - E0099)
    UnexpectedCharacter,
    UnterminatedString,
    InvalidNumber,

    // Reader errors (E0100 - E0199)
    UnexpectedClose,
    MissingClose,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::UnterminatedString => "E0002",
            ErrorCode::InvalidNumber => "E0003",

            ErrorCode::UnexpectedClose => "E0100",
            ErrorCode::MissingClose => "E0101",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedString => Some("add a closing quote `\"` to terminate the string"),
            ErrorCode::UnexpectedClose => Some("`(` is closed by `)` and `{` is closed by `}`"),
            ErrorCode::MissingClose => Some("add the matching closing bracket"),
            ErrorCode::InvalidNumber => Some("integers must fit in 64 bits"),
            ErrorCode::UnexpectedCharacter => None,
        }
    }
}
