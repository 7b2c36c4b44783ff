//! Lexical analysis for Lilith.
//! Lilith 词法分析模块。
//!
//! The tokenizer classifies every input character and feeds the class into a
//! finite-state machine whose states are token kinds. A token ends when the
//! machine reaches its terminal state.
//! 词法分析器对每个输入字符分类，并驱动以 token 类型为状态的有限状态机。

mod lexer;
mod token;

pub use lexer::Tokenizer;
pub use token::{Token, TokenKind, UNTERMINATED_STRING};
