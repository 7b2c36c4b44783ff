//! The Lilith tokenizer.
//! Lilith 词法分析器。

use crate::token::{Token, TokenKind, UNTERMINATED_STRING};
use lilith_common::{Position, Span};

/// Character classes that drive the state machine.
/// 驱动状态机的字符类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Letter,
    Dot,
    Quote,
    AddSub,
    Whitespace,
    Open,
    Close,
    Other,
    /// Control characters and non-letter, non-ASCII input.
    /// 控制字符以及非字母的非 ASCII 字符。
    Invalid,
}

impl CharClass {
    fn of(ch: char) -> Self {
        match ch {
            '0'..='9' => CharClass::Digit,
            '"' => CharClass::Quote,
            '.' => CharClass::Dot,
            '+' | '-' => CharClass::AddSub,
            '(' | '{' => CharClass::Open,
            ')' | '}' => CharClass::Close,
            c if is_whitespace(c) => CharClass::Whitespace,
            c if c.is_alphabetic() => CharClass::Letter,
            c if c.is_ascii_graphic() => CharClass::Other,
            _ => CharClass::Invalid,
        }
    }

    /// Characters that end a non-string token without being part of it.
    fn is_ending(self) -> bool {
        matches!(self, CharClass::Whitespace | CharClass::Open | CharClass::Close)
    }
}

/// States of the tokenizer. Each state is the best guess so far for the kind
/// of the token being read.
/// 词法分析器的状态，即当前对 token 类型的最佳推断。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    ListBegin,
    ListEnd,
    /// Inside a string, closing quote not seen yet.
    StringBegin,
    String,
    /// A lone `+` or `-`; becomes a number if a digit or dot follows.
    AddSub,
    Long,
    Double,
    Symbol,
    Error,
    End,
}

/// One step of the state machine. Pairs without a rule keep the state.
/// 状态机的单步转移。没有规则的组合保持当前状态。
fn transition(state: State, class: CharClass) -> State {
    use CharClass as C;

    match (state, class) {
        (State::None, C::Open) => State::ListBegin,
        (State::None, C::Digit) => State::Long,
        (State::None, C::Close) => State::ListEnd,
        (State::None, C::Quote) => State::StringBegin,
        (State::None, C::Dot) => State::Double,
        (State::None, C::AddSub) => State::AddSub,
        (State::None, C::Letter | C::Other) => State::Symbol,
        (State::None, C::Whitespace | C::Invalid) => State::Error,

        (State::ListBegin | State::ListEnd, _) => State::End,

        (State::AddSub, C::Digit) => State::Long,
        (State::AddSub, C::Dot) => State::Double,
        (State::AddSub, c) if c.is_ending() => State::End,
        (State::AddSub, C::Quote | C::Invalid) => State::Error,
        (State::AddSub, _) => State::Symbol,

        (State::Long | State::Double, C::Letter | C::AddSub | C::Other) => State::Symbol,
        (State::Long, C::Dot) => State::Double,
        (State::Long | State::Double | State::Symbol, C::Quote | C::Invalid) => State::Error,
        (State::Long | State::Double | State::Symbol, c) if c.is_ending() => State::End,

        (State::StringBegin, C::Quote) => State::String,
        (State::String, _) => State::End,

        (state, _) => state,
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\t' | '\x0B' | ' ')
}

/// Map the character after a backslash to the character it stands for.
/// Unknown escapes stand for themselves.
/// 将反斜杠后的字符映射为其代表的字符。
fn unescape(ch: char) -> char {
    match ch {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0B',
        other => other,
    }
}

/// The Lilith tokenizer.
/// Lilith 词法分析器。
///
/// Produces one token per call to [`Tokenizer::next_token`] and keeps line and
/// column counters for diagnostics. Whitespace and `;` comments are skipped
/// before and after each token.
/// 每次调用 [`Tokenizer::next_token`] 产生一个 token，并维护行列计数用于诊断。
pub struct Tokenizer<'src> {
    /// Character iterator with position info
    /// 带位置信息的字符迭代器
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    /// Byte offset of the next character
    /// 下一个字符的字节偏移
    pos: usize,
    /// Line and column of the next character
    /// 下一个字符的行列位置
    position: Position,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        let mut tokenizer = Self {
            chars: source.char_indices().peekable(),
            pos: 0,
            position: Position::START,
        };
        tokenizer.skip_whitespace_and_comments();
        tokenizer
    }

    /// Tokenize the entire source.
    /// 对整个源代码进行词法分析。
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Current line/column, i.e. just past the last token read.
    /// 当前行列位置，即上一个 token 之后。
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Read the next token, or `None` at end of input.
    /// 读取下一个 token，输入结束时返回 `None`。
    pub fn next_token(&mut self) -> Option<Token> {
        self.peek_char()?;

        let start = self.pos;
        let start_position = self.position;
        let mut state = State::None;
        let mut text = String::new();

        while state != State::Error {
            let Some(ch) = self.peek_char() else {
                break;
            };
            let next = transition(state, CharClass::of(ch));
            if next == State::End {
                break;
            }
            state = next;
            self.advance();

            if matches!(state, State::StringBegin | State::String) {
                match ch {
                    '"' => {}
                    '\\' => {
                        if let Some(escaped) = self.advance() {
                            text.push(unescape(escaped));
                        }
                    }
                    _ => text.push(ch),
                }
            } else {
                text.push(ch);
            }
        }

        let span = Span::new(start, self.pos);
        let token = match state {
            State::ListBegin => Token::new(TokenKind::ListBegin, text, span, start_position),
            State::ListEnd => Token::new(TokenKind::ListEnd, text, span, start_position),
            State::String => Token::new(TokenKind::String, text, span, start_position),
            State::Long => Token::new(TokenKind::Long, text, span, start_position),
            State::Double => Token::new(TokenKind::Double, text, span, start_position),
            State::Symbol | State::AddSub => Token::new(TokenKind::Symbol, text, span, start_position),
            State::StringBegin => {
                Token::new(TokenKind::Error, UNTERMINATED_STRING, span, start_position)
            }
            State::Error | State::None | State::End => Token::new(
                TokenKind::Error,
                format!("unexpected character in token {text}"),
                span,
                start_position,
            ),
        };

        tracing::trace!(kind = ?token.kind, text = %token.text, at = %token.position, "token");

        self.skip_whitespace_and_comments();
        Some(token)
    }

    /// Advance to the next character.
    /// 前进到下一个字符。
    fn advance(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.pos = pos + ch.len_utf8();
        self.position.advance(ch);
        Some(ch)
    }

    /// Peek at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    /// Skip whitespace and `;` comments.
    /// 跳过空白字符和 `;` 注释。
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.advance();
            } else if ch == ';' {
                while self.peek_char().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
