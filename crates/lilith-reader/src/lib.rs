//! Reader for Lilith.
//! Lilith 读取器。
//!
//! Turns source text into [`Value`] trees: `(...)` becomes an S-expression,
//! `{...}` a Q-expression, and literals become numbers, strings, booleans or
//! symbols.
//! 将源代码转换为值树：`(...)` 为 S 表达式，`{...}` 为 Q 表达式。
//!
//! [`read`] is the entry point used by the evaluator layers and reports
//! failures as error values. [`parse`] and [`read_all`] return a structured
//! [`ReadError`] that can be rendered as a diagnostic.

mod reader;

pub use reader::{ReadError, ReadErrorKind, Reader};

use lilith_eval::Value;

/// Read `text` into a value. Several top-level expressions are wrapped in an
/// S-expression; a single one is returned as is.
/// 将 `text` 读取为一个值。多个顶层表达式包装为 S 表达式，单个则直接返回。
pub fn read(text: &str) -> Value {
    parse(text).unwrap_or_else(Value::from)
}

/// Like [`read`], but failures come back as a [`ReadError`].
/// 与 [`read`] 相同，但失败时返回 [`ReadError`]。
pub fn parse(text: &str) -> Result<Value, ReadError> {
    let mut values = read_all(text)?;
    if values.len() == 1 {
        Ok(values.remove(0))
    } else {
        Ok(Value::SExpr(values))
    }
}

/// Read every top-level expression in order, without wrapping.
/// 按顺序读取所有顶层表达式，不做包装。
pub fn read_all(text: &str) -> Result<Vec<Value>, ReadError> {
    Reader::new(text).collect()
}
