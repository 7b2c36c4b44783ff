//! Loading, printing, reading and error handling built-ins.
//!
//! `load` and `file->string` touch the file system; `print` writes to stdout.
//! Everything else here is pure.

use std::io::{self, Write};

use lilith_eval::{BuiltinFn, Environment, Value, eval};
use lilith_reader::{parse, read_all};

use crate::args::{Args, with_args};
use crate::path::{read_source, search_path};

/// Evaluate every top-level expression of `source` in order. Stops at the
/// first error; otherwise returns the last result, or `()` for empty input.
/// 按顺序求值 `source` 中的所有顶层表达式，遇到第一个错误即停止。
pub fn eval_source(env: &Environment, source: &str) -> Value {
    let expressions = match read_all(source) {
        Ok(expressions) => expressions,
        Err(e) => return Value::from(e),
    };

    let mut result = Value::unit();
    for expression in expressions {
        result = eval(env, expression);
        if result.is_error() {
            break;
        }
    }
    result
}

fn load(env: &Environment, args: Value) -> Value {
    with_args("load", args, |args| {
        let name = Args::string_of(args.name, args.one()?)?;
        let (path, source) = read_source(&name, &search_path(env)).map_err(|e| e.to_string())?;
        tracing::debug!(path = %path.display(), "load");
        Ok(eval_source(env, &source))
    })
}

fn file_to_string(env: &Environment, args: Value) -> Value {
    with_args("file->string", args, |args| {
        let name = Args::string_of(args.name, args.one()?)?;
        let (_, source) = read_source(&name, &search_path(env)).map_err(|e| e.to_string())?;
        Ok(Value::String(source))
    })
}

/// Printed form for `print`: strings without quotes, everything else as displayed.
fn printed(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print(_: &Environment, args: Value) -> Value {
    with_args("print", args, |args| {
        let line: Vec<String> = args.items.iter().map(printed).collect();
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line.join(" ")).map_err(|e| format!("print failed: {e}"))?;
        Ok(Value::unit())
    })
}

fn error(_: &Environment, args: Value) -> Value {
    with_args("error", args, |args| {
        let message = Args::string_of(args.name, args.one()?)?;
        Ok(Value::Error(message))
    })
}

/// `(read "text")` gives `{expr}`.
fn read(_: &Environment, args: Value) -> Value {
    with_args("read", args, |args| {
        let text = Args::string_of(args.name, args.one()?)?;
        let value = parse(&text).map_err(|e| e.to_string())?;
        Ok(Value::QExpr(vec![value]))
    })
}

/// Bindings of the calling scope as `{{"name" value} ...}`.
fn env_(env: &Environment, args: Value) -> Value {
    with_args("env", args, |args| {
        args.expect_count(0)?;
        let pairs = env
            .bindings()
            .into_iter()
            .map(|(name, value)| Value::QExpr(vec![Value::String(name), value]))
            .collect();
        Ok(Value::QExpr(pairs))
    })
}

/// `(try {expr} {handler})`: the handler runs only if `expr` yields an error.
fn try_(env: &Environment, args: Value) -> Value {
    with_args("try", args, |args| {
        let name = args.name;
        let (body, handler) = args.two()?;
        let body = Args::q_expression_of(name, body)?;
        let handler = Args::q_expression_of(name, handler)?;

        let result = eval(env, Value::SExpr(body));
        if let Value::Error(message) = &result {
            tracing::debug!(%message, "try caught error");
            return Ok(eval(env, Value::SExpr(handler)));
        }
        Ok(result)
    })
}

/// Returns all I/O and utility builtins.
/// 返回所有输入输出与工具内置函数。
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let table: [(&'static str, BuiltinFn); 7] = [
        ("load", load),
        ("file->string", file_to_string),
        ("print", print),
        ("error", error),
        ("read", read),
        ("env", env_),
        ("try", try_),
    ];
    table.to_vec()
}
