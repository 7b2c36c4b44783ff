//! Output formatting utilities.
//! 输出格式化工具。
//!
//! Colored terminal output for the CLI. Evaluation results go to stdout,
//! everything else to stderr.
//! 为 CLI 提供彩色终端输出。求值结果写到标准输出，其余写到标准错误。

use std::io;

use lilith_diagnostic::{Diagnostic, emit_to};
use lilith_eval::Value;

/// Print an error message in red.
/// 以红色打印错误消息。
pub fn error(msg: &str) {
    eprintln!("\x1b[31merror:\x1b[0m {msg}");
}

/// Print an evaluation result. Errors are shown in red on stderr.
/// 打印求值结果。错误以红色显示在标准错误输出。
pub fn value(value: &Value) {
    match value {
        Value::Error(_) => eprintln!("\x1b[31m{value}\x1b[0m"),
        _ => println!("{value}"),
    }
}

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn diagnostic(source: &str, filename: &str, diagnostic: &Diagnostic) {
    diagnostic_to(io::stderr(), source, filename, diagnostic, true);
}

/// Render into `writer`. A failed render is logged and reported as `false`.
fn diagnostic_to<W: io::Write>(
    writer: W,
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    color: bool,
) -> bool {
    match emit_to(writer, source, filename, diagnostic, color) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(file = filename, error = %e, "cannot render diagnostic: {diagnostic}");
            false
        }
    }
}
