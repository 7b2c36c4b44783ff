//! Diagnostic reporting for Lilith.
//! Lilith 的诊断报告。
//!
//! Reader failures are turned into [`Diagnostic`]s and rendered with ariadne
//! so the command line can point at the offending source text.
//! 读取器的错误会被转换为 [`Diagnostic`]，并通过 ariadne 渲染源码片段。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label};

use std::io;

use ariadne::{ColorGenerator, Config, Label as AriadneLabel, Report, ReportKind, Source};

/// Render a diagnostic into any writer, optionally without colors.
/// 将诊断信息渲染到任意输出，可选择关闭颜色。
pub fn emit_to<W: io::Write>(
    writer: W,
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    color: bool,
) -> io::Result<()> {
    // ariadne wants a span inside the source, so clamp anything that points past the end.
    let clamp = |range: std::ops::Range<usize>| {
        let end = range.end.min(source.len());
        range.start.min(end)..end
    };

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(ReportKind::Error, filename, clamp(diagnostic.span.range()).start)
        .with_config(Config::default().with_color(color))
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        report = report.with_label(
            AriadneLabel::new((filename, clamp(label.span.range())))
                .with_message(&label.message)
                .with_color(colors.next()),
        );
    }

    report = report.with_note(diagnostic.origin());

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish().write((filename, Source::from(source)), writer)
}
