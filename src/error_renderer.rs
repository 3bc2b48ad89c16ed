//! Error rendering using ariadne
//!
//! Errors do not keep the source they came from, so every entry point takes
//! the source text the error was produced from.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use sprig::{Interpreter, render_error};
///
/// let mut interpreter = Interpreter::new();
/// let source = "(+ 1 \"two\")";
/// if let Err(e) = interpreter.eval(source) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for UIs and logs)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_diagnostic(&error.category.to_string(), &error.diagnostic, source, writer, use_color)
}

fn render_diagnostic(
    category: &str,
    diag: &Diagnostic,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    // Clamp so a span from a different source can't index past the end.
    let end = diag.span.end().min(source.len());
    let span = diag.span.start().min(end)..end;

    let mut report = Report::build(kind, (SOURCE_ID, span.clone()))
        .with_message(format!("{}: {}", category, diag.message))
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    // Position-less errors (primitive failures caught outside any node) get
    // no label, just the message.
    if diag.pos.is_some() {
        report = report.with_label(
            Label::new((SOURCE_ID, span))
                .with_message(&diag.message)
                .with_color(colors.next()),
        );
    }

    for help_msg in &diag.help {
        report = report.with_help(help_msg);
    }

    report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)
}
