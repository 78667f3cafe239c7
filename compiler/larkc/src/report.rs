//! Diagnostic rendering with source snippets.

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

use crate::commands::Failure;

/// Render `failure` against `source`, labelling the offending span when
/// there is one.
///
/// `color` is off for tests and when stderr is not a terminal.
pub fn render(path: &str, source: &str, failure: &Failure, color: bool) -> String {
    let span = failure.span().map(|span| clamp(span.to_range(), source.len()));
    let offset = span.as_ref().map_or(0, |range| range.start);

    let mut builder = Report::build(ReportKind::Error, path, offset)
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_message(failure.to_string());
    if let Some(range) = span {
        builder = builder.with_label(Label::new((path, range)).with_message(label(failure)));
    }

    let mut out = Vec::new();
    match builder
        .finish()
        .write((path, Source::from(source.to_string())), &mut out)
    {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("error: {failure}\n"),
    }
}

fn label(failure: &Failure) -> &'static str {
    match failure {
        Failure::Parse(_) => "here",
        Failure::Compile(_) => "while compiling this",
        Failure::Eval(_) => "while evaluating this",
    }
}

/// Keep a span inside the source; an end-of-input span may sit one past it.
fn clamp(range: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    start..end
}
