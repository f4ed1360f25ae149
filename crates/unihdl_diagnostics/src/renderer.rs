//! Text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use unihdl_source::SourceDb;

/// Turns a diagnostic into display text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// rustc-style plain-text renderer:
///
/// ```text
/// warning[W300]: construct not implemented: named port connection attribute
///   --> top.sv:3:14
///    |
///  3 |     foo u1((* keep *) .a(x));
///    |            ^^^^^^^^^^
/// ```
pub struct TerminalRenderer {
    /// Wrap the header in ANSI bold when set.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let header = format!("{}[{}]: {}", diag.severity, diag.code, diag.message);
        let mut out = if self.color {
            format!("\x1b[1m{header}\x1b[0m\n")
        } else {
            format!("{header}\n")
        };

        if !diag.primary_span.is_dummy() {
            let span = diag.primary_span;
            let file = source_db.get_file(span.file);
            let (line, col) = file.line_col(span.start);
            let gutter = " ".repeat(line.to_string().len());

            out.push_str(&format!("{gutter}--> {}\n", source_db.resolve_span(span)));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!("{line} | {}\n", file.line_text(span.start)));

            let carets = "^".repeat(span.len().max(1) as usize);
            let indent = " ".repeat(col as usize - 1);
            let message = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!("{gutter} | {indent}{carets}{message}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::label::Label;
    use unihdl_source::Span;

    #[test]
    fn renders_location_and_underline() {
        let mut db = SourceDb::new();
        let id = db.add_source("top.sv", "foo u1(.a(x));\n".to_string());
        let span = Span::new(id, 7, 12);
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 300),
            "construct not implemented",
            span,
        )
        .with_label(Label::primary(span, "ignored"));

        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.starts_with("warning[W300]: construct not implemented"));
        assert!(out.contains("--> top.sv:1:8"));
        assert!(out.contains("1 | foo u1(.a(x));"));
        assert!(out.contains("       ^^^^^ ignored"));
    }

    #[test]
    fn dummy_span_renders_header_and_footers_only() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 301),
            "instantiation declares no instance",
            Span::DUMMY,
        )
        .with_note("the parser accepted an empty instance list");

        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.contains("error[E301]"));
        assert!(!out.contains("-->"));
        assert!(out.contains("= note: the parser accepted an empty instance list"));
    }
}
