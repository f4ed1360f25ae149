//! Diagnostic codes and helper functions for translation faults and notices.
//!
//! `E300`/`E301` report statements the module driver had to skip. `W300`
//! reports constructs that are accepted but not carried into the AST.

use unihdl_diagnostics::{Category, Diagnostic, DiagnosticCode, Severity};
use unihdl_source::Span;

/// The syntax tree holds a parser recovery node.
pub const E300: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 300,
};

/// An instantiation statement without any hierarchical instance.
pub const E301: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 301,
};

/// A construct was skipped because it is not implemented.
pub const W300: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 300,
};

/// Creates a diagnostic for a recovery node reached during translation.
pub fn error_malformed(what: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E300, format!("malformed syntax tree: {what}"), span)
        .with_note("the statement was skipped; fix the syntax error reported for it first")
}

/// Creates a diagnostic for an instantiation with no instances.
pub fn error_no_instances(span: Span) -> Diagnostic {
    Diagnostic::error(E301, "instantiation has no instances", span)
}

/// Creates a "construct not implemented" notice.
///
/// `context` names the grammar production the construct appeared in.
pub fn notice_not_implemented(context: &str, severity: Severity, span: Span) -> Diagnostic {
    Diagnostic::new(
        severity,
        W300,
        format!("construct not implemented: {context}"),
        span,
    )
}
