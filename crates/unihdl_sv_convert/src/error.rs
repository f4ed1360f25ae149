//! Translation faults.

use crate::errors;
use unihdl_diagnostics::Diagnostic;
use unihdl_source::Span;

/// A syntax tree the translator refuses to guess about.
///
/// Faults abort the statement being translated; nothing it produced so far
/// reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A parser recovery node, or a tree shape the grammar cannot produce.
    #[error("malformed syntax tree: {what}")]
    Malformed {
        /// The production that was malformed.
        what: &'static str,
        /// Where.
        span: Span,
    },

    /// An instantiation statement with no hierarchical instances.
    #[error("instantiation has no instances")]
    NoInstances {
        /// The statement.
        span: Span,
    },
}

impl ConvertError {
    /// Source location of the fault.
    pub fn span(&self) -> Span {
        match self {
            ConvertError::Malformed { span, .. } | ConvertError::NoInstances { span } => *span,
        }
    }

    /// Converts the fault into an `E300`/`E301` diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConvertError::Malformed { what, span } => errors::error_malformed(what, *span),
            ConvertError::NoInstances { span } => errors::error_no_instances(*span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ConvertError::Malformed {
            what: "expression",
            span: Span::DUMMY,
        };
        assert_eq!(err.to_string(), "malformed syntax tree: expression");
        assert_eq!(
            ConvertError::NoInstances { span: Span::DUMMY }.to_string(),
            "instantiation has no instances"
        );
    }

    #[test]
    fn diagnostics_carry_code_and_span() {
        let span = Span::new(unihdl_source::FileId::from_raw(0), 4, 9);
        let d = ConvertError::NoInstances { span }.to_diagnostic();
        assert_eq!(d.code, errors::E301);
        assert_eq!(d.primary_span, span);
        let d = ConvertError::Malformed {
            what: "module item",
            span,
        }
        .to_diagnostic();
        assert_eq!(d.code, errors::E300);
        assert_eq!(d.primary_span, span);
    }
}
