//! Structured diagnostics for the unihdl front end.
//!
//! Lexers, parsers and translators never print. They build [`Diagnostic`]s
//! and hand them to a shared, thread-safe [`DiagnosticSink`]; callers drain
//! the sink and render it with a [`DiagnosticRenderer`] (or assert on it in
//! tests).

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
