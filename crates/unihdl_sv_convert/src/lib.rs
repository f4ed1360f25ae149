//! SystemVerilog concrete syntax tree to unified AST translation.
//!
//! The core is [`SvConverter::translate_instantiation`], which turns one
//! module instantiation statement into one [`CompInstance`] per
//! hierarchical instance. It is built from smaller translators, each a
//! method on [`SvConverter`]:
//!
//! - identifiers ([`SvConverter::translate_identifier`]),
//! - expressions ([`SvConverter::translate_expr`]),
//! - parameter values and unpacked dimensions
//!   ([`SvConverter::translate_param_expr`],
//!   [`SvConverter::apply_unpacked_dimensions`]),
//! - the two association lists
//!   ([`SvConverter::translate_parameter_assignments`],
//!   [`SvConverter::translate_port_connections`]).
//!
//! [`SvConverter::convert_module`] and [`SvConverter::convert_source`] drive
//! the core over whole module bodies, turning faults into diagnostics.
//!
//! [`CompInstance`]: unihdl_ast::CompInstance

#![warn(missing_docs)]

mod assoc;
pub mod error;
pub mod errors;
mod expr;
mod ident;
mod inst;
mod module;
mod types;

pub use error::ConvertError;

use unihdl_common::Interner;
use unihdl_config::ConvertConfig;
use unihdl_diagnostics::DiagnosticSink;
use unihdl_source::{SourceDb, Span};

/// Translates SystemVerilog syntax trees into the unified AST.
///
/// Holds only shared references, so one converter can serve several
/// threads translating independent statements or files.
pub struct SvConverter<'a> {
    interner: &'a Interner,
    source_db: &'a SourceDb,
    sink: &'a DiagnosticSink,
    config: ConvertConfig,
}

impl<'a> SvConverter<'a> {
    /// Creates a converter with the default configuration.
    ///
    /// `source_db` must hold the files the syntax trees were parsed from:
    /// literal values are read back through node spans.
    pub fn new(interner: &'a Interner, source_db: &'a SourceDb, sink: &'a DiagnosticSink) -> Self {
        Self {
            interner,
            source_db,
            sink,
            config: ConvertConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Records that a construct at `span` was skipped.
    ///
    /// Emits a `W300` notice whose severity comes from the configuration.
    /// Translation carries on as if the construct were absent.
    pub fn notice_not_implemented(&self, context_label: &str, span: Span) {
        self.sink.emit(errors::notice_not_implemented(
            context_label,
            self.config.notice_severity.severity(),
            span,
        ));
    }
}
