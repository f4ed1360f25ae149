//! Hand-rolled recursive descent parser for SystemVerilog module bodies.
//!
//! The parser understands design units (`module`, `interface`, `program`)
//! whose bodies are module instantiation statements, with full parameter
//! and port association lists, instance arrays, attribute instances and the
//! expression grammar those lists need. The main entry point is
//! [`parse_file`], which returns a [`cst::SourceText`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): source text to tokens; comments skipped,
//!   sized/based literals and attribute brackets recognized.
//! - **Parser** ([`parser`]): recursive descent with Pratt expression
//!   parsing and error recovery via `Error` nodes.
//! - **CST** ([`cst`]): node types with spans and serde support.

#![warn(missing_docs)]

pub mod cst;
mod expr;
mod inst;
pub mod lexer;
pub mod parser;
pub mod token;

pub use cst::SourceText;
pub use token::{SvToken, Token};

use unihdl_common::Interner;
use unihdl_diagnostics::DiagnosticSink;
use unihdl_source::{FileId, SourceDb};

/// Parses a SystemVerilog source file.
///
/// Errors are reported to the diagnostic sink and represented as `Error`
/// variants in the tree for downstream processing.
pub fn parse_file(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> SourceText {
    let source = &source_db.get_file(file_id).content;
    let tokens = lexer::lex(source, file_id, sink);
    let mut parser = parser::SvParser::new(tokens, source, file_id, interner, sink);
    parser.parse_source_text()
}

/// Parses a file holding a single module instantiation statement.
///
/// Returns `None` if the lexer or parser reported any error, or if tokens
/// follow the statement.
pub fn parse_instantiation(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Option<cst::ModuleInstantiation> {
    let source = &source_db.get_file(file_id).content;
    let errors_before = sink.error_count();
    let tokens = lexer::lex(source, file_id, sink);
    let mut parser = parser::SvParser::new(tokens, source, file_id, interner, sink);
    let stmt = parser.parse_module_instantiation();
    if !parser.at_eof() {
        parser.error("unexpected tokens after instantiation");
    }
    (sink.error_count() == errors_before).then_some(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unihdl_diagnostics::Diagnostic;

    fn parse_source(source: &str) -> (SourceText, Vec<Diagnostic>) {
        let mut db = SourceDb::new();
        let file_id = db.add_source("test.sv", source.to_string());
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let text = parse_file(file_id, &db, &interner, &sink);
        (text, sink.take_all())
    }

    fn parse_ok(source: &str) -> SourceText {
        let (text, errors) = parse_source(source);
        assert!(
            errors.is_empty(),
            "unexpected errors: {:?}",
            errors.iter().map(|e| &e.message).collect::<Vec<_>>()
        );
        text
    }

    #[test]
    fn integration_soc() {
        let text = parse_ok(
            "module soc #(parameter int N = 4) (input logic clk);
                // clock and reset
                clk_gen #(.FREQ(100_000_000)) u_clk (.clk_in(clk), .clk_out(core_clk));
                cpu #(32, logic [31:0]) u_cpu (core_clk, rst_n, bus.req, );
                mem u_mem [N-1:0] (.*);
                uart u_uart0 (.tx(tx[0])), u_uart1 (.tx(tx[1]));
             endmodule : soc",
        );
        assert_eq!(text.modules.len(), 1);
        let items = &text.modules[0].items;
        assert_eq!(items.len(), 4);
        let counts: Vec<usize> = items
            .iter()
            .map(|item| match item {
                cst::ModuleItem::Instantiation(i) => i.instances.len(),
                cst::ModuleItem::Unsupported { .. } | cst::ModuleItem::Error(_) => 0,
            })
            .collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn integration_error_recovery() {
        let (text, errors) = parse_source(
            "module bad;
                logic [7:0] data;
                foo u1 (.a(x)
                x = y;
             endmodule

             module good;
                bar u2 (y);
             endmodule",
        );
        assert_eq!(text.modules.len(), 2);
        assert!(!errors.is_empty());
        let items = &text.modules[0].items;
        assert!(matches!(items[0], cst::ModuleItem::Unsupported { .. }));
        assert!(matches!(items[1], cst::ModuleItem::Error(_)));
        assert!(matches!(
            text.modules[1].items[0],
            cst::ModuleItem::Instantiation(_)
        ));
    }

    #[test]
    fn parse_instantiation_ok() {
        let mut db = SourceDb::new();
        let file_id = db.add_source("stmt.sv", "foo f1(.a(x), .b(y));".to_string());
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let stmt = parse_instantiation(file_id, &db, &interner, &sink);
        assert!(stmt.is_some_and(|s| s.instances.len() == 1));
        assert!(!sink.has_errors());
    }

    #[test]
    fn parse_instantiation_rejects_trailing_tokens() {
        let mut db = SourceDb::new();
        let file_id = db.add_source("stmt.sv", "foo f1(); bar".to_string());
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        assert!(parse_instantiation(file_id, &db, &interner, &sink).is_none());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let text = parse_ok("module m; foo #(.W(8)) u[1:0] (.a(x[3:0]), .*); endmodule");
        let json = serde_json::to_string(&text).unwrap();
        let back: SourceText = serde_json::from_str(&json).unwrap();
        assert_eq!(back, text);
    }
}
