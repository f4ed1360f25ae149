//! Core parser infrastructure and top-level parsing rules.
//!
//! The `SvParser` struct provides primitive operations (advance, expect, eat)
//! and error recovery, while top-level methods parse source files, design
//! units and module body items.

use crate::cst::*;
use crate::token::{lookup_keyword, SvToken, Token};
use std::cell::Cell;
use unihdl_common::Interner;
use unihdl_diagnostics::code::{Category, DiagnosticCode};
use unihdl_diagnostics::{Diagnostic, DiagnosticSink};
use unihdl_source::{FileId, Span};

/// Code of every parser diagnostic.
pub const PARSE_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A recursive descent parser for SystemVerilog module bodies.
///
/// The parser consumes a token stream produced by the lexer and builds a
/// [`SourceText`]. Errors are reported to the diagnostic sink and
/// represented as `Error` variants in the tree for error recovery.
pub struct SvParser<'src> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) source: &'src str,
    pub(crate) file: FileId,
    pub(crate) interner: &'src Interner,
    pub(crate) sink: &'src DiagnosticSink,
    errors: Cell<usize>,
}

impl<'src> SvParser<'src> {
    /// Creates a new parser from a token stream produced by the lexer.
    ///
    /// The `tokens` must have been lexed from `source` for the given `file`
    /// and end with [`SvToken::Eof`].
    pub fn new(
        tokens: Vec<Token>,
        source: &'src str,
        file: FileId,
        interner: &'src Interner,
        sink: &'src DiagnosticSink,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            file,
            interner,
            sink,
            errors: Cell::new(0),
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    pub(crate) fn current(&self) -> SvToken {
        self.peek_kind(0)
    }

    pub(crate) fn current_span(&self) -> Span {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(t) => t.span,
            None => Span::new(self.file, 0, 0),
        }
    }

    pub(crate) fn current_text(&self) -> &'src str {
        let span = self.current_span();
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    pub(crate) fn at(&self, kind: SvToken) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current() == SvToken::Eof
    }

    pub(crate) fn at_identifier(&self) -> bool {
        matches!(
            self.current(),
            SvToken::Identifier | SvToken::EscapedIdentifier
        )
    }

    /// Returns the span of the previous token.
    pub(crate) fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    /// Span from `start` to the last consumed token, or an empty span at
    /// `start` when nothing was consumed since `start_pos`.
    pub(crate) fn span_since(&self, start: Span, start_pos: usize) -> Span {
        if self.pos > start_pos {
            start.merge(self.prev_span())
        } else {
            Span::new(self.file, start.start, start.start)
        }
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it matches. Returns `true` if consumed.
    pub(crate) fn eat(&mut self, kind: SvToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind. Emits an error if not.
    pub(crate) fn expect(&mut self, kind: SvToken) {
        if !self.eat(kind) {
            self.expected(&format!("{kind:?}"));
        }
    }

    /// Expects and returns an identifier. Emits an error and returns a
    /// `<missing>` placeholder if not.
    pub(crate) fn expect_identifier(&mut self) -> Identifier {
        let span = self.current_span();
        if self.at_identifier() {
            let name = self.interner.get_or_intern(self.current_text());
            self.advance();
            Identifier { name, span }
        } else {
            self.expected("identifier");
            Identifier {
                name: self.interner.get_or_intern("<missing>"),
                span: Span::new(self.file, span.start, span.start),
            }
        }
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> SvToken {
        self.tokens
            .get(self.pos + offset)
            .map_or(SvToken::Eof, |t| t.kind)
    }

    // ========================================================================
    // Error handling and recovery
    // ========================================================================

    /// Number of errors this parser has reported.
    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    /// Emits an error diagnostic at the current position.
    pub(crate) fn error(&self, msg: &str) {
        self.error_at(msg, self.current_span());
    }

    pub(crate) fn error_at(&self, msg: &str, span: Span) {
        self.errors.set(self.errors.get() + 1);
        self.sink.emit(Diagnostic::error(PARSE_ERROR, msg, span));
    }

    /// Emits an "expected X" error at the current position.
    pub(crate) fn expected(&self, what: &str) {
        self.error(&format!("expected {what}, found {:?}", self.current()));
    }

    /// Skips to the next `;` and consumes it. Stops without consuming at a
    /// design-unit boundary so a missing semicolon cannot swallow
    /// `endmodule`.
    pub(crate) fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.at(SvToken::Semicolon) && !self.at_unit_boundary() {
            self.advance();
        }
        self.eat(SvToken::Semicolon);
    }

    fn at_unit_boundary(&self) -> bool {
        self.current().is_unit_start()
            || matches!(
                self.current(),
                SvToken::Endmodule | SvToken::Endinterface | SvToken::Endprogram
            )
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parses a complete source file.
    pub fn parse_source_text(&mut self) -> SourceText {
        let start = self.current_span();
        let start_pos = self.pos;
        let mut modules = Vec::new();

        while !self.at_eof() {
            if self.current().is_unit_start() {
                modules.push(self.parse_module());
                continue;
            }
            self.error("expected 'module', 'interface', or 'program'");
            while !self.at_eof() && !self.current().is_unit_start() {
                self.advance();
            }
        }

        SourceText {
            modules,
            span: self.span_since(start, start_pos),
        }
    }

    /// Parses one design unit.
    ///
    /// Header parameter and port lists are skipped: only the body matters
    /// here.
    fn parse_module(&mut self) -> ModuleDecl {
        let start = self.current_span();
        let (kind, end_kw) = match self.current() {
            SvToken::Interface => (UnitKind::Interface, SvToken::Endinterface),
            SvToken::Program => (UnitKind::Program, SvToken::Endprogram),
            _ => (UnitKind::Module, SvToken::Endmodule),
        };
        self.advance();
        let name = self.expect_identifier();
        self.recover_to_semicolon();

        let mut items = Vec::new();
        while !self.at(end_kw) && !self.at_eof() && !self.current().is_unit_start() {
            if let Some(item) = self.parse_module_item() {
                items.push(item);
            }
        }

        self.expect(end_kw);
        let end_label = if self.eat(SvToken::Colon) {
            Some(self.expect_identifier())
        } else {
            None
        };
        let span = start.merge(self.prev_span());

        ModuleDecl {
            kind,
            name,
            items,
            end_label,
            span,
        }
    }

    /// Parses a module body item. Returns `None` for a stray `;`.
    ///
    /// Instantiations are parsed in full. Other items that start the way a
    /// declaration, `assign`, process or block does are skipped as
    /// [`ModuleItem::Unsupported`]; anything else is a syntax error.
    fn parse_module_item(&mut self) -> Option<ModuleItem> {
        if self.eat(SvToken::Semicolon) {
            return None;
        }
        if self.at_identifier() && self.looks_like_instantiation() {
            let start = self.current_span();
            let errors_before = self.error_count();
            let inst = self.parse_module_instantiation();
            if self.error_count() > errors_before {
                return Some(ModuleItem::Error(start.merge(self.prev_span())));
            }
            return Some(ModuleItem::Instantiation(inst));
        }

        let span = self.current_span();
        let start_pos = self.pos;
        if self.starts_other_item() {
            self.skip_module_item();
            if self.pos > start_pos {
                return Some(ModuleItem::Unsupported {
                    leading: span,
                    span: span.merge(self.prev_span()),
                });
            }
        }

        self.error("expected module instantiation");
        self.recover_to_semicolon();
        if self.pos == start_pos {
            // Mismatched end keyword, e.g. `endinterface` inside a module.
            self.advance();
        }
        Some(ModuleItem::Error(span.merge(self.prev_span())))
    }

    /// Looks ahead for `name [#(...)] instance {[...]} (`.
    fn looks_like_instantiation(&self) -> bool {
        let mut i = 1;
        if self.peek_kind(i) == SvToken::Hash {
            i += 1;
            if self.peek_kind(i) != SvToken::LeftParen {
                return true;
            }
            match self.skip_balanced(i) {
                Some(next) => i = next,
                None => return true,
            }
        }
        if !matches!(
            self.peek_kind(i),
            SvToken::Identifier | SvToken::EscapedIdentifier
        ) {
            return false;
        }
        i += 1;
        while self.peek_kind(i) == SvToken::LeftBracket {
            match self.skip_balanced(i) {
                Some(next) => i = next,
                None => return false,
            }
        }
        self.peek_kind(i) == SvToken::LeftParen
    }

    /// Offset just past the group opened at `offset`, or `None` at EOF.
    fn skip_balanced(&self, offset: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = offset;
        loop {
            match self.peek_kind(i) {
                SvToken::LeftParen | SvToken::LeftBracket | SvToken::LeftBrace => depth += 1,
                SvToken::RightParen | SvToken::RightBracket | SvToken::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                SvToken::Eof => return None,
                _ => {}
            }
            i += 1;
        }
    }

    /// Returns `true` at a reserved word that can open a module item, or at
    /// a name followed by what can only continue a declaration.
    fn starts_other_item(&self) -> bool {
        let kind = self.current();
        if self.at_identifier() {
            return matches!(
                self.peek_kind(1),
                SvToken::Identifier
                    | SvToken::EscapedIdentifier
                    | SvToken::LeftBracket
                    | SvToken::ColonColon
                    | SvToken::Hash
                    | SvToken::Dot
            );
        }
        lookup_keyword(self.current_text()) == Some(kind)
            && !kind.closes_block()
            && kind != SvToken::Else
            && !self.at_unit_boundary()
    }

    /// Skips one item up to its terminating `;` or the end keyword of its
    /// block, whichever closes it at nesting depth zero. An `else` branch
    /// belongs to the same item. Never crosses a design-unit boundary.
    fn skip_module_item(&mut self) {
        let prototype = matches!(
            self.current(),
            SvToken::Import | SvToken::Export | SvToken::Extern | SvToken::Pure | SvToken::Typedef
        );
        let mut nest = 0usize;
        let mut blocks = 0usize;
        while !self.at_eof() && !self.at_unit_boundary() {
            let kind = self.current();
            let prev = if self.pos > 0 {
                self.tokens[self.pos - 1].kind
            } else {
                SvToken::Eof
            };
            match kind {
                SvToken::LeftParen
                | SvToken::LeftBracket
                | SvToken::LeftBrace
                | SvToken::AttrOpen => nest += 1,
                SvToken::RightParen
                | SvToken::RightBracket
                | SvToken::RightBrace
                | SvToken::AttrClose => nest = nest.saturating_sub(1),
                SvToken::Semicolon if nest == 0 && blocks == 0 => {
                    self.advance();
                    if !self.at(SvToken::Else) {
                        return;
                    }
                    continue;
                }
                _ if kind.closes_block() => {
                    if blocks == 0 {
                        return;
                    }
                    blocks -= 1;
                    if blocks == 0 && nest == 0 {
                        self.advance();
                        if self.eat(SvToken::Colon) {
                            let _ = self.expect_identifier();
                        }
                        if !self.at(SvToken::Else) {
                            return;
                        }
                        continue;
                    }
                }
                _ if kind.opens_block() && !prototype && !is_block_reference(prev, kind) => {
                    blocks += 1;
                }
                _ => {}
            }
            self.advance();
        }
    }
}

/// `wait fork`, `disable fork` and `assert property (...)` name a block kind
/// without opening one.
fn is_block_reference(prev: SvToken, kind: SvToken) -> bool {
    matches!(
        (prev, kind),
        (SvToken::Wait | SvToken::Disable, SvToken::Fork)
            | (
                SvToken::Assert | SvToken::Assume | SvToken::Cover,
                SvToken::Property | SvToken::Sequence
            )
    )
}
