//! Pratt expression parser.
//!
//! | BP (L,R) | Operators |
//! |----------|-----------|
//! | (1,2)    | `||` |
//! | (3,4)    | `&&` |
//! | (5,6)    | `|` |
//! | (7,8)    | `^` `~^` `^~` |
//! | (9,10)   | `&` |
//! | (11,12)  | `==` `!=` `===` `!==` `==?` `!=?` |
//! | (13,14)  | `<` `<=` `>` `>=` |
//! | (15,16)  | `<<` `>>` `<<<` `>>>` |
//! | (17,18)  | `+` `-` |
//! | (19,20)  | `*` `/` `%` |
//! | (22,21)  | `**` (right-assoc) |
//! | prefix 23 | `+` `-` `!` `~` `&` `~&` `|` `~|` `^` `~^` |
//!
//! Ternary `? :` is handled as a special case at min_bp=0 (right-associative).

use crate::cst::*;
use crate::parser::SvParser;
use crate::token::SvToken;

/// Binding power for binary operators. Returns (left_bp, right_bp).
fn infix_binding_power(op: BinaryOp) -> (u8, u8) {
    match op {
        BinaryOp::LogOr => (1, 2),
        BinaryOp::LogAnd => (3, 4),
        BinaryOp::BitOr => (5, 6),
        BinaryOp::BitXor | BinaryOp::BitXnor => (7, 8),
        BinaryOp::BitAnd => (9, 10),
        BinaryOp::Eq
        | BinaryOp::Neq
        | BinaryOp::CaseEq
        | BinaryOp::CaseNeq
        | BinaryOp::WildEq
        | BinaryOp::WildNeq => (11, 12),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => (13, 14),
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::AShl | BinaryOp::AShr => (15, 16),
        BinaryOp::Add | BinaryOp::Sub => (17, 18),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => (19, 20),
        BinaryOp::Pow => (22, 21),
    }
}

impl SvParser<'_> {
    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_expr_bp(0)
    }

    /// Parses an expression with minimum binding power.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_prefix_expr();

        loop {
            if self.at_eof() {
                break;
            }

            if self.at(SvToken::Question) && min_bp == 0 {
                self.advance();
                let then_expr = self.parse_expr_bp(0);
                self.expect(SvToken::Colon);
                let else_expr = self.parse_expr_bp(0);
                let span = lhs.span().merge(else_expr.span());
                lhs = Expr::Ternary {
                    condition: Box::new(lhs),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                    span,
                };
                continue;
            }

            // Postfix: `[i]`, `[m:l]`, `[i+:w]`, `[i-:w]`
            if self.at(SvToken::LeftBracket) {
                lhs = self.parse_postfix_index(lhs);
                continue;
            }

            if self.at(SvToken::Dot) {
                lhs = self.parse_dot_suffix(lhs);
                continue;
            }

            let op = match self.current_as_binary_op() {
                Some(op) => op,
                None => break,
            };

            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }

            self.advance();

            let rhs = self.parse_expr_bp(r_bp);
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
                span,
            };
        }

        lhs
    }

    /// Parses a prefix expression (unary operators, literals, names, braces).
    fn parse_prefix_expr(&mut self) -> Expr {
        let start = self.current_span();

        if let Some(op) = self.current_as_unary_op() {
            self.advance();
            let operand = self.parse_expr_bp(23);
            let span = start.merge(operand.span());
            return Expr::Unary {
                op,
                operand: Box::new(operand),
                span,
            };
        }

        match self.current() {
            SvToken::IntLiteral | SvToken::SizedLiteral | SvToken::UnbasedUnsizedLiteral => {
                self.advance();
                Expr::Literal { span: start }
            }
            SvToken::Error => {
                // Already reported by the lexer.
                self.advance();
                Expr::Error(start)
            }
            SvToken::RealLiteral => {
                self.advance();
                Expr::RealLiteral { span: start }
            }
            SvToken::StringLiteral => {
                self.advance();
                Expr::StringLiteral { span: start }
            }
            SvToken::LeftParen => {
                self.advance();
                let inner = self.parse_expr();
                self.expect(SvToken::RightParen);
                let span = start.merge(self.prev_span());
                Expr::Paren {
                    inner: Box::new(inner),
                    span,
                }
            }
            SvToken::LeftBrace => self.parse_concat_or_repeat(),
            SvToken::SystemIdentifier => {
                let name = self.expect_system_identifier();
                let args = if self.at(SvToken::LeftParen) {
                    self.parse_call_args()
                } else {
                    Vec::new()
                };
                let span = start.merge(self.prev_span());
                Expr::SystemCall { name, args, span }
            }
            SvToken::Identifier | SvToken::EscapedIdentifier => {
                let ident = self.expect_identifier();

                let expr = if self.eat(SvToken::ColonColon) {
                    let name = self.expect_identifier();
                    let span = start.merge(self.prev_span());
                    Expr::ScopedIdent {
                        scope: ident,
                        name,
                        span,
                    }
                } else {
                    Expr::Identifier { name: ident }
                };

                if self.at(SvToken::LeftParen) {
                    let args = self.parse_call_args();
                    let span = start.merge(self.prev_span());
                    Expr::FuncCall {
                        name: Box::new(expr),
                        args,
                        span,
                    }
                } else {
                    expr
                }
            }
            _ => {
                self.error("expected expression");
                // Leave closing tokens for the caller's `expect`.
                if !matches!(
                    self.current(),
                    SvToken::RightParen
                        | SvToken::RightBracket
                        | SvToken::RightBrace
                        | SvToken::Comma
                        | SvToken::Semicolon
                ) {
                    self.advance();
                }
                Expr::Error(start)
            }
        }
    }

    fn expect_system_identifier(&mut self) -> Identifier {
        let span = self.current_span();
        let name = self.interner.get_or_intern(self.current_text());
        self.advance();
        Identifier { name, span }
    }

    /// Parses a concatenation `{a, b}` or replication `{3{a, b}}`.
    pub(crate) fn parse_concat_or_repeat(&mut self) -> Expr {
        let start = self.current_span();
        self.expect(SvToken::LeftBrace);

        if self.at(SvToken::RightBrace) {
            self.advance();
            self.error_at("empty concatenation", start.merge(self.prev_span()));
            return Expr::Error(start);
        }

        let first = self.parse_expr();

        if self.at(SvToken::LeftBrace) {
            self.advance();
            let mut elements = vec![self.parse_expr()];
            while self.eat(SvToken::Comma) {
                elements.push(self.parse_expr());
            }
            self.expect(SvToken::RightBrace);
            self.expect(SvToken::RightBrace);
            let span = start.merge(self.prev_span());
            return Expr::Repeat {
                count: Box::new(first),
                elements,
                span,
            };
        }

        let mut elements = vec![first];
        while self.eat(SvToken::Comma) {
            elements.push(self.parse_expr());
        }
        self.expect(SvToken::RightBrace);
        let span = start.merge(self.prev_span());
        Expr::Concat { elements, span }
    }

    /// Parses postfix index/range/part-select.
    pub(crate) fn parse_postfix_index(&mut self, base: Expr) -> Expr {
        let start = base.span();
        self.expect(SvToken::LeftBracket);

        let first = self.parse_expr();

        match self.current() {
            SvToken::PlusColon | SvToken::MinusColon => {
                let ascending = self.at(SvToken::PlusColon);
                self.advance();
                let width = self.parse_expr();
                self.expect(SvToken::RightBracket);
                Expr::PartSelect {
                    base: Box::new(base),
                    index: Box::new(first),
                    ascending,
                    width: Box::new(width),
                    span: start.merge(self.prev_span()),
                }
            }
            SvToken::Colon => {
                self.advance();
                let lsb = self.parse_expr();
                self.expect(SvToken::RightBracket);
                Expr::RangeSelect {
                    base: Box::new(base),
                    msb: Box::new(first),
                    lsb: Box::new(lsb),
                    span: start.merge(self.prev_span()),
                }
            }
            _ => {
                self.expect(SvToken::RightBracket);
                Expr::Index {
                    base: Box::new(base),
                    index: Box::new(first),
                    span: start.merge(self.prev_span()),
                }
            }
        }
    }

    /// Parses a dot suffix for hierarchical names.
    pub(crate) fn parse_dot_suffix(&mut self, base: Expr) -> Expr {
        let start = base.span();
        let mut parts = match base {
            Expr::Identifier { name } => vec![name],
            Expr::HierarchicalName { parts, .. } => parts,
            _ => {
                self.error("hierarchical reference must start with a name");
                self.advance();
                let _ = self.expect_identifier();
                return base;
            }
        };

        while self.eat(SvToken::Dot) {
            parts.push(self.expect_identifier());
        }

        let span = start.merge(self.prev_span());
        Expr::HierarchicalName { parts, span }
    }

    /// Parses call arguments: `( expr {, expr} )`.
    pub(crate) fn parse_call_args(&mut self) -> Vec<Expr> {
        self.expect(SvToken::LeftParen);
        let mut args = Vec::new();
        if !self.at(SvToken::RightParen) {
            args.push(self.parse_expr());
            while self.eat(SvToken::Comma) {
                args.push(self.parse_expr());
            }
        }
        self.expect(SvToken::RightParen);
        args
    }

    fn current_as_binary_op(&self) -> Option<BinaryOp> {
        match self.current() {
            SvToken::DoublePipe => Some(BinaryOp::LogOr),
            SvToken::DoubleAmpersand => Some(BinaryOp::LogAnd),
            SvToken::Pipe => Some(BinaryOp::BitOr),
            SvToken::Caret => Some(BinaryOp::BitXor),
            SvToken::TildeCaret => Some(BinaryOp::BitXnor),
            SvToken::Ampersand => Some(BinaryOp::BitAnd),
            SvToken::DoubleEquals => Some(BinaryOp::Eq),
            SvToken::BangEquals => Some(BinaryOp::Neq),
            SvToken::TripleEquals => Some(BinaryOp::CaseEq),
            SvToken::BangDoubleEquals => Some(BinaryOp::CaseNeq),
            SvToken::WildcardEq => Some(BinaryOp::WildEq),
            SvToken::WildcardNeq => Some(BinaryOp::WildNeq),
            SvToken::LessThan => Some(BinaryOp::Lt),
            SvToken::LessEquals => Some(BinaryOp::Le),
            SvToken::GreaterThan => Some(BinaryOp::Gt),
            SvToken::GreaterEquals => Some(BinaryOp::Ge),
            SvToken::DoubleLess => Some(BinaryOp::Shl),
            SvToken::DoubleGreater => Some(BinaryOp::Shr),
            SvToken::TripleLess => Some(BinaryOp::AShl),
            SvToken::TripleGreater => Some(BinaryOp::AShr),
            SvToken::Plus => Some(BinaryOp::Add),
            SvToken::Minus => Some(BinaryOp::Sub),
            SvToken::Star => Some(BinaryOp::Mul),
            SvToken::Slash => Some(BinaryOp::Div),
            SvToken::Percent => Some(BinaryOp::Mod),
            SvToken::DoubleStar => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    fn current_as_unary_op(&self) -> Option<UnaryOp> {
        match self.current() {
            SvToken::Plus => Some(UnaryOp::Plus),
            SvToken::Minus => Some(UnaryOp::Minus),
            SvToken::Bang => Some(UnaryOp::LogNot),
            SvToken::Tilde => Some(UnaryOp::BitNot),
            SvToken::Ampersand => Some(UnaryOp::RedAnd),
            SvToken::TildeAmpersand => Some(UnaryOp::RedNand),
            SvToken::Pipe => Some(UnaryOp::RedOr),
            SvToken::TildePipe => Some(UnaryOp::RedNor),
            SvToken::Caret => Some(UnaryOp::RedXor),
            SvToken::TildeCaret => Some(UnaryOp::RedXnor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer;
    use crate::parser::SvParser;
    use unihdl_common::Interner;
    use unihdl_diagnostics::DiagnosticSink;
    use unihdl_source::FileId;

    use super::*;

    fn parse_expr_str(source: &str) -> Expr {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let file = FileId::from_raw(0);
        let tokens = lexer::lex(source, file, &sink);
        let mut parser = SvParser::new(tokens, source, file, &interner, &sink);
        let expr = parser.parse_expr();
        assert!(
            !sink.has_errors(),
            "unexpected errors: {:?}",
            sink.diagnostics()
        );
        assert!(parser.at_eof(), "trailing tokens in {source:?}");
        expr
    }

    #[test]
    fn simple_identifier() {
        assert!(matches!(parse_expr_str("clk"), Expr::Identifier { .. }));
    }

    #[test]
    fn lexer_error_token_is_not_reported_twice() {
        let source = "99999999999'h0 + a";
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let file = FileId::from_raw(0);
        let tokens = lexer::lex(source, file, &sink);
        let mut parser = SvParser::new(tokens, source, file, &interner, &sink);
        let expr = parser.parse_expr();
        assert_eq!(parser.error_count(), 0);
        assert_eq!(sink.error_count(), 1);
        match expr {
            Expr::Binary { left, .. } => assert!(matches!(*left, Expr::Error(_))),
            other => panic!("expected a binary expression, got {other:?}"),
        }
    }

    #[test]
    fn literals() {
        assert!(matches!(parse_expr_str("42"), Expr::Literal { .. }));
        assert!(matches!(parse_expr_str("4'b1010"), Expr::Literal { .. }));
        assert!(matches!(parse_expr_str("'1"), Expr::Literal { .. }));
        assert!(matches!(parse_expr_str("2.5"), Expr::RealLiteral { .. }));
        assert!(matches!(parse_expr_str("\"hi\""), Expr::StringLiteral { .. }));
    }

    #[test]
    fn precedence_mul_over_add() {
        match parse_expr_str("a + b * c") {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::Add);
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        match parse_expr_str("a ** b ** c") {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::Pow);
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn ternary() {
        assert!(matches!(
            parse_expr_str("sel ? a : b"),
            Expr::Ternary { .. }
        ));
    }

    #[test]
    fn selects() {
        assert!(matches!(parse_expr_str("d[3]"), Expr::Index { .. }));
        assert!(matches!(parse_expr_str("d[W-1:0]"), Expr::RangeSelect { .. }));
        assert!(matches!(
            parse_expr_str("d[i+:4]"),
            Expr::PartSelect {
                ascending: true,
                ..
            }
        ));
        assert!(matches!(
            parse_expr_str("d[i -: 4]"),
            Expr::PartSelect {
                ascending: false,
                ..
            }
        ));
    }

    #[test]
    fn ternary_inside_index() {
        match parse_expr_str("d[s ? 1 : 0]") {
            Expr::Index { index, .. } => assert!(matches!(*index, Expr::Ternary { .. })),
            other => panic!("expected index, got {other:?}"),
        }
    }

    #[test]
    fn hierarchical_and_scoped_names() {
        match parse_expr_str("top.sub.sig") {
            Expr::HierarchicalName { parts, .. } => assert_eq!(parts.len(), 3),
            other => panic!("expected hierarchical name, got {other:?}"),
        }
        assert!(matches!(
            parse_expr_str("pkg::WIDTH"),
            Expr::ScopedIdent { .. }
        ));
    }

    #[test]
    fn calls() {
        match parse_expr_str("$clog2(DEPTH)") {
            Expr::SystemCall { args, .. } => assert_eq!(args.len(), 1),
            other => panic!("expected system call, got {other:?}"),
        }
        match parse_expr_str("pkg::f(a, b)") {
            Expr::FuncCall { name, args, .. } => {
                assert!(matches!(*name, Expr::ScopedIdent { .. }));
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn concat_and_repeat() {
        match parse_expr_str("{a, b, 1'b0}") {
            Expr::Concat { elements, .. } => assert_eq!(elements.len(), 3),
            other => panic!("expected concat, got {other:?}"),
        }
        match parse_expr_str("{4{a, b}}") {
            Expr::Repeat { elements, .. } => assert_eq!(elements.len(), 2),
            other => panic!("expected repeat, got {other:?}"),
        }
    }

    #[test]
    fn paren_and_unary() {
        match parse_expr_str("-(a)") {
            Expr::Unary { op, operand, .. } => {
                assert_eq!(op, UnaryOp::Minus);
                assert!(matches!(*operand, Expr::Paren { .. }));
            }
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn missing_operand_is_error_node() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let file = FileId::from_raw(0);
        let source = "a + )";
        let tokens = lexer::lex(source, file, &sink);
        let mut parser = SvParser::new(tokens, source, file, &interner, &sink);
        match parser.parse_expr() {
            Expr::Binary { right, .. } => assert!(matches!(*right, Expr::Error(_))),
            other => panic!("expected binary, got {other:?}"),
        }
        assert!(sink.has_errors());
        assert!(parser.at(SvToken::RightParen));
    }
}
