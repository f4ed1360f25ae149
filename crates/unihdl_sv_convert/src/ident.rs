//! Identifier translation.

use crate::SvConverter;
use unihdl_ast::Expr;
use unihdl_sv_parser::cst::Identifier;

impl SvConverter<'_> {
    /// Translates an identifier into [`Expr::Id`].
    ///
    /// Escaped identifiers (`\bus[0]`) are interned without their leading
    /// backslash. No symbol resolution takes place.
    pub fn translate_identifier(&self, ident: &Identifier) -> Expr {
        let text = self.interner.resolve(ident.name);
        match text.strip_prefix('\\') {
            Some(bare) => Expr::id(self.interner.get_or_intern(bare)),
            None => Expr::id(ident.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::Fixture;
    use unihdl_source::Span;
    use unihdl_sv_parser::cst::Identifier;

    #[test]
    fn plain_identifier_keeps_its_symbol() {
        let fx = Fixture::new();
        let name = fx.interner.get_or_intern("u_core");
        let expr = fx.converter().translate_identifier(&Identifier {
            name,
            span: Span::DUMMY,
        });
        assert_eq!(expr.as_id(), Some(name));
    }

    #[test]
    fn escaped_identifier_loses_backslash() {
        let fx = Fixture::new();
        let name = fx.interner.get_or_intern("\\bus[0]");
        let expr = fx.converter().translate_identifier(&Identifier {
            name,
            span: Span::DUMMY,
        });
        assert_eq!(fx.show(&expr), "bus[0]");
    }
}
