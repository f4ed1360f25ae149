//! Parameter values and dimension decorations.

use crate::{ConvertError, SvConverter};
use unihdl_ast::Expr;
use unihdl_sv_parser::cst::{DataType, ParamExpression, Range, UnpackedDimension};

impl SvConverter<'_> {
    /// Translates one parameter value: an expression or a data type.
    ///
    /// A data type becomes its keyword as an identifier wrapped in one
    /// `Index(_, Downto(msb, lsb))` per packed dimension. Signing
    /// qualifiers are not modelled and produce a `W300` notice.
    pub fn translate_param_expr(&self, value: &ParamExpression) -> Result<Expr, ConvertError> {
        match value {
            ParamExpression::Expr(e) => self.translate_expr(e),
            ParamExpression::DataType(ty) => self.translate_data_type(ty),
        }
    }

    fn translate_data_type(&self, ty: &DataType) -> Result<Expr, ConvertError> {
        if let Some((_, span)) = ty.signing {
            self.notice_not_implemented("signing of a data type parameter value", span);
        }
        let keyword = Expr::id(self.interner.get_or_intern(ty.kind.keyword()));
        ty.packed.iter().try_fold(keyword, |acc, range| {
            Ok(Expr::index(acc, self.translate_range(range)?))
        })
    }

    fn translate_range(&self, range: &Range) -> Result<Expr, ConvertError> {
        Ok(Expr::downto(
            self.translate_expr(&range.msb)?,
            self.translate_expr(&range.lsb)?,
        ))
    }

    /// Decorates `name` with instance-array dimensions, left to right:
    /// `u [3:0] [2]` becomes `Index(Index(u, Downto(3, 0)), 2)`.
    pub fn apply_unpacked_dimensions(
        &self,
        name: Expr,
        dims: &[UnpackedDimension],
    ) -> Result<Expr, ConvertError> {
        dims.iter().try_fold(name, |acc, dim| {
            let dim = match dim {
                UnpackedDimension::Range(range) => self.translate_range(range)?,
                UnpackedDimension::Size { size, .. } => self.translate_expr(size)?,
            };
            Ok(Expr::index(acc, dim))
        })
    }
}
