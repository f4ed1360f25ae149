//! Compact textual form of unified expressions.
//!
//! Used by tests and diagnostics. The format is SystemVerilog-like for
//! selects and operators; associations print as `MAP(key, value)`, the
//! wildcard as `*` and the open marker as `null`.

use crate::expr::{BinaryOp, Expr, Literal, Radix, UnaryOp};
use std::fmt;
use unihdl_common::Interner;

/// Borrowed expression plus the interner needed to print its names.
pub struct DisplayExpr<'a> {
    expr: &'a Expr,
    interner: &'a Interner,
}

impl Expr {
    /// Returns a value that formats this expression with resolved names.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> DisplayExpr<'a> {
        DisplayExpr {
            expr: self,
            interner,
        }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.expr, self.interner)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr], interner: &Interner) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_expr(f, item, interner)?;
    }
    Ok(())
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, interner: &Interner) -> fmt::Result {
    match expr {
        Expr::Id(name) => f.write_str(interner.resolve(*name)),
        Expr::Literal(lit) => write_literal(f, lit),
        Expr::All => f.write_str("*"),
        Expr::Null => f.write_str("null"),
        Expr::Unary { op, operand } => {
            write!(f, "({}", unary_symbol(*op))?;
            write_expr(f, operand, interner)?;
            f.write_str(")")
        }
        Expr::Binary { op, left, right } => {
            let (open, sep, close) = match op {
                BinaryOp::MapAssociation => ("MAP(", ", ", ")"),
                BinaryOp::Index => ("", "[", "]"),
                BinaryOp::Downto => ("", ":", ""),
                BinaryOp::PartSelectUp => ("", "+:", ""),
                BinaryOp::PartSelectDown => ("", "-:", ""),
                BinaryOp::Dot => ("", ".", ""),
                BinaryOp::Scope => ("", "::", ""),
                other => {
                    f.write_str("(")?;
                    write_expr(f, left, interner)?;
                    write!(f, " {} ", binary_symbol(*other))?;
                    write_expr(f, right, interner)?;
                    return f.write_str(")");
                }
            };
            f.write_str(open)?;
            write_expr(f, left, interner)?;
            f.write_str(sep)?;
            write_expr(f, right, interner)?;
            f.write_str(close)
        }
        Expr::Ternary {
            cond,
            if_true,
            if_false,
        } => {
            f.write_str("(")?;
            write_expr(f, cond, interner)?;
            f.write_str(" ? ")?;
            write_expr(f, if_true, interner)?;
            f.write_str(" : ")?;
            write_expr(f, if_false, interner)?;
            f.write_str(")")
        }
        Expr::Call { callee, args } => {
            write_expr(f, callee, interner)?;
            f.write_str("(")?;
            write_list(f, args, interner)?;
            f.write_str(")")
        }
        Expr::Concat(elements) => {
            f.write_str("{")?;
            write_list(f, elements, interner)?;
            f.write_str("}")
        }
        Expr::Replicate { count, elements } => {
            f.write_str("{")?;
            write_expr(f, count, interner)?;
            f.write_str("{")?;
            write_list(f, elements, interner)?;
            f.write_str("}}")
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, lit: &Literal) -> fmt::Result {
    match lit {
        Literal::Int(v) => write!(f, "{v}"),
        Literal::Based {
            width,
            signed,
            radix,
            digits,
        } => {
            if let Some(w) = width {
                write!(f, "{w}")?;
            }
            let base = match radix {
                Radix::Binary => 'b',
                Radix::Octal => 'o',
                Radix::Decimal => 'd',
                Radix::Hex => 'h',
            };
            let s = if *signed { "s" } else { "" };
            write!(f, "'{s}{base}{digits}")
        }
        Literal::UnbasedUnsized(c) => write!(f, "'{c}"),
        Literal::Real(text) => f.write_str(text),
        Literal::Str(s) => write!(f, "{s:?}"),
    }
}

fn unary_symbol(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::LogNot => "!",
        UnaryOp::BitNot => "~",
        UnaryOp::RedAnd => "&",
        UnaryOp::RedNand => "~&",
        UnaryOp::RedOr => "|",
        UnaryOp::RedNor => "~|",
        UnaryOp::RedXor => "^",
        UnaryOp::RedXnor => "~^",
    }
}

fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::Eq => "==",
        BinaryOp::Neq => "!=",
        BinaryOp::CaseEq => "===",
        BinaryOp::CaseNeq => "!==",
        BinaryOp::WildEq => "==?",
        BinaryOp::WildNeq => "!=?",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::LogAnd => "&&",
        BinaryOp::LogOr => "||",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitXnor => "~^",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::AShl => "<<<",
        BinaryOp::AShr => ">>>",
        BinaryOp::Index => "[]",
        BinaryOp::Downto => ":",
        BinaryOp::PartSelectUp => "+:",
        BinaryOp::PartSelectDown => "-:",
        BinaryOp::Dot => ".",
        BinaryOp::Scope => "::",
        BinaryOp::MapAssociation => "=>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn associations_and_markers() {
        let interner = Interner::new();
        let a = Expr::id(interner.get_or_intern("a"));
        let x = Expr::id(interner.get_or_intern("x"));
        let e = Expr::map_association(a, x);
        assert_eq!(e.display(&interner).to_string(), "MAP(a, x)");
        let w = Expr::map_association(Expr::All, Expr::Null);
        assert_eq!(w.display(&interner).to_string(), "MAP(*, null)");
    }

    #[test]
    fn selects_and_operators() {
        let interner = Interner::new();
        let u = Expr::id(interner.get_or_intern("u"));
        let n = Expr::id(interner.get_or_intern("N"));
        let name = Expr::index(
            u,
            Expr::downto(
                Expr::binary(BinaryOp::Sub, n, Expr::int(1)),
                Expr::int(0),
            ),
        );
        assert_eq!(name.display(&interner).to_string(), "u[(N - 1):0]");
    }

    #[test]
    fn literals() {
        let interner = Interner::new();
        let based = Expr::Literal(Literal::Based {
            width: Some(8),
            signed: false,
            radix: Radix::Hex,
            digits: "ff".into(),
        });
        assert_eq!(based.display(&interner).to_string(), "8'hff");
        let s = Expr::Literal(Literal::Str("a\"b".into()));
        assert_eq!(s.display(&interner).to_string(), "\"a\\\"b\"");
        let fill = Expr::Literal(Literal::UnbasedUnsized('x'));
        assert_eq!(fill.display(&interner).to_string(), "'x");
    }
}
