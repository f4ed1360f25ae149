//! Expression translation.
//!
//! Parentheses disappear (the tree shape already groups), hierarchical
//! names become left-nested [`BinaryOp::Dot`] chains, and every select
//! becomes an [`BinaryOp::Index`] whose right operand carries the range
//! form. Literal values are read from the source text through node spans.

use crate::{ConvertError, SvConverter};
use unihdl_ast::{BinaryOp, Expr, Literal, Radix, UnaryOp};
use unihdl_source::Span;
use unihdl_sv_parser::cst;

impl SvConverter<'_> {
    /// Translates a SystemVerilog expression.
    ///
    /// Fails only on parser recovery nodes and on literal text the lexer
    /// should never have accepted.
    pub fn translate_expr(&self, expr: &cst::Expr) -> Result<Expr, ConvertError> {
        Ok(match expr {
            cst::Expr::Identifier { name } => self.translate_identifier(name),
            cst::Expr::HierarchicalName { parts, span } => {
                let mut parts = parts.iter();
                let first = parts.next().ok_or(ConvertError::Malformed {
                    what: "hierarchical name",
                    span: *span,
                })?;
                parts.fold(self.translate_identifier(first), |acc, part| {
                    Expr::binary(BinaryOp::Dot, acc, self.translate_identifier(part))
                })
            }
            cst::Expr::ScopedIdent { scope, name, .. } => Expr::binary(
                BinaryOp::Scope,
                self.translate_identifier(scope),
                self.translate_identifier(name),
            ),
            cst::Expr::Literal { span } => Expr::Literal(self.number_literal(*span)?),
            cst::Expr::RealLiteral { span } => {
                Expr::Literal(Literal::Real(self.source_db.snippet(*span).replace('_', "")))
            }
            cst::Expr::StringLiteral { span } => {
                Expr::Literal(Literal::Str(unescape_string(self.source_db.snippet(*span))))
            }
            cst::Expr::Index { base, index, .. } => {
                Expr::index(self.translate_expr(base)?, self.translate_expr(index)?)
            }
            cst::Expr::RangeSelect { base, msb, lsb, .. } => Expr::index(
                self.translate_expr(base)?,
                Expr::downto(self.translate_expr(msb)?, self.translate_expr(lsb)?),
            ),
            cst::Expr::PartSelect {
                base,
                index,
                ascending,
                width,
                ..
            } => {
                let op = if *ascending {
                    BinaryOp::PartSelectUp
                } else {
                    BinaryOp::PartSelectDown
                };
                Expr::index(
                    self.translate_expr(base)?,
                    Expr::binary(op, self.translate_expr(index)?, self.translate_expr(width)?),
                )
            }
            cst::Expr::Concat { elements, .. } => Expr::Concat(self.translate_exprs(elements)?),
            cst::Expr::Repeat {
                count, elements, ..
            } => Expr::Replicate {
                count: Box::new(self.translate_expr(count)?),
                elements: self.translate_exprs(elements)?,
            },
            cst::Expr::Unary { op, operand, .. } => Expr::Unary {
                op: map_unary_op(*op),
                operand: Box::new(self.translate_expr(operand)?),
            },
            cst::Expr::Binary {
                left, op, right, ..
            } => Expr::binary(
                map_binary_op(*op),
                self.translate_expr(left)?,
                self.translate_expr(right)?,
            ),
            cst::Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => Expr::Ternary {
                cond: Box::new(self.translate_expr(condition)?),
                if_true: Box::new(self.translate_expr(then_expr)?),
                if_false: Box::new(self.translate_expr(else_expr)?),
            },
            cst::Expr::FuncCall { name, args, .. } => Expr::Call {
                callee: Box::new(self.translate_expr(name)?),
                args: self.translate_exprs(args)?,
            },
            cst::Expr::SystemCall { name, args, .. } => Expr::Call {
                callee: Box::new(Expr::id(name.name)),
                args: self.translate_exprs(args)?,
            },
            cst::Expr::Paren { inner, .. } => self.translate_expr(inner)?,
            cst::Expr::Error(span) => {
                return Err(ConvertError::Malformed {
                    what: "expression",
                    span: *span,
                })
            }
        })
    }

    fn translate_exprs(&self, exprs: &[cst::Expr]) -> Result<Vec<Expr>, ConvertError> {
        exprs.iter().map(|e| self.translate_expr(e)).collect()
    }

    fn number_literal(&self, span: Span) -> Result<Literal, ConvertError> {
        parse_number(self.source_db.snippet(span)).ok_or(ConvertError::Malformed {
            what: "number literal",
            span,
        })
    }
}

/// Parses integer literal text: `42`, `1_000`, `8'hFF`, `'b1x0`, `4 'sd3`.
///
/// Plain decimals that fit `u64` become [`Literal::Int`]; larger ones stay
/// as unsized decimal [`Literal::Based`] digit strings.
fn parse_number(text: &str) -> Option<Literal> {
    let Some((size, rest)) = text.split_once('\'') else {
        let digits = text.replace('_', "");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return Some(match digits.parse::<u64>() {
            Ok(v) => Literal::Int(v),
            Err(_) => Literal::Based {
                width: None,
                signed: false,
                radix: Radix::Decimal,
                digits,
            },
        });
    };

    let size = size.trim().replace('_', "");
    if size.is_empty() {
        let mut fill = rest.chars();
        if let (Some(c @ ('0' | '1' | 'x' | 'X' | 'z' | 'Z')), None) = (fill.next(), fill.next()) {
            return Some(Literal::UnbasedUnsized(c.to_ascii_lowercase()));
        }
    }
    let width = if size.is_empty() {
        None
    } else {
        Some(size.parse::<u32>().ok()?)
    };

    let mut chars = rest.chars();
    let mut base = chars.next()?;
    let signed = matches!(base, 's' | 'S');
    if signed {
        base = chars.next()?;
    }
    let radix = match base.to_ascii_lowercase() {
        'b' => Radix::Binary,
        'o' => Radix::Octal,
        'd' => Radix::Decimal,
        'h' => Radix::Hex,
        _ => return None,
    };
    let digits: String = chars
        .filter(|c| *c != '_' && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(Literal::Based {
        width,
        signed,
        radix,
        digits,
    })
}

/// Strips the quotes of a string literal and resolves its escapes.
fn unescape_string(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0b}'),
            Some('f') => out.push('\u{0c}'),
            Some('a') => out.push('\u{07}'),
            Some('x') => {
                let mut value = 0u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn map_unary_op(op: cst::UnaryOp) -> UnaryOp {
    use cst::UnaryOp as S;
    match op {
        S::Plus => UnaryOp::Plus,
        S::Minus => UnaryOp::Minus,
        S::LogNot => UnaryOp::LogNot,
        S::BitNot => UnaryOp::BitNot,
        S::RedAnd => UnaryOp::RedAnd,
        S::RedNand => UnaryOp::RedNand,
        S::RedOr => UnaryOp::RedOr,
        S::RedNor => UnaryOp::RedNor,
        S::RedXor => UnaryOp::RedXor,
        S::RedXnor => UnaryOp::RedXnor,
    }
}

fn map_binary_op(op: cst::BinaryOp) -> BinaryOp {
    use cst::BinaryOp as S;
    match op {
        S::Add => BinaryOp::Add,
        S::Sub => BinaryOp::Sub,
        S::Mul => BinaryOp::Mul,
        S::Div => BinaryOp::Div,
        S::Mod => BinaryOp::Mod,
        S::Pow => BinaryOp::Pow,
        S::Eq => BinaryOp::Eq,
        S::Neq => BinaryOp::Neq,
        S::CaseEq => BinaryOp::CaseEq,
        S::CaseNeq => BinaryOp::CaseNeq,
        S::WildEq => BinaryOp::WildEq,
        S::WildNeq => BinaryOp::WildNeq,
        S::Lt => BinaryOp::Lt,
        S::Le => BinaryOp::Le,
        S::Gt => BinaryOp::Gt,
        S::Ge => BinaryOp::Ge,
        S::LogAnd => BinaryOp::LogAnd,
        S::LogOr => BinaryOp::LogOr,
        S::BitAnd => BinaryOp::BitAnd,
        S::BitOr => BinaryOp::BitOr,
        S::BitXor => BinaryOp::BitXor,
        S::BitXnor => BinaryOp::BitXnor,
        S::Shl => BinaryOp::Shl,
        S::Shr => BinaryOp::Shr,
        S::AShl => BinaryOp::AShl,
        S::AShr => BinaryOp::AShr,
    }
}
