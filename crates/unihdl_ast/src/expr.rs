//! Unified expression nodes.

use serde::{Deserialize, Serialize};
use unihdl_common::Ident;

/// An expression in the unified AST.
///
/// A closed sum type: translators and consumers match on it exhaustively.
/// Child nodes are boxed or held in vectors and owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// A plain name.
    Id(Ident),
    /// A numeric or string literal.
    Literal(Literal),
    /// The wildcard marker, as in the `.*` port connection.
    All,
    /// The open/default marker: an omitted value.
    Null,
    /// A prefix operator.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// A binary operator, including selects and associations.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand (the key of a [`BinaryOp::MapAssociation`]).
        left: Box<Expr>,
        /// Right operand (the value of a [`BinaryOp::MapAssociation`]).
        right: Box<Expr>,
    },
    /// `cond ? if_true : if_false`.
    Ternary {
        /// Condition.
        cond: Box<Expr>,
        /// Value when the condition holds.
        if_true: Box<Expr>,
        /// Value otherwise.
        if_false: Box<Expr>,
    },
    /// A function or system-function call.
    Call {
        /// Called function, usually an [`Expr::Id`].
        callee: Box<Expr>,
        /// Arguments in source order.
        args: Vec<Expr>,
    },
    /// `{a, b, c}`.
    Concat(Vec<Expr>),
    /// `{n{a, b}}`.
    Replicate {
        /// Repetition count.
        count: Box<Expr>,
        /// Replicated elements.
        elements: Vec<Expr>,
    },
}

impl Expr {
    /// Creates an identifier reference.
    pub fn id(name: Ident) -> Self {
        Expr::Id(name)
    }

    /// Creates an unsigned decimal literal.
    pub fn int(value: u64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    /// Creates a binary node, taking ownership of both operands.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a `key => value` association.
    pub fn map_association(key: Expr, value: Expr) -> Self {
        Self::binary(BinaryOp::MapAssociation, key, value)
    }

    /// Creates `base[index]`.
    pub fn index(base: Expr, index: Expr) -> Self {
        Self::binary(BinaryOp::Index, base, index)
    }

    /// Creates the range `msb:lsb`.
    pub fn downto(msb: Expr, lsb: Expr) -> Self {
        Self::binary(BinaryOp::Downto, msb, lsb)
    }

    /// Returns `true` for a [`BinaryOp::MapAssociation`] node.
    pub fn is_map_association(&self) -> bool {
        matches!(
            self,
            Expr::Binary {
                op: BinaryOp::MapAssociation,
                ..
            }
        )
    }

    /// Returns `(key, value)` if this is a [`BinaryOp::MapAssociation`] node.
    pub fn as_map_association(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Binary {
                op: BinaryOp::MapAssociation,
                left,
                right,
            } => Some((&**left, &**right)),
            _ => None,
        }
    }

    /// Returns the identifier if this is an [`Expr::Id`].
    pub fn as_id(&self) -> Option<Ident> {
        match self {
            Expr::Id(name) => Some(*name),
            _ => None,
        }
    }

    /// Counts the nodes of this tree, the root included.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Expr::Id(_) | Expr::Literal(_) | Expr::All | Expr::Null => 0,
            Expr::Unary { operand, .. } => operand.node_count(),
            Expr::Binary { left, right, .. } => left.node_count() + right.node_count(),
            Expr::Ternary {
                cond,
                if_true,
                if_false,
            } => cond.node_count() + if_true.node_count() + if_false.node_count(),
            Expr::Call { callee, args } => {
                callee.node_count() + args.iter().map(Expr::node_count).sum::<usize>()
            }
            Expr::Concat(elements) => elements.iter().map(Expr::node_count).sum(),
            Expr::Replicate { count, elements } => {
                count.node_count() + elements.iter().map(Expr::node_count).sum::<usize>()
            }
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// An unsized decimal number that fits in `u64`.
    Int(u64),
    /// A based or sized number such as `8'hFF`, `'b1x0z` or `4'sd3`.
    Based {
        /// Declared bit width, if any.
        width: Option<u32>,
        /// `true` for the `s` flag.
        signed: bool,
        /// Radix of `digits`.
        radix: Radix,
        /// Digits with underscores removed, lowercased, `x`/`z`/`?` kept.
        digits: String,
    },
    /// An unbased unsized fill literal: `'0`, `'1`, `'x` or `'z`.
    ///
    /// Holds the lowercased fill character.
    UnbasedUnsized(char),
    /// A real number, kept as its source text.
    Real(String),
    /// A string with escapes resolved.
    Str(String),
}

/// Radix of a based literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Radix {
    /// `'b`
    Binary,
    /// `'o`
    Octal,
    /// `'d`
    Decimal,
    /// `'h`
    Hex,
}

/// A prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    LogNot,
    /// `~`
    BitNot,
    /// `&` reduction
    RedAnd,
    /// `~&` reduction
    RedNand,
    /// `|` reduction
    RedOr,
    /// `~|` reduction
    RedNor,
    /// `^` reduction
    RedXor,
    /// `~^` reduction
    RedXnor,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `===`
    CaseEq,
    /// `!==`
    CaseNeq,
    /// `==?`
    WildEq,
    /// `!=?`
    WildNeq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    LogAnd,
    /// `||`
    LogOr,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `~^`
    BitXnor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `<<<`
    AShl,
    /// `>>>`
    AShr,
    /// `base[index]`; also an array dimension on a declared name.
    Index,
    /// `msb:lsb`
    Downto,
    /// `start+:width`
    PartSelectUp,
    /// `start-:width`
    PartSelectDown,
    /// `a.b`
    Dot,
    /// `pkg::name`
    Scope,
    /// `key => value` in a generic or port map.
    MapAssociation,
}
