//! Concrete syntax tree for SystemVerilog module bodies.
//!
//! Node shapes follow the grammar productions of IEEE 1800-2017 section 23.3
//! (module instantiation) closely enough that a translator can dispatch on
//! them one-to-one. Association lists are enums: the parser decides once
//! whether a list is ordered or named, so a mixed list cannot be built.
//!
//! Every node carries a [`Span`]. Literal values are not stored; they are
//! read back from the source text through the span.

use serde::{Deserialize, Serialize};
use unihdl_common::Ident;
use unihdl_source::Span;

/// A parsed source file: a sequence of design units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceText {
    /// Design units in source order.
    pub modules: Vec<ModuleDecl>,
    /// Span of the whole file.
    pub span: Span,
}

/// The kind of design unit a [`ModuleDecl`] was declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// `module ... endmodule`
    Module,
    /// `interface ... endinterface`
    Interface,
    /// `program ... endprogram`
    Program,
}

/// A design unit whose body is a list of instantiation statements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// Which keyword opened the unit.
    pub kind: UnitKind,
    /// The unit name.
    pub name: Identifier,
    /// Body items in source order.
    pub items: Vec<ModuleItem>,
    /// Optional `: name` after the closing keyword.
    pub end_label: Option<Identifier>,
    /// Span from the opening keyword to the end label.
    pub span: Span,
}

/// A module body item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModuleItem {
    /// `foo #(...) u1 (...), u2 (...);`
    Instantiation(ModuleInstantiation),
    /// A well-delimited item other than an instantiation (declaration,
    /// `assign`, process, generate or subroutine block), skipped unparsed.
    Unsupported {
        /// Span of the leading token, e.g. `assign` or the type name.
        leading: Span,
        /// Span of the whole item.
        span: Span,
    },
    /// An item the parser could not make sense of.
    Error(Span),
}

/// An identifier occurrence. Escaped identifiers keep their backslash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Interned identifier text.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

/// `module_instantiation ::= module_identifier [parameter_value_assignment]
/// hierarchical_instance { , hierarchical_instance } ;`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleInstantiation {
    /// The instantiated module, interface or program.
    pub module: Identifier,
    /// The `#(...)` clause, if written.
    pub params: Option<ParameterValueAssignment>,
    /// Instances in source order. The parser guarantees at least one; a
    /// hand-built tree may have none.
    pub instances: Vec<HierarchicalInstance>,
    /// Span of the statement including the semicolon.
    pub span: Span,
}

/// `#( [list_of_parameter_assignments] )`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterValueAssignment {
    /// `None` for `#()`.
    pub assignments: Option<ParameterAssignments>,
    /// Span from `#` to `)`.
    pub span: Span,
}

/// `list_of_parameter_assignments`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterAssignments {
    /// `#(8, logic [3:0])`
    Ordered(Vec<ParamExpression>),
    /// `#(.W(8), .T())`
    Named(Vec<NamedParameterAssignment>),
}

/// `. parameter_identifier ( [param_expression] )`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedParameterAssignment {
    /// Parameter name.
    pub name: Identifier,
    /// `None` for `.W()`.
    pub value: Option<ParamExpression>,
    /// Source span.
    pub span: Span,
}

/// `param_expression ::= mintypmax_expression | data_type`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamExpression {
    /// A value.
    Expr(Expr),
    /// A type, for type parameters.
    DataType(DataType),
}

impl ParamExpression {
    /// Returns the source span of the parameter value.
    pub fn span(&self) -> Span {
        match self {
            ParamExpression::Expr(e) => e.span(),
            ParamExpression::DataType(t) => t.span,
        }
    }
}

/// Built-in type keywords accepted as parameter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    /// `logic`
    Logic,
    /// `bit`
    Bit,
    /// `reg`
    Reg,
    /// `byte`
    Byte,
    /// `shortint`
    Shortint,
    /// `int`
    Int,
    /// `longint`
    Longint,
    /// `integer`
    Integer,
    /// `time`
    Time,
    /// `real`
    Real,
    /// `shortreal`
    Shortreal,
    /// `realtime`
    Realtime,
    /// `string`
    String,
}

impl BuiltinType {
    /// The keyword spelling.
    pub fn keyword(self) -> &'static str {
        match self {
            BuiltinType::Logic => "logic",
            BuiltinType::Bit => "bit",
            BuiltinType::Reg => "reg",
            BuiltinType::Byte => "byte",
            BuiltinType::Shortint => "shortint",
            BuiltinType::Int => "int",
            BuiltinType::Longint => "longint",
            BuiltinType::Integer => "integer",
            BuiltinType::Time => "time",
            BuiltinType::Real => "real",
            BuiltinType::Shortreal => "shortreal",
            BuiltinType::Realtime => "realtime",
            BuiltinType::String => "string",
        }
    }
}

/// `signed` / `unsigned`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signing {
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,
}

/// A built-in data type used as a parameter value, e.g. `logic signed [7:0]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    /// The type keyword.
    pub kind: BuiltinType,
    /// Explicit signing qualifier, with its span.
    pub signing: Option<(Signing, Span)>,
    /// Packed dimensions, outermost first.
    pub packed: Vec<Range>,
    /// Source span.
    pub span: Span,
}

/// `hierarchical_instance ::= name_of_instance ( [list_of_port_connections] )`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HierarchicalInstance {
    /// Instance name and unpacked dimensions.
    pub name: NameOfInstance,
    /// Port connections.
    pub connections: PortConnections,
    /// Source span.
    pub span: Span,
}

/// `name_of_instance ::= instance_identifier { unpacked_dimension }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NameOfInstance {
    /// Instance identifier.
    pub name: Identifier,
    /// Instance-array dimensions.
    pub dimensions: Vec<UnpackedDimension>,
    /// Source span.
    pub span: Span,
}

/// `[ msb : lsb ]` or `[ size ]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UnpackedDimension {
    /// `[3:0]`
    Range(Range),
    /// `[4]`
    Size {
        /// Number of elements.
        size: Expr,
        /// Span including the brackets.
        span: Span,
    },
}

/// A `[msb:lsb]` range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Left bound.
    pub msb: Expr,
    /// Right bound.
    pub lsb: Expr,
    /// Span including the brackets.
    pub span: Span,
}

/// `list_of_port_connections`
///
/// An empty `()` parses as `Ordered(vec![])`. `(a, , c)` keeps the blank
/// middle entry as a connection with no expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PortConnections {
    /// Positional connections.
    Ordered(Vec<OrderedPortConnection>),
    /// Named and wildcard connections.
    Named(Vec<NamedPortConnection>),
}

/// `{ attribute_instance } [ expression ]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedPortConnection {
    /// Leading `(* ... *)` attributes.
    pub attributes: Vec<AttributeInstance>,
    /// `None` for a blank entry.
    pub expr: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// `{ attribute_instance } . port_identifier [ ( [ expression ] ) ]`
/// or `{ attribute_instance } .*`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPortConnection {
    /// Leading `(* ... *)` attributes.
    pub attributes: Vec<AttributeInstance>,
    /// What the connection names.
    pub target: NamedPortTarget,
    /// Source span.
    pub span: Span,
}

/// The port side of a [`NamedPortConnection`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NamedPortTarget {
    /// `.*`
    Wildcard,
    /// `.a(x)`, `.a()` or `.a`
    Port {
        /// Port name.
        name: Identifier,
        /// `None` for `.a()` and `.a`.
        actual: Option<Expr>,
    },
}

/// `(* attr_spec { , attr_spec } *)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    /// The attribute specs.
    pub specs: Vec<AttrSpec>,
    /// Span from `(*` to `*)`.
    pub span: Span,
}

/// `attr_name [ = constant_expression ]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttrSpec {
    /// Attribute name.
    pub name: Identifier,
    /// Optional value.
    pub value: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// A SystemVerilog expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A simple identifier.
    Identifier {
        /// The identifier.
        name: Identifier,
    },
    /// A hierarchical name (e.g., `u1.data`, `top.sub.sig`).
    HierarchicalName {
        /// The parts of the dotted name.
        parts: Vec<Identifier>,
        /// Source span.
        span: Span,
    },
    /// A scoped identifier (e.g., `pkg::name`).
    ScopedIdent {
        /// The scope (package or class name).
        scope: Identifier,
        /// The identifier within the scope.
        name: Identifier,
        /// Source span.
        span: Span,
    },
    /// A numeric literal (integer, sized, based, or unbased unsized like `'1`).
    Literal {
        /// Source span (value extracted from source text).
        span: Span,
    },
    /// A real literal.
    RealLiteral {
        /// Source span.
        span: Span,
    },
    /// A string literal, quotes included in the span.
    StringLiteral {
        /// Source span.
        span: Span,
    },
    /// A bit select (e.g., `data[7]`).
    Index {
        /// The base expression.
        base: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A range select (e.g., `data[7:0]`).
    RangeSelect {
        /// The base expression.
        base: Box<Expr>,
        /// The MSB expression.
        msb: Box<Expr>,
        /// The LSB expression.
        lsb: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// An indexed part select (e.g., `data[i+:4]` or `data[i-:4]`).
    PartSelect {
        /// The base expression.
        base: Box<Expr>,
        /// The starting index expression.
        index: Box<Expr>,
        /// `true` for `+:`, `false` for `-:`.
        ascending: bool,
        /// The width expression.
        width: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A concatenation (e.g., `{a, b, c}`).
    Concat {
        /// The concatenated expressions.
        elements: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A replication (e.g., `{3{a}}`).
    Repeat {
        /// The repetition count expression.
        count: Box<Expr>,
        /// The concatenation to repeat.
        elements: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A ternary conditional expression (e.g., `sel ? a : b`).
    Ternary {
        /// The condition.
        condition: Box<Expr>,
        /// The true-branch expression.
        then_expr: Box<Expr>,
        /// The false-branch expression.
        else_expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A function call (e.g., `f(a)` or `pkg::f(a)`).
    FuncCall {
        /// The callee.
        name: Box<Expr>,
        /// Arguments.
        args: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A system function call (e.g., `$clog2(N)`).
    SystemCall {
        /// The name including the `$`.
        name: Identifier,
        /// Arguments.
        args: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A parenthesized expression.
    Paren {
        /// The inner expression.
        inner: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// Error recovery placeholder.
    Error(Span),
}

impl Expr {
    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier { name } => name.span,
            Expr::HierarchicalName { span, .. }
            | Expr::ScopedIdent { span, .. }
            | Expr::Literal { span }
            | Expr::RealLiteral { span }
            | Expr::StringLiteral { span }
            | Expr::Index { span, .. }
            | Expr::RangeSelect { span, .. }
            | Expr::PartSelect { span, .. }
            | Expr::Concat { span, .. }
            | Expr::Repeat { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::FuncCall { span, .. }
            | Expr::SystemCall { span, .. }
            | Expr::Paren { span, .. } => *span,
            Expr::Error(span) => *span,
        }
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    LogNot,
    /// `~`
    BitNot,
    /// `&`
    RedAnd,
    /// `~&`
    RedNand,
    /// `|`
    RedOr,
    /// `~|`
    RedNor,
    /// `^`
    RedXor,
    /// `~^` / `^~`
    RedXnor,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    /// `~^` / `^~`
    BitXnor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `<<<`
    AShl,
    /// `>>>`
    AShr,
}
