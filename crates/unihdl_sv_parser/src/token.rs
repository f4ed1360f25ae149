//! Token kinds produced by the SystemVerilog lexer.

use serde::{Deserialize, Serialize};
use unihdl_source::Span;

/// A SystemVerilog token kind.
///
/// Reserved words are never identifiers, so no keyword can start an
/// instantiation. Literal text is not stored: it is read back through the
/// token span. Variants are named after the text they match.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SvToken {
    // === Keywords ===
    Module,
    Endmodule,
    Interface,
    Endinterface,
    Program,
    Endprogram,
    Logic,
    Bit,
    Reg,
    Byte,
    Shortint,
    Int,
    Longint,
    Integer,
    Time,
    Real,
    Shortreal,
    Realtime,
    String,
    Signed,
    Unsigned,

    // Module items and declarations
    Always,
    AlwaysComb,
    AlwaysFf,
    AlwaysLatch,
    Initial,
    Final,
    Assign,
    Deassign,
    Force,
    Release,
    Defparam,
    Alias,
    Bind,
    Wire,
    Tri,
    Wand,
    Wor,
    Uwire,
    Supply0,
    Supply1,
    Var,
    Event,
    Parameter,
    Localparam,
    Specparam,
    Genvar,
    Typedef,
    Enum,
    Struct,
    Union,
    Packed,
    Const,
    Static,
    Automatic,
    Input,
    Output,
    Inout,
    Ref,
    Import,
    Export,
    Package,
    Endpackage,
    Modport,
    Let,
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    Not,
    Buf,

    // Blocks
    Begin,
    End,
    Fork,
    Join,
    JoinAny,
    JoinNone,
    Case,
    Casex,
    Casez,
    Endcase,
    Default,
    Generate,
    Endgenerate,
    If,
    Else,
    For,
    Foreach,
    While,
    Do,
    Forever,
    Repeat,
    Task,
    Endtask,
    Function,
    Endfunction,
    Return,
    Void,
    Class,
    Endclass,
    Virtual,
    Extern,
    Pure,
    Clocking,
    Endclocking,
    Property,
    Endproperty,
    Sequence,
    Endsequence,
    Covergroup,
    Endgroup,
    Checker,
    Endchecker,
    Specify,
    Endspecify,
    Primitive,
    Endprimitive,
    Table,
    Endtable,
    Config,
    Endconfig,

    // Statements and expressions
    Assert,
    Assume,
    Cover,
    Posedge,
    Negedge,
    Edge,
    Wait,
    Disable,
    Unique,
    Priority,
    Inside,
    Break,
    Continue,

    // === Literals ===
    IntLiteral,
    SizedLiteral,
    /// `'0`, `'1`, `'x`, `'z`
    UnbasedUnsizedLiteral,
    RealLiteral,
    StringLiteral,

    // === Punctuation ===
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    /// `(*`
    AttrOpen,
    /// `*)`
    AttrClose,
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    Dot,
    Hash,
    /// `@`
    At,
    /// A `'` not starting a literal, as in `'{...}` or `int'(x)`.
    Tick,
    Question,
    Equals,

    // === Operators ===
    DoubleEquals,
    BangEquals,
    TripleEquals,
    BangDoubleEquals,
    WildcardEq,
    WildcardNeq,
    LessThan,
    LessEquals,
    GreaterThan,
    GreaterEquals,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Percent,
    Ampersand,
    DoubleAmpersand,
    Pipe,
    DoublePipe,
    Caret,
    TildeCaret,
    Tilde,
    TildeAmpersand,
    TildePipe,
    Bang,
    DoubleLess,
    DoubleGreater,
    TripleLess,
    TripleGreater,
    PlusColon,
    MinusColon,

    // === Identifiers and special ===
    Identifier,
    EscapedIdentifier,
    SystemIdentifier,
    Eof,
    Error,
}

impl SvToken {
    /// Returns `true` for keywords that start a built-in data type.
    pub fn is_builtin_type(self) -> bool {
        matches!(
            self,
            SvToken::Logic
                | SvToken::Bit
                | SvToken::Reg
                | SvToken::Byte
                | SvToken::Shortint
                | SvToken::Int
                | SvToken::Longint
                | SvToken::Integer
                | SvToken::Time
                | SvToken::Real
                | SvToken::Shortreal
                | SvToken::Realtime
                | SvToken::String
        )
    }

    /// Returns `true` for keywords that open a block closed by a matching
    /// `end*` keyword.
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            SvToken::Begin
                | SvToken::Fork
                | SvToken::Case
                | SvToken::Casex
                | SvToken::Casez
                | SvToken::Generate
                | SvToken::Task
                | SvToken::Function
                | SvToken::Class
                | SvToken::Clocking
                | SvToken::Property
                | SvToken::Sequence
                | SvToken::Covergroup
                | SvToken::Checker
                | SvToken::Specify
                | SvToken::Primitive
                | SvToken::Table
                | SvToken::Config
        )
    }

    /// Returns `true` for keywords that close a block.
    pub fn closes_block(self) -> bool {
        matches!(
            self,
            SvToken::End
                | SvToken::Join
                | SvToken::JoinAny
                | SvToken::JoinNone
                | SvToken::Endcase
                | SvToken::Endgenerate
                | SvToken::Endtask
                | SvToken::Endfunction
                | SvToken::Endclass
                | SvToken::Endclocking
                | SvToken::Endproperty
                | SvToken::Endsequence
                | SvToken::Endgroup
                | SvToken::Endchecker
                | SvToken::Endspecify
                | SvToken::Endprimitive
                | SvToken::Endtable
                | SvToken::Endconfig
        )
    }

    /// Returns `true` for the keywords that open a design unit.
    pub fn is_unit_start(self) -> bool {
        matches!(self, SvToken::Module | SvToken::Interface | SvToken::Program)
    }
}

/// Looks up a keyword by its (case-sensitive) text.
pub fn lookup_keyword(text: &str) -> Option<SvToken> {
    let kw = match text {
        "module" => SvToken::Module,
        "endmodule" => SvToken::Endmodule,
        "interface" => SvToken::Interface,
        "endinterface" => SvToken::Endinterface,
        "program" => SvToken::Program,
        "endprogram" => SvToken::Endprogram,
        "logic" => SvToken::Logic,
        "bit" => SvToken::Bit,
        "reg" => SvToken::Reg,
        "byte" => SvToken::Byte,
        "shortint" => SvToken::Shortint,
        "int" => SvToken::Int,
        "longint" => SvToken::Longint,
        "integer" => SvToken::Integer,
        "time" => SvToken::Time,
        "real" => SvToken::Real,
        "shortreal" => SvToken::Shortreal,
        "realtime" => SvToken::Realtime,
        "string" => SvToken::String,
        "signed" => SvToken::Signed,
        "unsigned" => SvToken::Unsigned,
        "always" => SvToken::Always,
        "always_comb" => SvToken::AlwaysComb,
        "always_ff" => SvToken::AlwaysFf,
        "always_latch" => SvToken::AlwaysLatch,
        "initial" => SvToken::Initial,
        "final" => SvToken::Final,
        "assign" => SvToken::Assign,
        "deassign" => SvToken::Deassign,
        "force" => SvToken::Force,
        "release" => SvToken::Release,
        "defparam" => SvToken::Defparam,
        "alias" => SvToken::Alias,
        "bind" => SvToken::Bind,
        "wire" => SvToken::Wire,
        "tri" => SvToken::Tri,
        "wand" => SvToken::Wand,
        "wor" => SvToken::Wor,
        "uwire" => SvToken::Uwire,
        "supply0" => SvToken::Supply0,
        "supply1" => SvToken::Supply1,
        "var" => SvToken::Var,
        "event" => SvToken::Event,
        "parameter" => SvToken::Parameter,
        "localparam" => SvToken::Localparam,
        "specparam" => SvToken::Specparam,
        "genvar" => SvToken::Genvar,
        "typedef" => SvToken::Typedef,
        "enum" => SvToken::Enum,
        "struct" => SvToken::Struct,
        "union" => SvToken::Union,
        "packed" => SvToken::Packed,
        "const" => SvToken::Const,
        "static" => SvToken::Static,
        "automatic" => SvToken::Automatic,
        "input" => SvToken::Input,
        "output" => SvToken::Output,
        "inout" => SvToken::Inout,
        "ref" => SvToken::Ref,
        "import" => SvToken::Import,
        "export" => SvToken::Export,
        "package" => SvToken::Package,
        "endpackage" => SvToken::Endpackage,
        "modport" => SvToken::Modport,
        "let" => SvToken::Let,
        "and" => SvToken::And,
        "or" => SvToken::Or,
        "nand" => SvToken::Nand,
        "nor" => SvToken::Nor,
        "xor" => SvToken::Xor,
        "xnor" => SvToken::Xnor,
        "not" => SvToken::Not,
        "buf" => SvToken::Buf,
        "begin" => SvToken::Begin,
        "end" => SvToken::End,
        "fork" => SvToken::Fork,
        "join" => SvToken::Join,
        "join_any" => SvToken::JoinAny,
        "join_none" => SvToken::JoinNone,
        "case" => SvToken::Case,
        "casex" => SvToken::Casex,
        "casez" => SvToken::Casez,
        "endcase" => SvToken::Endcase,
        "default" => SvToken::Default,
        "generate" => SvToken::Generate,
        "endgenerate" => SvToken::Endgenerate,
        "if" => SvToken::If,
        "else" => SvToken::Else,
        "for" => SvToken::For,
        "foreach" => SvToken::Foreach,
        "while" => SvToken::While,
        "do" => SvToken::Do,
        "forever" => SvToken::Forever,
        "repeat" => SvToken::Repeat,
        "task" => SvToken::Task,
        "endtask" => SvToken::Endtask,
        "function" => SvToken::Function,
        "endfunction" => SvToken::Endfunction,
        "return" => SvToken::Return,
        "void" => SvToken::Void,
        "class" => SvToken::Class,
        "endclass" => SvToken::Endclass,
        "virtual" => SvToken::Virtual,
        "extern" => SvToken::Extern,
        "pure" => SvToken::Pure,
        "clocking" => SvToken::Clocking,
        "endclocking" => SvToken::Endclocking,
        "property" => SvToken::Property,
        "endproperty" => SvToken::Endproperty,
        "sequence" => SvToken::Sequence,
        "endsequence" => SvToken::Endsequence,
        "covergroup" => SvToken::Covergroup,
        "endgroup" => SvToken::Endgroup,
        "checker" => SvToken::Checker,
        "endchecker" => SvToken::Endchecker,
        "specify" => SvToken::Specify,
        "endspecify" => SvToken::Endspecify,
        "primitive" => SvToken::Primitive,
        "endprimitive" => SvToken::Endprimitive,
        "table" => SvToken::Table,
        "endtable" => SvToken::Endtable,
        "config" => SvToken::Config,
        "endconfig" => SvToken::Endconfig,
        "assert" => SvToken::Assert,
        "assume" => SvToken::Assume,
        "cover" => SvToken::Cover,
        "posedge" => SvToken::Posedge,
        "negedge" => SvToken::Negedge,
        "edge" => SvToken::Edge,
        "wait" => SvToken::Wait,
        "disable" => SvToken::Disable,
        "unique" => SvToken::Unique,
        "priority" => SvToken::Priority,
        "inside" => SvToken::Inside,
        "break" => SvToken::Break,
        "continue" => SvToken::Continue,
        _ => return None,
    };
    Some(kw)
}

/// A token kind with its location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Kind.
    pub kind: SvToken,
    /// Location of the token text.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(lookup_keyword("module"), Some(SvToken::Module));
        assert_eq!(lookup_keyword("Module"), None);
        assert_eq!(lookup_keyword("foo"), None);
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        assert_eq!(lookup_keyword("assign"), Some(SvToken::Assign));
        assert_eq!(lookup_keyword("task"), Some(SvToken::Task));
        assert_eq!(lookup_keyword("join_none"), Some(SvToken::JoinNone));
        assert_eq!(lookup_keyword("always_ff"), Some(SvToken::AlwaysFf));
    }

    #[test]
    fn block_keywords_pair_up() {
        assert!(SvToken::Task.opens_block());
        assert!(SvToken::Endtask.closes_block());
        assert!(SvToken::Begin.opens_block());
        assert!(SvToken::JoinAny.closes_block());
        assert!(!SvToken::Assign.opens_block());
        assert!(!SvToken::Endmodule.closes_block());
    }

    #[test]
    fn builtin_types() {
        assert!(SvToken::Logic.is_builtin_type());
        assert!(SvToken::Longint.is_builtin_type());
        assert!(!SvToken::Signed.is_builtin_type());
        assert!(!SvToken::Identifier.is_builtin_type());
    }

    #[test]
    fn unit_starts() {
        assert!(SvToken::Module.is_unit_start());
        assert!(SvToken::Program.is_unit_start());
        assert!(!SvToken::Endmodule.is_unit_start());
    }
}
