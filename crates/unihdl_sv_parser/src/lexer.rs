//! Lexical analysis of SystemVerilog source text.
//!
//! Produces [`Token`]s for what module bodies need: identifiers (plain,
//! escaped and `$system`), reserved words, sized/based, unbased unsized, real
//! and string literals, the operators, and the attribute brackets `(*` /
//! `*)`. Comments are skipped; compiler directives are reported and skipped.
//! Problems go to the [`DiagnosticSink`] as `E100` and produce
//! [`SvToken::Error`] tokens.

use crate::token::{lookup_keyword, SvToken, Token};
use unihdl_diagnostics::code::{Category, DiagnosticCode};
use unihdl_diagnostics::{Diagnostic, DiagnosticSink};
use unihdl_source::{FileId, Span};

/// Code of every lexer diagnostic.
pub const LEX_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 100);

/// Lexes `source` into tokens. The result always ends with [`SvToken::Eof`].
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        attr_depth: 0,
        file,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    /// Open `(*` brackets; `*)` only closes an attribute inside one, so that
    /// the `.*)` of a wildcard port connection still lexes as `.`, `*`, `)`.
    attr_depth: u32,
    file: FileId,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: SvToken::Eof,
                    span: self.span_from(self.pos),
                });
                return tokens;
            }
            tokens.push(self.next_token());
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn token(&self, kind: SvToken, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn error(&self, msg: &str, span: Span) {
        self.sink.emit(Diagnostic::error(LEX_ERROR, msg, span));
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_ascii_whitespace() {
                self.pos += 1;
            }
            match (self.peek(), self.peek_at(1)) {
                (b'/', b'/') => {
                    while self.pos < self.source.len() && self.peek() != b'\n' {
                        self.pos += 1;
                    }
                }
                (b'/', b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos >= self.source.len() {
                            self.error("unterminated block comment", self.span_from(start));
                            break;
                        }
                        if self.peek() == b'*' && self.peek_at(1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (b'`', _) => {
                    let start = self.pos;
                    while self.pos < self.source.len() && self.peek() != b'\n' {
                        self.pos += 1;
                    }
                    self.error(
                        "compiler directives are not supported",
                        self.span_from(start),
                    );
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            self.eat_while(is_ident_char);
            let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
            let kind = lookup_keyword(text).unwrap_or(SvToken::Identifier);
            return self.token(kind, start);
        }
        if b == b'\\' {
            self.pos += 1;
            self.eat_while(|c| !c.is_ascii_whitespace());
            if self.pos == start + 1 {
                self.error("empty escaped identifier", self.span_from(start));
                return self.token(SvToken::Error, start);
            }
            return self.token(SvToken::EscapedIdentifier, start);
        }
        if b == b'$' {
            self.pos += 1;
            if !is_ident_start(self.peek()) {
                self.error("expected identifier after '$'", self.span_from(start));
                return self.token(SvToken::Error, start);
            }
            self.eat_while(is_ident_char);
            return self.token(SvToken::SystemIdentifier, start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'\'' && is_base_char(self.peek_at(1)) {
            self.pos += 1;
            self.lex_base_and_digits();
            return self.token(SvToken::SizedLiteral, start);
        }
        if b == b'\'' && matches!(self.peek_at(1), b'0' | b'1' | b'x' | b'X' | b'z' | b'Z') {
            self.pos += 2;
            return self.token(SvToken::UnbasedUnsizedLiteral, start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        self.lex_operator(start)
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.pos < self.source.len() && pred(self.source[self.pos]) {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_while(|c| c.is_ascii_digit() || c == b'_');
        let size_end = self.pos;

        // Optional whitespace is allowed between size and base: `8 'hFF`.
        let save = self.pos;
        self.eat_while(|c| c == b' ' || c == b'\t');
        if self.peek() == b'\'' && is_base_char(self.peek_at(1)) {
            self.pos += 1;
            self.lex_base_and_digits();
            if !width_fits(&self.source[start..size_end]) {
                self.error("literal width does not fit in 32 bits", self.span_from(start));
                return self.token(SvToken::Error, start);
            }
            return self.token(SvToken::SizedLiteral, start);
        }
        self.pos = save;

        let mut real = false;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit() || c == b'_');
            real = true;
        }
        if matches!(self.peek(), b'e' | b'E') {
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            self.eat_while(|c| c.is_ascii_digit() || c == b'_');
            real = true;
        }
        let kind = if real {
            SvToken::RealLiteral
        } else {
            SvToken::IntLiteral
        };
        self.token(kind, start)
    }

    /// Consumes `[s]<base><digits>` after the tick.
    fn lex_base_and_digits(&mut self) {
        if matches!(self.peek(), b's' | b'S') {
            self.pos += 1;
        }
        let base = self.peek().to_ascii_lowercase();
        if !matches!(base, b'b' | b'o' | b'd' | b'h') {
            self.error("expected base after signed flag", self.span_from(self.pos));
            return;
        }
        self.pos += 1;
        self.eat_while(|c| c == b' ' || c == b'\t');
        self.eat_while(|c| {
            let c = c.to_ascii_lowercase();
            c == b'_'
                || matches!(c, b'x' | b'z' | b'?')
                || match base {
                    b'b' => matches!(c, b'0' | b'1'),
                    b'o' => matches!(c, b'0'..=b'7'),
                    b'd' => c.is_ascii_digit(),
                    _ => c.is_ascii_hexdigit(),
                }
        });
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        loop {
            match self.peek() {
                0 | b'\n' => {
                    self.error("unterminated string literal", self.span_from(start));
                    return self.token(SvToken::Error, start);
                }
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'"' => {
                    self.pos += 1;
                    return self.token(SvToken::StringLiteral, start);
                }
                _ => self.pos += 1,
            }
        }
    }

    fn lex_operator(&mut self, start: usize) -> Token {
        let b = self.peek();
        let next = self.peek_at(1);
        let third = self.peek_at(2);
        let (kind, len) = match b {
            b'(' if next == b'*' && third != b')' => {
                self.attr_depth += 1;
                (SvToken::AttrOpen, 2)
            }
            b'*' if next == b')' && self.attr_depth > 0 => {
                self.attr_depth -= 1;
                (SvToken::AttrClose, 2)
            }
            b'(' => (SvToken::LeftParen, 1),
            b')' => (SvToken::RightParen, 1),
            b'[' => (SvToken::LeftBracket, 1),
            b']' => (SvToken::RightBracket, 1),
            b'{' => (SvToken::LeftBrace, 1),
            b'}' => (SvToken::RightBrace, 1),
            b',' => (SvToken::Comma, 1),
            b';' => (SvToken::Semicolon, 1),
            b'.' => (SvToken::Dot, 1),
            b'#' => (SvToken::Hash, 1),
            b'@' => (SvToken::At, 1),
            b'\'' => (SvToken::Tick, 1),
            b'?' => (SvToken::Question, 1),
            b':' if next == b':' => (SvToken::ColonColon, 2),
            b':' => (SvToken::Colon, 1),
            b'=' => match (next, third) {
                (b'=', b'=') => (SvToken::TripleEquals, 3),
                (b'=', b'?') => (SvToken::WildcardEq, 3),
                (b'=', _) => (SvToken::DoubleEquals, 2),
                _ => (SvToken::Equals, 1),
            },
            b'!' => match (next, third) {
                (b'=', b'=') => (SvToken::BangDoubleEquals, 3),
                (b'=', b'?') => (SvToken::WildcardNeq, 3),
                (b'=', _) => (SvToken::BangEquals, 2),
                _ => (SvToken::Bang, 1),
            },
            b'<' => match (next, third) {
                (b'<', b'<') => (SvToken::TripleLess, 3),
                (b'<', _) => (SvToken::DoubleLess, 2),
                (b'=', _) => (SvToken::LessEquals, 2),
                _ => (SvToken::LessThan, 1),
            },
            b'>' => match (next, third) {
                (b'>', b'>') => (SvToken::TripleGreater, 3),
                (b'>', _) => (SvToken::DoubleGreater, 2),
                (b'=', _) => (SvToken::GreaterEquals, 2),
                _ => (SvToken::GreaterThan, 1),
            },
            b'+' if next == b':' => (SvToken::PlusColon, 2),
            b'+' => (SvToken::Plus, 1),
            b'-' if next == b':' => (SvToken::MinusColon, 2),
            b'-' => (SvToken::Minus, 1),
            b'*' if next == b'*' => (SvToken::DoubleStar, 2),
            b'*' => (SvToken::Star, 1),
            b'/' => (SvToken::Slash, 1),
            b'%' => (SvToken::Percent, 1),
            b'&' if next == b'&' => (SvToken::DoubleAmpersand, 2),
            b'&' => (SvToken::Ampersand, 1),
            b'|' if next == b'|' => (SvToken::DoublePipe, 2),
            b'|' => (SvToken::Pipe, 1),
            b'^' if next == b'~' => (SvToken::TildeCaret, 2),
            b'^' => (SvToken::Caret, 1),
            b'~' => match next {
                b'^' => (SvToken::TildeCaret, 2),
                b'&' => (SvToken::TildeAmpersand, 2),
                b'|' => (SvToken::TildePipe, 2),
                _ => (SvToken::Tilde, 1),
            },
            _ => {
                // Skip a whole UTF-8 sequence so the next token starts on a
                // character boundary.
                let width = utf8_width(b);
                self.pos = (self.pos + width).min(self.source.len());
                let text = String::from_utf8_lossy(&self.source[start..self.pos]).into_owned();
                self.error(
                    &format!("unrecognized character '{text}'"),
                    self.span_from(start),
                );
                return self.token(SvToken::Error, start);
            }
        };
        self.pos += len;
        self.token(kind, start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_base_char(b: u8) -> bool {
    matches!(
        b.to_ascii_lowercase(),
        b'b' | b'o' | b'd' | b'h' | b's'
    )
}

/// Returns `true` if the size digits of a sized literal fit a `u32` width.
fn width_fits(size: &[u8]) -> bool {
    let mut width: u32 = 0;
    for &c in size.iter().filter(|&&c| c != b'_') {
        let digit = u32::from(c - b'0');
        match width.checked_mul(10).and_then(|w| w.checked_add(digit)) {
            Some(w) => width = w,
            None => return false,
        }
    }
    true
}

fn utf8_width(first: u8) -> usize {
    match first {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}
