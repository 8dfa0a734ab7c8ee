//! Token definitions: the input contract between the external lexer and the
//! parser.
//!
//! The parser consumes a finite, random-access sequence of [`Token`]s ending
//! in exactly one [`TokenKind::Eof`] sentinel. Tokens carry their source
//! location and, where applicable, a value payload: a literal value, an
//! interned-string handle, or a primitive-type tag.

use mica_core::{Span, StrId};
use ordered_float::OrderedFloat;
use std::fmt;

/// A token from the source code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// The type of token.
    pub kind: TokenKind,
    /// Location in source.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A literal payload carried by a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Numeric literal.
    Num(OrderedFloat<f64>),
    /// String literal, interned by the lexer.
    Str(StrId),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

/// Primitive type tag carried by a primitive-type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    Num,
    Str,
    Bool,
}

/// Resolution context for an identifier chain.
///
/// `Local` searches outward from the nearest enclosing scope. `Global` is the
/// explicit context qualifier that redirects resolution to the root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdfContext {
    #[default]
    Local,
    Global,
}

/// All token kinds the parser consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Payload carriers
    // =========================================
    /// Literal value: `1`, `"hi"`, `true`, `null`
    Literal(Literal),
    /// User-defined identifier (interned)
    Identifier(StrId),
    /// Primitive type keyword: `num`, `str`, `bool`
    PrimType(PrimType),
    /// Context qualifier keyword: `global`, `local`
    Context(IdfContext),

    // =========================================
    // Keywords
    // =========================================
    /// `let`
    Let,
    /// `if`
    If,
    /// `else`
    Else,
    /// `func`
    Func,
    /// `class`
    Class,
    /// `namespace`
    Namespace,
    /// `return`
    Return,
    /// `operator`
    Operator,
    /// `friend`
    Friend,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // =========================================
    // Punctuation
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `?`
    Question,

    /// End-of-input sentinel; exactly one, at the tail of the stream.
    Eof,
}

impl TokenKind {
    /// Whether this token can head an operator-overload declaration.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Bang
                | TokenKind::Assign
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let text = match self {
            Literal(_) => "literal",
            Identifier(_) => "identifier",
            PrimType(_) => "type",
            Context(_) => "context qualifier",
            Let => "'let'",
            If => "'if'",
            Else => "'else'",
            Func => "'func'",
            Class => "'class'",
            Namespace => "'namespace'",
            Return => "'return'",
            Operator => "'operator'",
            Friend => "'friend'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Bang => "'!'",
            Assign => "'='",
            Equal => "'=='",
            NotEqual => "'!='",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            LeftBracket => "'['",
            RightBracket => "']'",
            Comma => "','",
            Dot => "'.'",
            Colon => "':'",
            Semicolon => "';'",
            Question => "'?'",
            Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}
