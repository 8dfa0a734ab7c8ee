//! Hand-built token streams for parser tests.
//!
//! The builder assigns one line per `nl()` call and a fresh column per
//! token, so statement termination by line break behaves as it would with
//! lexed source.

use mica_core::{Interner, Span, StrId};
use mica_parser::token::{IdfContext, Literal, PrimType, Token, TokenKind};
use ordered_float::OrderedFloat;

pub struct Source {
    tokens: Vec<Token>,
    pub interner: Interner,
    line: u32,
    col: u32,
}

impl Source {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            interner: Interner::new(),
            line: 1,
            col: 1,
        }
    }

    /// Append a token on the current line.
    pub fn tk(&mut self, kind: TokenKind) -> &mut Self {
        self.tokens.push(Token::new(kind, Span::new(self.line, self.col, 1)));
        self.col += 2;
        self
    }

    /// Start a new line.
    pub fn nl(&mut self) -> &mut Self {
        self.line += 1;
        self.col = 1;
        self
    }

    pub fn idf(&mut self, name: &str) -> &mut Self {
        let id = self.interner.intern(name);
        self.tk(TokenKind::Identifier(id))
    }

    pub fn num(&mut self, value: f64) -> &mut Self {
        self.tk(TokenKind::Literal(Literal::Num(OrderedFloat(value))))
    }

    #[allow(dead_code)]
    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.tk(TokenKind::Literal(Literal::Bool(value)))
    }

    #[allow(dead_code)]
    pub fn prim(&mut self, prim: PrimType) -> &mut Self {
        self.tk(TokenKind::PrimType(prim))
    }

    #[allow(dead_code)]
    pub fn ctx(&mut self, ctx: IdfContext) -> &mut Self {
        self.tk(TokenKind::Context(ctx))
    }

    /// Handle for a name without emitting a token.
    pub fn id_of(&mut self, name: &str) -> StrId {
        self.interner.intern(name)
    }

    /// Close the stream with the sentinel.
    pub fn finish(&mut self) -> Vec<Token> {
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.line, self.col, 0)));
        std::mem::take(&mut self.tokens)
    }
}
