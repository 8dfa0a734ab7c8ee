//! Parser state, cursor primitives, and the panic-mode recovery protocol.
//!
//! The parser owns a cursor over the token slice, the scope graph it
//! populates, and the error accumulator. Syntax methods live in the
//! expression, type, and statement submodules; everything here is the shared
//! machinery they build on.
//!
//! Recovery never aborts the unit: a reported error is followed either by a
//! skip to the next statement-looking token ([`Parser::panic_mode`]) or to a
//! single missing delimiter ([`Parser::panic_until`]), and parsing resumes.

use mica_core::{Interner, ParseError, ParseErrorKind, ParseErrors, Span, StrId};

use crate::scope::ScopeTree;
use crate::stmt::Block;
use crate::token::{IdfContext, Literal, Token, TokenKind};

/// The populated output of parsing one compilation unit.
#[derive(Debug)]
pub struct Unit {
    /// The scope graph, including every class and function declared.
    pub scopes: ScopeTree,
    /// The top-level statement sequence, rooted in the global scope.
    pub global: Block,
    /// False when any error was recorded during the parse.
    pub success: bool,
}

/// Recursive-descent parser over a lexed token stream.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    pub(crate) interner: &'a Interner,
    pub(crate) scopes: ScopeTree,
    pub(crate) errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Parse a compilation unit, failing if any diagnostic was recorded.
    pub fn parse(tokens: &'a [Token], interner: &'a Interner) -> Result<Unit, ParseErrors> {
        let (unit, errors) = Self::parse_lenient(tokens, interner);
        if errors.is_empty() {
            Ok(unit)
        } else {
            Err(errors.into())
        }
    }

    /// Parse a compilation unit, returning whatever could be built alongside
    /// the recorded errors.
    ///
    /// # Panics
    ///
    /// Panics if the token stream does not end with [`TokenKind::Eof`]; the
    /// lexer always emits the sentinel.
    pub fn parse_lenient(
        tokens: &'a [Token],
        interner: &'a Interner,
    ) -> (Unit, Vec<ParseError>) {
        assert!(
            matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)),
            "token stream must end with an Eof sentinel"
        );
        let mut parser = Self {
            tokens,
            pos: 0,
            interner,
            scopes: ScopeTree::new(),
            errors: Vec::new(),
        };
        let global = parser.parse_unit();
        let success = parser.errors.is_empty();
        (
            Unit {
                scopes: parser.scopes,
                global,
                success,
            },
            parser.errors,
        )
    }

    // =========================================
    // Cursor primitives
    // =========================================

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The token after the current one, clamped to the sentinel.
    pub(crate) fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// The most recently consumed token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Advance one token; the cursor never moves past the sentinel.
    pub(crate) fn step(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Whether a line break separates the current token from the previous
    /// one. Line breaks terminate statements.
    pub(crate) fn at_newline(&self) -> bool {
        self.pos == 0 || self.previous().span.line != self.peek().span.line
    }

    /// Consume the current token if its kind matches.
    pub(crate) fn match_tk(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.step();
            true
        } else {
            false
        }
    }

    /// Consume an identifier token, yielding its interned handle.
    pub(crate) fn match_idf(&mut self) -> Option<StrId> {
        if let TokenKind::Identifier(id) = self.peek().kind {
            self.step();
            Some(id)
        } else {
            None
        }
    }

    pub(crate) fn match_literal(&mut self) -> Option<Literal> {
        if let TokenKind::Literal(literal) = self.peek().kind {
            self.step();
            Some(literal)
        } else {
            None
        }
    }

    pub(crate) fn match_context(&mut self) -> Option<IdfContext> {
        if let TokenKind::Context(ctx) = self.peek().kind {
            self.step();
            Some(ctx)
        } else {
            None
        }
    }

    pub(crate) fn token_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    /// Raw cursor position, used by loops to guarantee progress.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    // =========================================
    // Diagnostics and recovery
    // =========================================

    /// Record a diagnostic without moving the cursor.
    pub(crate) fn error(&mut self, kind: ParseErrorKind, span: Span, message: impl Into<String>) {
        self.errors.push(ParseError::new(kind, span, message));
    }

    /// Record a diagnostic at the current token and skip to the next
    /// statement boundary.
    pub(crate) fn error_sync(&mut self, kind: ParseErrorKind, message: impl Into<String>) {
        let span = self.peek().span;
        self.error(kind, span, message);
        self.panic_mode();
    }

    /// Discard tokens until one that can begin or close a statement.
    pub(crate) fn panic_mode(&mut self) {
        while !self.at_end() {
            match self.peek().kind {
                TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Func
                | TokenKind::Class => return,
                _ => self.step(),
            }
        }
    }

    /// Discard tokens until `kind` is found and consumed, or input ends.
    /// Used when a single delimiter, not a whole statement, went missing.
    pub(crate) fn panic_until(&mut self, kind: TokenKind) {
        while !self.at_end() {
            if self.match_tk(kind) {
                return;
            }
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_core::Span;

    fn tokens(kinds: &[TokenKind]) -> Vec<Token> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Token::new(kind, Span::new(1, i as u32 + 1, 1)))
            .chain(std::iter::once(Token::new(
                TokenKind::Eof,
                Span::new(1, kinds.len() as u32 + 1, 0),
            )))
            .collect()
    }

    #[test]
    fn empty_unit_parses_cleanly() {
        let interner = Interner::new();
        let stream = tokens(&[]);
        let unit = Parser::parse(&stream, &interner).unwrap();
        assert!(unit.success);
        assert!(unit.global.stmts.is_empty());
    }

    #[test]
    fn cursor_never_moves_past_the_sentinel() {
        let interner = Interner::new();
        let stream = tokens(&[TokenKind::Plus]);
        let mut parser = Parser {
            tokens: &stream,
            pos: 0,
            interner: &interner,
            scopes: ScopeTree::new(),
            errors: Vec::new(),
        };
        for _ in 0..10 {
            parser.step();
        }
        assert!(parser.at_end());
    }

    #[test]
    fn panic_mode_stops_at_statement_tokens() {
        let interner = Interner::new();
        let stream = tokens(&[TokenKind::Comma, TokenKind::Colon, TokenKind::Let]);
        let mut parser = Parser {
            tokens: &stream,
            pos: 0,
            interner: &interner,
            scopes: ScopeTree::new(),
            errors: Vec::new(),
        };
        parser.panic_mode();
        assert_eq!(parser.peek().kind, TokenKind::Let);
    }

    #[test]
    fn panic_until_consumes_the_delimiter() {
        let interner = Interner::new();
        let stream = tokens(&[TokenKind::Comma, TokenKind::RightBracket, TokenKind::Dot]);
        let mut parser = Parser {
            tokens: &stream,
            pos: 0,
            interner: &interner,
            scopes: ScopeTree::new(),
            errors: Vec::new(),
        };
        parser.panic_until(TokenKind::RightBracket);
        assert_eq!(parser.peek().kind, TokenKind::Dot);
    }
}
