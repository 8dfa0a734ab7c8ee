//! End-to-end checks through the facade crate.

use mica::Parser;
use mica::core::{Interner, ParseErrorKind, Span};
use mica::parser::token::{Token, TokenKind};
use mica::parser::{NameKind, Stmt};
use ordered_float::OrderedFloat;

/// `let answer = 42` followed by `answer`, laid out on two lines.
fn sample(interner: &mut Interner) -> Vec<Token> {
    let answer = interner.intern("answer");
    let num = TokenKind::Literal(mica::parser::Literal::Num(OrderedFloat(42.0)));
    vec![
        Token::new(TokenKind::Let, Span::new(1, 1, 3)),
        Token::new(TokenKind::Identifier(answer), Span::new(1, 5, 6)),
        Token::new(TokenKind::Assign, Span::new(1, 12, 1)),
        Token::new(num, Span::new(1, 14, 2)),
        Token::new(TokenKind::Identifier(answer), Span::new(2, 1, 6)),
        Token::new(TokenKind::Eof, Span::new(2, 7, 0)),
    ]
}

#[test]
fn a_unit_parses_into_statements_and_scopes() {
    let mut interner = Interner::new();
    let tokens = sample(&mut interner);
    let answer = interner.intern("answer");

    let unit = Parser::parse(&tokens, &interner).unwrap();
    assert!(unit.success);
    assert_eq!(unit.global.stmts.len(), 2);
    assert!(matches!(unit.global.stmts[0], Stmt::Let(_)));

    let id = unit.scopes.lookup_local(unit.scopes.root(), answer).unwrap();
    assert!(matches!(unit.scopes.kind(id), NameKind::Variable(_)));
}

#[test]
fn diagnostics_carry_kind_and_location() {
    let interner = Interner::new();
    let tokens = [
        Token::new(TokenKind::Question, Span::new(1, 1, 1)),
        Token::new(TokenKind::Eof, Span::new(1, 2, 0)),
    ];

    let errors = Parser::parse(&tokens, &interner).unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(error.span.line, 1);
}
