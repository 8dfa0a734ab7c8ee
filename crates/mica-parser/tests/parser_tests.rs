//! Expression and statement parsing tests.

mod common;

use common::Source;
use mica_core::ParseErrorKind;
use mica_parser::token::{IdfContext, Literal, TokenKind};
use mica_parser::{BlockKind, DataType, Expr, Parser, Stmt};
use ordered_float::OrderedFloat;

fn expr_stmt(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Expr(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn binary(expr: &Expr) -> (&Expr, TokenKind, &Expr) {
    match expr {
        Expr::Binary(b) => (&b.left, b.op, &b.right),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

fn num(expr: &Expr) -> f64 {
    match expr {
        Expr::Literal(Literal::Num(OrderedFloat(v))) => *v,
        other => panic!("expected numeric literal, got {:?}", other),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let mut src = Source::new();
    src.num(1.0).tk(TokenKind::Plus).num(2.0).tk(TokenKind::Star).num(3.0);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let (left, op, right) = binary(expr_stmt(&unit.global.stmts[0]));
    assert_eq!(op, TokenKind::Plus);
    assert_eq!(num(left), 1.0);
    let (rl, rop, rr) = binary(right);
    assert_eq!(rop, TokenKind::Star);
    assert_eq!(num(rl), 2.0);
    assert_eq!(num(rr), 3.0);
}

#[test]
fn subtraction_is_left_associative() {
    let mut src = Source::new();
    src.idf("a")
        .tk(TokenKind::Minus)
        .idf("b")
        .tk(TokenKind::Minus)
        .idf("c");
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let (left, op, _right) = binary(expr_stmt(&unit.global.stmts[0]));
    assert_eq!(op, TokenKind::Minus);
    let (_, inner_op, _) = binary(left);
    assert_eq!(inner_op, TokenKind::Minus);
}

#[test]
fn parentheses_override_precedence() {
    let mut src = Source::new();
    src.tk(TokenKind::LeftParen)
        .num(1.0)
        .tk(TokenKind::Plus)
        .num(2.0)
        .tk(TokenKind::RightParen)
        .tk(TokenKind::Star)
        .num(3.0);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let (left, op, right) = binary(expr_stmt(&unit.global.stmts[0]));
    assert_eq!(op, TokenKind::Star);
    assert_eq!(num(right), 3.0);
    let (_, inner_op, _) = binary(left);
    assert_eq!(inner_op, TokenKind::Plus);
}

#[test]
fn dotted_chains_form_one_value_reference() {
    let mut src = Source::new();
    let (a, b, c) = (src.id_of("a"), src.id_of("b"), src.id_of("c"));
    src.idf("a").tk(TokenKind::Dot).idf("b").tk(TokenKind::Dot).idf("c");
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[0]) {
        Expr::Value(value) => {
            assert_eq!(value.name.components(), &[a, b, c]);
            assert_eq!(value.ctx, IdfContext::Local);
            assert!(value.binding.is_some());
        }
        other => panic!("expected value reference, got {:?}", other),
    }
}

#[test]
fn calls_collect_arguments() {
    let mut src = Source::new();
    src.idf("f")
        .tk(TokenKind::LeftParen)
        .num(1.0)
        .tk(TokenKind::Comma)
        .num(2.0)
        .tk(TokenKind::RightParen);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[0]) {
        Expr::Call(call) => {
            assert_eq!(call.args.len(), 2);
            assert!(call.callee.binding.is_some());
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn ternary_spans_both_arms() {
    let mut src = Source::new();
    src.idf("cond")
        .tk(TokenKind::Question)
        .num(1.0)
        .tk(TokenKind::Colon)
        .num(2.0);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[0]) {
        Expr::Ternary(t) => {
            assert_eq!(num(&t.then_value), 1.0);
            assert_eq!(num(&t.else_value), 2.0);
        }
        other => panic!("expected ternary, got {:?}", other),
    }
}

#[test]
fn cast_requires_closing_angle_for_plain_types() {
    let mut src = Source::new();
    src.tk(TokenKind::Less)
        .prim(mica_parser::PrimType::Num)
        .tk(TokenKind::Greater)
        .idf("x");
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[0]) {
        Expr::Cast(cast) => assert_eq!(cast.ty, DataType::Num),
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn array_casts_close_themselves() {
    let mut src = Source::new();
    src.tk(TokenKind::Less)
        .prim(mica_parser::PrimType::Str)
        .tk(TokenKind::LeftBracket)
        .tk(TokenKind::RightBracket)
        .idf("x");
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[0]) {
        Expr::Cast(cast) => assert_eq!(cast.ty, DataType::Arr(Box::new(DataType::Str))),
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn assignment_to_a_literal_is_reported_but_recovered() {
    let mut src = Source::new();
    src.num(1.0).tk(TokenKind::Assign).num(2.0);
    let tokens = src.finish();

    let (unit, errors) = Parser::parse_lenient(&tokens, &src.interner);
    assert!(!unit.success);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::InvalidAssignTarget);
    // the left side survives as the statement's expression
    assert_eq!(num(expr_stmt(&unit.global.stmts[0])), 1.0);
}

#[test]
fn assignment_to_a_variable_parses() {
    let mut src = Source::new();
    src.tk(TokenKind::Let).idf("x").tk(TokenKind::Assign).num(1.0).nl();
    src.idf("x").tk(TokenKind::Assign).num(2.0);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    match expr_stmt(&unit.global.stmts[1]) {
        Expr::Assign(assign) => assert_eq!(num(&assign.value), 2.0),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn statements_require_newline_or_semicolon() {
    let mut src = Source::new();
    src.tk(TokenKind::Let).idf("x").tk(TokenKind::Assign).num(1.0);
    src.tk(TokenKind::Let).idf("y").tk(TokenKind::Assign).num(2.0);
    let tokens = src.finish();

    let (_, errors) = Parser::parse_lenient(&tokens, &src.interner);
    assert!(errors
        .iter()
        .any(|e| e.kind == ParseErrorKind::MissingTerminator));
}

#[test]
fn semicolon_separates_statements_on_one_line() {
    let mut src = Source::new();
    src.tk(TokenKind::Let)
        .idf("x")
        .tk(TokenKind::Assign)
        .num(1.0)
        .tk(TokenKind::Semicolon)
        .tk(TokenKind::Let)
        .idf("y")
        .tk(TokenKind::Assign)
        .num(2.0);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    assert_eq!(unit.global.stmts.len(), 2);
}

#[test]
fn closing_braces_do_not_terminate_statements() {
    let mut src = Source::new();
    src.tk(TokenKind::LeftBrace)
        .tk(TokenKind::Let)
        .idf("x")
        .tk(TokenKind::Assign)
        .num(1.0)
        .tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let (unit, errors) = Parser::parse_lenient(&tokens, &src.interner);
    assert!(!unit.success);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::MissingTerminator);
    // the block still closes and keeps the declaration
    let Stmt::Block(block) = &unit.global.stmts[0] else {
        panic!("expected block statement");
    };
    assert_eq!(block.stmts.len(), 1);
}

#[test]
fn semicolon_satisfies_the_terminator_before_a_closing_brace() {
    let mut src = Source::new();
    src.tk(TokenKind::LeftBrace)
        .tk(TokenKind::Let)
        .idf("x")
        .tk(TokenKind::Assign)
        .num(1.0)
        .tk(TokenKind::Semicolon)
        .tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    assert!(unit.success);
}

#[test]
fn return_outside_a_function_is_rejected() {
    let mut src = Source::new();
    src.tk(TokenKind::Return).num(1.0);
    let tokens = src.finish();

    let (unit, errors) = Parser::parse_lenient(&tokens, &src.interner);
    assert!(!unit.success);
    assert_eq!(errors[0].kind, ParseErrorKind::ReturnOutsideFunction);
    assert!(unit.global.stmts.is_empty());
}

#[test]
fn freestanding_blocks_get_their_own_scope() {
    let mut src = Source::new();
    let x = src.id_of("x");
    src.tk(TokenKind::LeftBrace).nl();
    src.tk(TokenKind::Let).idf("x").tk(TokenKind::Assign).num(1.0).nl();
    src.tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let Stmt::Block(block) = &unit.global.stmts[0] else {
        panic!("expected block statement");
    };
    assert_ne!(block.scope, unit.global.scope);
    assert!(unit.scopes.lookup_local(block.scope, x).is_some());
    assert!(unit.scopes.lookup_local(unit.global.scope, x).is_none());
}

#[test]
fn if_ladder_collects_all_branches() {
    let mut src = Source::new();
    src.tk(TokenKind::If).idf("a").tk(TokenKind::LeftBrace).nl();
    src.tk(TokenKind::RightBrace)
        .tk(TokenKind::Else)
        .tk(TokenKind::If)
        .idf("b")
        .tk(TokenKind::LeftBrace)
        .nl();
    src.tk(TokenKind::RightBrace)
        .tk(TokenKind::Else)
        .tk(TokenKind::LeftBrace)
        .nl();
    src.tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let Stmt::If(ladder) = &unit.global.stmts[0] else {
        panic!("expected if statement");
    };
    assert_eq!(ladder.branches.len(), 3);
    assert!(ladder.branches[0].condition.is_some());
    assert!(ladder.branches[1].condition.is_some());
    assert!(ladder.branches[2].condition.is_none());
    assert_eq!(ladder.kind, BlockKind::Default);
}

#[test]
fn parsing_is_idempotent_over_one_stream() {
    let mut src = Source::new();
    src.tk(TokenKind::Let).idf("x").tk(TokenKind::Assign).num(1.0).nl();
    src.tk(TokenKind::If)
        .idf("x")
        .tk(TokenKind::Less)
        .num(2.0)
        .tk(TokenKind::LeftBrace)
        .nl();
    src.idf("x").tk(TokenKind::Assign).idf("x").tk(TokenKind::Plus).num(1.0).nl();
    src.tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let first = Parser::parse(&tokens, &src.interner).unwrap();
    let second = Parser::parse(&tokens, &src.interner).unwrap();
    assert_eq!(first.global, second.global);
    assert!(first.success && second.success);
}

#[test]
fn error_recovery_keeps_later_statements() {
    let mut src = Source::new();
    // '?' alone is not an expression; the next line still parses
    src.tk(TokenKind::Question).nl();
    src.tk(TokenKind::Let).idf("x").tk(TokenKind::Assign).num(1.0).nl();
    let tokens = src.finish();

    let (unit, errors) = Parser::parse_lenient(&tokens, &src.interner);
    assert!(!unit.success);
    assert_eq!(errors[0].kind, ParseErrorKind::ExpectedExpression);
    assert!(unit
        .global
        .stmts
        .iter()
        .any(|s| matches!(s, Stmt::Let(_))));
}

#[test]
fn global_context_binds_at_the_root() {
    let mut src = Source::new();
    let g = src.id_of("g");
    src.tk(TokenKind::LeftBrace).nl();
    src.ctx(IdfContext::Global).tk(TokenKind::Dot).idf("g").nl();
    src.tk(TokenKind::RightBrace);
    let tokens = src.finish();

    let unit = Parser::parse(&tokens, &src.interner).unwrap();
    let root = unit.scopes.root();
    let bound = unit.scopes.lookup_local(root, g);
    assert!(bound.is_some());
}
