//! Expression syntax.
//!
//! Classic recursive descent, one method per precedence level, loosest
//! first: ternary, assignment, equality, comparison, addition,
//! multiplication, unary, primary. Binary levels loop to stay
//! left-associative; assignment and the ternary arms recurse into the whole
//! expression grammar instead.
//!
//! Value references bind against the scope graph as they are parsed, so a
//! reference ahead of its declaration and the declaration itself converge on
//! one name record.

use mica_core::{ParseErrorKind, StrId};

use crate::expr::{
    AssignExpr, BinaryExpr, CallExpr, CastExpr, Expr, TernaryExpr, UnaryExpr, ValueExpr,
};
use crate::idf::Idf;
use crate::ops;
use crate::parser::Parser;
use crate::scope::ScopeId;
use crate::token::{IdfContext, TokenKind};

impl Parser<'_> {
    /// Parse one expression in `scope`.
    pub(crate) fn expression(&mut self, scope: ScopeId) -> Expr {
        self.ternary(scope)
    }

    fn ternary(&mut self, scope: ScopeId) -> Expr {
        let condition = self.assignment(scope);
        if !self.match_tk(TokenKind::Question) {
            return condition;
        }
        let then_value = self.expression(scope);
        if !self.match_tk(TokenKind::Colon) {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected ':'");
            return Expr::Ternary(Box::new(TernaryExpr {
                condition,
                then_value,
                else_value: Expr::Error,
            }));
        }
        let else_value = self.expression(scope);
        Expr::Ternary(Box::new(TernaryExpr {
            condition,
            then_value,
            else_value,
        }))
    }

    fn assignment(&mut self, scope: ScopeId) -> Expr {
        let expr = self.equality(scope);
        if !self.match_tk(TokenKind::Assign) {
            return expr;
        }
        match expr {
            Expr::Value(target) => {
                let value = self.expression(scope);
                Expr::Assign(Box::new(AssignExpr { target, value }))
            }
            other => {
                // The right side still gets parsed so one bad target does
                // not cascade into follow-on errors.
                let span = self.previous().span;
                let _ = self.expression(scope);
                self.error(
                    ParseErrorKind::InvalidAssignTarget,
                    span,
                    "left side of '=' is not a variable reference",
                );
                other
            }
        }
    }

    fn equality(&mut self, scope: ScopeId) -> Expr {
        let mut expr = self.comparison(scope);
        loop {
            let op = self.peek().kind;
            let table = match op {
                TokenKind::Equal => &ops::EQ,
                TokenKind::NotEqual => &ops::NOT_EQ,
                _ => return expr,
            };
            self.step();
            let right = self.comparison(scope);
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                table,
                right,
            }));
        }
    }

    fn comparison(&mut self, scope: ScopeId) -> Expr {
        let mut expr = self.addition(scope);
        loop {
            let op = self.peek().kind;
            let table = match op {
                TokenKind::Less => &ops::LESS,
                TokenKind::LessEqual => &ops::LESS_EQ,
                TokenKind::Greater => &ops::GREATER,
                TokenKind::GreaterEqual => &ops::GREATER_EQ,
                _ => return expr,
            };
            self.step();
            let right = self.addition(scope);
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                table,
                right,
            }));
        }
    }

    fn addition(&mut self, scope: ScopeId) -> Expr {
        let mut expr = self.multiplication(scope);
        loop {
            let op = self.peek().kind;
            let table = match op {
                TokenKind::Plus => &ops::ADD,
                TokenKind::Minus => &ops::SUB,
                _ => return expr,
            };
            self.step();
            let right = self.multiplication(scope);
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                table,
                right,
            }));
        }
    }

    fn multiplication(&mut self, scope: ScopeId) -> Expr {
        let mut expr = self.unary(scope);
        loop {
            let op = self.peek().kind;
            let table = match op {
                TokenKind::Star => &ops::MUL,
                TokenKind::Slash => &ops::DIV,
                TokenKind::Percent => &ops::MOD,
                _ => return expr,
            };
            self.step();
            let right = self.unary(scope);
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                table,
                right,
            }));
        }
    }

    fn unary(&mut self, scope: ScopeId) -> Expr {
        let op = self.peek().kind;
        let table = match op {
            TokenKind::Bang => &ops::NOT,
            TokenKind::Minus => &ops::NEG,
            TokenKind::Less => return self.cast(scope),
            _ => return self.primary(scope),
        };
        self.step();
        Expr::Unary(Box::new(UnaryExpr {
            op,
            table,
            operand: self.unary(scope),
        }))
    }

    /// `<T>operand`. The closing `>` is omitted when the type's written form
    /// already ends in `]`.
    fn cast(&mut self, scope: ScopeId) -> Expr {
        self.step(); // '<'
        let ty = self.parse_data_type();
        if ty.is_err() {
            return Expr::Error;
        }
        if !ty.is_bracket_terminated() && !self.match_tk(TokenKind::Greater) {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected '>' to close a cast");
            return Expr::Error;
        }
        let operand = self.primary(scope);
        Expr::Cast(Box::new(CastExpr { ty, operand }))
    }

    fn primary(&mut self, scope: ScopeId) -> Expr {
        if let Some(literal) = self.match_literal() {
            return Expr::Literal(literal);
        }
        if self.match_tk(TokenKind::LeftParen) {
            let expr = self.expression(scope);
            if !self.match_tk(TokenKind::RightParen) {
                self.error_sync(ParseErrorKind::ExpectedToken, "expected ')'");
                return Expr::Error;
            }
            return expr;
        }
        if let Some(first) = self.match_idf() {
            return self.primary_idf(scope, first, IdfContext::Local);
        }
        if let Some(ctx) = self.match_context() {
            if self.match_tk(TokenKind::Dot)
                && let Some(first) = self.match_idf()
            {
                return self.primary_idf(scope, first, ctx);
            }
            self.error_sync(
                ParseErrorKind::ExpectedIdentifier,
                "expected an identifier after the context qualifier",
            );
            return Expr::Error;
        }
        let found = self.peek().kind;
        self.error_sync(
            ParseErrorKind::ExpectedExpression,
            format!("found {}", found),
        );
        Expr::Error
    }

    /// A value reference or call, entered with the first identifier
    /// component already consumed.
    fn primary_idf(&mut self, scope: ScopeId, first: StrId, ctx: IdfContext) -> Expr {
        let name = self.identifier(first);
        let value = self.bind_value_expr(scope, name, ctx);
        if !self.match_tk(TokenKind::LeftParen) {
            return Expr::Value(value);
        }
        let mut args = Vec::new();
        if !self.match_tk(TokenKind::RightParen) {
            loop {
                args.push(self.expression(scope));
                if self.match_tk(TokenKind::RightParen) {
                    break;
                }
                if !self.match_tk(TokenKind::Comma) {
                    self.error_sync(ParseErrorKind::ExpectedToken, "expected ')'");
                    break;
                }
            }
        }
        Expr::Call(Box::new(CallExpr {
            callee: value,
            args,
        }))
    }

    /// Consume the remainder of a dotted identifier chain. A dot is only
    /// taken together with the identifier after it; a trailing dot is left
    /// for the caller.
    pub(crate) fn identifier(&mut self, first: StrId) -> Idf {
        let mut components = vec![first];
        while self.peek().kind == TokenKind::Dot {
            if let TokenKind::Identifier(next) = self.peek_next().kind {
                self.step();
                self.step();
                components.push(next);
            } else {
                break;
            }
        }
        Idf::new(components)
    }

    /// Bind a reference eagerly. Chains that cannot be walked yet, such as
    /// member access through a variable, stay unbound for the resolution
    /// pass.
    fn bind_value_expr(&mut self, scope: ScopeId, name: Idf, ctx: IdfContext) -> ValueExpr {
        let binding = self.scopes.bind_value(scope, &name, ctx).ok();
        ValueExpr { name, ctx, binding }
    }
}
