//! Expression tree nodes.
//!
//! Expressions are a closed sum type; variant payloads that carry children
//! are boxed so the enum itself stays small. Every operator node stores a
//! reference to its dispatch table, selected when the operator token was
//! parsed.

use crate::idf::Idf;
use crate::ops::OpTable;
use crate::scope::NameId;
use crate::token::{IdfContext, Literal, TokenKind};
use crate::types::DataType;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Value(ValueExpr),
    Call(Box<CallExpr>),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    Assign(Box<AssignExpr>),
    Ternary(Box<TernaryExpr>),
    Cast(Box<CastExpr>),
    /// Placeholder produced after a reported error.
    Error,
}

impl Expr {
    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error)
    }
}

/// A variable or function reference: the identifier chain as written, the
/// resolution context it was written with, and the name record it bound to
/// at parse time.
///
/// `binding` is `None` when the chain could not be walked, for instance a
/// member access through a variable, which only a later typed pass can
/// resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueExpr {
    pub name: Idf,
    pub ctx: IdfContext,
    pub binding: Option<NameId>,
}

/// A call. The callee is structurally a value reference; whether it names a
/// function is checked during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: ValueExpr,
    pub args: Vec<Expr>,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: TokenKind,
    pub table: &'static OpTable,
    pub operand: Expr,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: TokenKind,
    pub table: &'static OpTable,
    pub right: Expr,
}

/// An assignment. The target is restricted to a value reference.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: ValueExpr,
    pub value: Expr,
}

/// `condition ? then_value : else_value`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Expr,
    pub then_value: Expr,
    pub else_value: Expr,
}

/// `<T>operand`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub ty: DataType,
    pub operand: Expr,
}
