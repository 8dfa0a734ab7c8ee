//! Parser and scope graph for the Mica scripting language.
//!
//! The crate consumes a lexed token stream and produces, in one pass, both
//! the syntax tree of a compilation unit and its scope graph: every class,
//! function, variable and namespace declared, with forward references and
//! declarations merged into shared name records.
//!
//! The entry points are [`Parser::parse`], which fails on the first unit
//! with recorded diagnostics, and [`Parser::parse_lenient`], which always
//! returns the partially built unit alongside the diagnostics.
//!
//! ```
//! use mica_core::{Interner, Span};
//! use mica_parser::token::{Token, TokenKind};
//! use mica_parser::Parser;
//!
//! let interner = Interner::new();
//! let tokens = [Token::new(TokenKind::Eof, Span::new(1, 1, 0))];
//! let unit = Parser::parse(&tokens, &interner).unwrap();
//! assert!(unit.success);
//! ```

pub mod class;
pub mod expr;
mod expr_parser;
pub mod function;
pub mod idf;
pub mod ops;
pub mod parser;
pub mod scope;
pub mod stmt;
mod stmt_parser;
pub mod token;
mod type_parser;
pub mod types;

pub use class::{Class, OverloadKey};
pub use expr::{
    AssignExpr, BinaryExpr, CallExpr, CastExpr, Expr, TernaryExpr, UnaryExpr, ValueExpr,
};
pub use function::{
    CompiledUnit, Func, FuncValue, GenInst, MatchOutcome, MatchTier, OverloadSet, Param,
};
pub use idf::Idf;
pub use ops::OpTable;
pub use parser::{Parser, Unit};
pub use scope::{DeclareError, Name, NameId, NameKind, Scope, ScopeId, ScopeTree, Variable};
pub use stmt::{Block, BlockKind, IfBranch, IfStmt, LetStmt, NamespaceStmt, Stmt};
pub use stmt_parser::StmtFlags;
pub use token::{IdfContext, Literal, PrimType, Token, TokenKind};
pub use types::{DataType, ObjType};
