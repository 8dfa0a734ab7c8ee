//! Statement and block nodes.

use mica_core::StrId;

use crate::expr::Expr;
use crate::idf::Idf;
use crate::scope::{NameId, ScopeId};
use crate::types::DataType;

/// How a block affects control flow, computed while its statements are
/// appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Falls through to the next statement.
    #[default]
    Default,
    /// Exits the enclosing loop.
    Breaks,
    /// Returns on every path.
    Returns,
    /// Returns on some paths but not all.
    MayReturn,
}

/// A sequence of statements sharing one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub scope: ScopeId,
    pub stmts: Vec<Stmt>,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            stmts: Vec::new(),
            kind: BlockKind::Default,
        }
    }

    /// Append a statement, updating the block's control-flow classification.
    pub fn push(&mut self, stmt: Stmt) {
        match &stmt {
            Stmt::Return(_) => self.kind = BlockKind::Returns,
            Stmt::If(ladder) => self.absorb(ladder.kind),
            Stmt::Block(inner) => self.absorb(inner.kind),
            _ => {}
        }
        self.stmts.push(stmt);
    }

    /// Fold a nested block's classification into this one.
    pub fn absorb(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Returns => self.kind = BlockKind::Returns,
            BlockKind::MayReturn if self.kind != BlockKind::Returns => {
                self.kind = BlockKind::MayReturn;
            }
            BlockKind::Breaks if self.kind == BlockKind::Default => {
                self.kind = BlockKind::Breaks;
            }
            _ => {}
        }
    }
}

/// One branch of an if ladder. A `None` condition is the terminal else.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Option<Expr>,
    pub block: Block,
}

/// A whole if/else-if/else ladder with its combined classification.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    pub kind: BlockKind,
}

/// A variable declaration. The declared type, if written, also lives on the
/// variable's name record; the initializer belongs to the statement alone.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: StrId,
    pub ty: Option<DataType>,
    pub init: Option<Expr>,
    /// The name record this declaration created or upgraded.
    pub name_id: NameId,
}

/// A namespace declaration with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceStmt {
    pub name: Idf,
    pub block: Block,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Let(LetStmt),
    If(IfStmt),
    Return(Option<Expr>),
    Block(Block),
    /// Marker recording that a class was declared here; the class data lives
    /// in the scope graph.
    Class { name: Idf, name_id: NameId },
    Namespace(NamespaceStmt),
    /// Placeholder produced after a reported error.
    Error,
}
