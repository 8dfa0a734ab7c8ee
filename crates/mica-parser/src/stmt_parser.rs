//! Statement and declaration syntax.
//!
//! Statements are separated by line breaks or `;`. Declarations mutate the
//! scope graph as they parse: `let` and `func` upgrade name records,
//! `class` and `namespace` open member scopes, and operator overloads attach
//! to class data. The statement flags track what the enclosing construct
//! permits, so `return` outside a function and `namespace` outside the
//! global scope are rejected where they appear.

use bitflags::bitflags;
use mica_core::ParseErrorKind;

use crate::class::OverloadKey;
use crate::function::{Func, Param};
use crate::idf::Idf;
use crate::parser::Parser;
use crate::scope::{NameId, NameKind, ScopeId};
use crate::stmt::{Block, BlockKind, IfBranch, IfStmt, LetStmt, NamespaceStmt, Stmt};
use crate::token::TokenKind;
use crate::types::DataType;

bitflags! {
    /// Context of the statement being parsed. Empty means global scope.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StmtFlags: u8 {
        /// Inside a function body.
        const FUNC = 1 << 0;
        /// Inside a nested block.
        const LOCAL = 1 << 1;
        /// Inside a construct that supports `break`.
        const LOOP = 1 << 2;
    }
}

impl StmtFlags {
    pub fn is_global(self) -> bool {
        self.is_empty()
    }

    pub fn in_func(self) -> bool {
        self.contains(StmtFlags::FUNC)
    }
}

impl Parser<'_> {
    /// The top-level statement loop.
    pub(crate) fn parse_unit(&mut self) -> Block {
        let root = self.scopes.root();
        let mut block = Block::new(root);
        loop {
            if self.at_end() {
                break;
            }
            let before = self.position();
            self.parse_statement(&mut block, StmtFlags::empty());
            if self.at_end() {
                break;
            }
            if !self.at_newline() && !self.match_tk(TokenKind::Semicolon) {
                self.error_sync(ParseErrorKind::MissingTerminator, "expected ';' or newline");
            }
            // the loop must always make progress
            if self.position() == before {
                self.step();
            }
        }
        block
    }

    /// Parse one statement into `block`. Statements that only populate the
    /// scope graph, and rejected ones, append nothing.
    pub(crate) fn parse_statement(&mut self, block: &mut Block, flags: StmtFlags) {
        let stmt = match self.peek().kind {
            TokenKind::Let => self.let_statement(block.scope),
            TokenKind::If => self.if_statement(block.scope, flags),
            TokenKind::LeftBrace => self.block_statement(block.scope, flags),
            TokenKind::Return => {
                if !flags.in_func() {
                    self.error_sync(
                        ParseErrorKind::ReturnOutsideFunction,
                        "return statement outside of a function",
                    );
                    return;
                }
                self.ret_statement(block.scope)
            }
            TokenKind::Func => {
                self.func_decl(block.scope);
                return;
            }
            TokenKind::Class => self.class_decl(block.scope),
            TokenKind::Namespace => {
                if !flags.is_global() {
                    self.error_sync(
                        ParseErrorKind::NamespaceOutsideGlobal,
                        "namespaces can only be declared in the global scope",
                    );
                    return;
                }
                self.namespace_decl(block.scope)
            }
            _ => Stmt::Expr(self.expression(block.scope)),
        };
        block.push(stmt);
    }

    // =========================================
    // Simple statements
    // =========================================

    /// `let [type] name [= expr]`
    fn let_statement(&mut self, scope: ScopeId) -> Stmt {
        self.step(); // 'let'
        let ty = if self.peek_is_type_annotation() {
            let ty = self.parse_data_type();
            if ty.is_err() {
                return Stmt::Error;
            }
            Some(ty)
        } else {
            None
        };
        let Some(name) = self.match_idf() else {
            self.error_sync(ParseErrorKind::ExpectedIdentifier, "expected an identifier");
            return Stmt::Error;
        };
        let name_span = self.previous().span;
        let init = if self.match_tk(TokenKind::Assign) {
            Some(self.expression(scope))
        } else {
            None
        };
        if init.is_none() && ty.is_none() {
            self.error_sync(
                ParseErrorKind::ExpectedToken,
                "a variable without a type annotation needs an initializer",
            );
            return Stmt::Error;
        }
        let name_id = match self.scopes.get_or_create(scope, &Idf::single(name)) {
            Ok(id) => id,
            Err(err) => {
                self.error(ParseErrorKind::NameCollision, name_span, err.to_string());
                return Stmt::Error;
            }
        };
        if let Err(err) = self.scopes.declare_variable(name_id, ty.clone()) {
            let kind = match err {
                crate::scope::DeclareError::Redeclared => ParseErrorKind::Redeclaration,
                _ => ParseErrorKind::NameCollision,
            };
            self.error(
                kind,
                name_span,
                format!("'{}'; {}", self.interner.resolve(name), err),
            );
            return Stmt::Error;
        }
        Stmt::Let(LetStmt {
            name,
            ty,
            init,
            name_id,
        })
    }

    /// Whether the tokens ahead read as a type annotation rather than the
    /// declared name. An identifier chain is a type when another identifier,
    /// `:` or `[` follows it.
    fn peek_is_type_annotation(&self) -> bool {
        match self.peek().kind {
            TokenKind::PrimType(_) => true,
            TokenKind::Identifier(_) => {
                let mut offset = 0;
                while matches!(self.token_at(offset).kind, TokenKind::Identifier(_))
                    && self.token_at(offset + 1).kind == TokenKind::Dot
                    && matches!(self.token_at(offset + 2).kind, TokenKind::Identifier(_))
                {
                    offset += 2;
                }
                matches!(
                    self.token_at(offset + 1).kind,
                    TokenKind::Identifier(_) | TokenKind::Colon | TokenKind::LeftBracket
                )
            }
            _ => false,
        }
    }

    /// `return [expr]`, with the expression optional when the statement ends
    /// at the line break or `;`.
    fn ret_statement(&mut self, scope: ScopeId) -> Stmt {
        self.step(); // 'return'
        if self.peek().kind == TokenKind::Semicolon || self.at_newline() {
            return Stmt::Return(None);
        }
        Stmt::Return(Some(self.expression(scope)))
    }

    // =========================================
    // Blocks and control flow
    // =========================================

    /// Parse `{ ... }` into `scope`, entered with the cursor on the `{`.
    pub(crate) fn parse_block_in(&mut self, scope: ScopeId, flags: StmtFlags) -> Block {
        self.step(); // '{'
        let mut block = Block::new(scope);
        loop {
            if self.at_end() {
                let span = self.peek().span;
                self.error(
                    ParseErrorKind::UnexpectedEof,
                    span,
                    "expected '}' before end of input",
                );
                break;
            }
            if self.match_tk(TokenKind::RightBrace) {
                break;
            }
            let before = self.position();
            self.parse_statement(&mut block, flags);
            if !self.at_newline() && !self.match_tk(TokenKind::Semicolon) {
                self.error_sync(ParseErrorKind::MissingTerminator, "expected ';' or newline");
            }
            if self.position() == before {
                self.step();
            }
        }
        block
    }

    /// A freestanding `{ ... }` statement in its own child scope.
    fn block_statement(&mut self, parent: ScopeId, flags: StmtFlags) -> Stmt {
        let scope = self.scopes.create_scope(parent);
        Stmt::Block(self.parse_block_in(scope, flags | StmtFlags::LOCAL))
    }

    /// An if/else-if/else ladder. Conditions need no parentheses; every
    /// branch body is braced.
    ///
    /// The ladder's classification is the weakest of its branches, and
    /// without a terminal else it can at best claim `MayReturn`.
    fn if_statement(&mut self, scope: ScopeId, flags: StmtFlags) -> Stmt {
        self.step(); // 'if'
        let mut branches: Vec<IfBranch> = Vec::new();
        let mut condition = Some(self.expression(scope));
        let mut kind = BlockKind::Default;
        let mut has_else = false;
        loop {
            if self.peek().kind != TokenKind::LeftBrace {
                self.error_sync(ParseErrorKind::ExpectedToken, "expected '{'");
                break;
            }
            let branch_scope = self.scopes.create_scope(scope);
            let block = self.parse_block_in(branch_scope, flags | StmtFlags::LOCAL);
            if flags.in_func() {
                kind = match block.kind {
                    BlockKind::Returns if branches.is_empty() => BlockKind::Returns,
                    BlockKind::Returns if kind == BlockKind::Returns => BlockKind::Returns,
                    BlockKind::Returns | BlockKind::MayReturn => BlockKind::MayReturn,
                    _ => {
                        if kind == BlockKind::Returns {
                            BlockKind::MayReturn
                        } else {
                            kind
                        }
                    }
                };
            }
            let was_else = condition.is_none();
            branches.push(IfBranch {
                condition: condition.take(),
                block,
            });
            if was_else || !self.match_tk(TokenKind::Else) {
                break;
            }
            if self.match_tk(TokenKind::If) {
                condition = Some(self.expression(scope));
            } else {
                condition = None;
                has_else = true;
            }
        }
        if flags.in_func() && !has_else && kind == BlockKind::Returns {
            kind = BlockKind::MayReturn;
        }
        Stmt::If(IfStmt { branches, kind })
    }

    // =========================================
    // Declarations
    // =========================================

    /// `func name(params) { ... }`, or an operator overload when the name is
    /// missing or followed by `.operator`.
    fn func_decl(&mut self, parent: ScopeId) {
        self.step(); // 'func'
        let named = if let Some(first) = self.match_idf() {
            let idf = self.identifier(first);
            match self.scopes.get_or_create(parent, &idf) {
                Ok(id) => Some(id),
                Err(err) => {
                    let span = self.previous().span;
                    self.error(
                        ParseErrorKind::NameCollision,
                        span,
                        format!("unable to create function '{}'; {}", idf.join(self.interner), err),
                    );
                    self.panic_mode();
                    return;
                }
            }
        } else {
            None
        };
        match named {
            Some(id) => {
                if self.match_tk(TokenKind::Dot) {
                    self.operator_decl(parent, Some(id));
                } else {
                    self.named_func_decl(parent, id);
                }
            }
            None => self.operator_decl(parent, None),
        }
    }

    fn named_func_decl(&mut self, parent: ScopeId, name_id: NameId) {
        let head_span = self.previous().span;
        let Some(params) = self.parse_parameters(parent) else {
            return;
        };
        let func = Func::new(params);
        if let Err(err) = self.scopes.declare_function(name_id) {
            self.error(ParseErrorKind::NameCollision, head_span, err.to_string());
            return;
        }
        let duplicate = self
            .scopes
            .overload_set(name_id)
            .is_some_and(|set| set.contains_signature(&func));
        if duplicate {
            self.error(
                ParseErrorKind::DuplicateOverload,
                head_span,
                "a function has already been declared with the same parameters",
            );
            return;
        }
        let index = match self.scopes.overload_set_mut(name_id) {
            Some(set) => set.add(func),
            None => return,
        };
        if let Some(body) = self.func_body(parent)
            && let Some(set) = self.scopes.overload_set_mut(name_id)
            && let Some(func) = set.get_mut(index)
        {
            func.attach_body(body);
        }
    }

    /// `func [Name.]operator <op-or-type>(params) { ... }`
    ///
    /// The overload attaches to the enclosing class, or to `Name` when that
    /// record is still undeclared, promoting it to an implicit class.
    fn operator_decl(&mut self, parent: ScopeId, func_name: Option<NameId>) {
        if !self.match_tk(TokenKind::Operator) {
            self.error_sync(ParseErrorKind::ExpectedIdentifier, "expected a function name");
            return;
        }
        let class_id = if let Some(id) = func_name
            && matches!(self.scopes.kind(id), NameKind::Undeclared)
        {
            // an overload on a forward-referenced name implies a class
            if self.scopes.promote_undeclared_class(id).is_err() {
                return;
            }
            id
        } else if let Some(owner) = self.scopes.scope(parent).class {
            owner
        } else {
            self.error_sync(
                ParseErrorKind::OperatorOutsideClass,
                "operator overloads are only valid inside a class",
            );
            return;
        };
        let key = if self.peek().kind.is_operator() {
            self.step();
            OverloadKey::Op(self.previous().kind)
        } else {
            let ty = self.parse_data_type();
            if ty.is_err() {
                return;
            }
            OverloadKey::Cast(ty)
        };
        let Some(params) = self.parse_parameters(parent) else {
            return;
        };
        let func = Func::new(params);
        let inserted = match self.scopes.class_mut(class_id) {
            Some(class) => class.add_operator(key.clone(), func).is_ok(),
            None => false,
        };
        if !inserted {
            self.error_sync(
                ParseErrorKind::DuplicateOperator,
                "the class already overloads this operator",
            );
            return;
        }
        if let Some(body) = self.func_body(parent)
            && let Some(class) = self.scopes.class_mut(class_id)
            && let Some(func) = class.operator_mut(&key)
        {
            func.attach_body(body);
        }
    }

    /// `(type name [= default], ...)`. A bare single-component class-typed
    /// entry is taken as a generic parameter of that name.
    fn parse_parameters(&mut self, scope: ScopeId) -> Option<Vec<Param>> {
        if !self.match_tk(TokenKind::LeftParen) {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected '('");
            return None;
        }
        let mut params: Vec<Param> = Vec::new();
        if self.match_tk(TokenKind::RightParen) {
            return Some(params);
        }
        loop {
            let ty = self.parse_data_type();
            if ty.is_err() {
                return None;
            }
            let (name, ty) = if let Some(first) = self.match_idf() {
                let idf = self.identifier(first);
                if !idf.is_single() {
                    self.error_sync(
                        ParseErrorKind::InvalidParameterName,
                        "parameter names cannot contain '.'",
                    );
                    return None;
                }
                (idf.leaf(), ty)
            } else if let DataType::Obj(obj) = &ty
                && obj.name.is_single()
                && obj.type_args.is_empty()
            {
                (obj.name.leaf(), DataType::Generic)
            } else {
                self.error_sync(
                    ParseErrorKind::ExpectedIdentifier,
                    "expected a name for a function parameter",
                );
                return None;
            };
            if params.iter().any(|p| p.name == name) {
                self.error_sync(
                    ParseErrorKind::DuplicateParameter,
                    format!("duplicate parameter '{}'", self.interner.resolve(name)),
                );
                return None;
            }
            let default = if self.match_tk(TokenKind::Assign) {
                Some(self.expression(scope))
            } else {
                None
            };
            params.push(Param { name, ty, default });
            if self.match_tk(TokenKind::Comma) {
                continue;
            }
            if self.match_tk(TokenKind::RightParen) {
                break;
            }
            self.error_sync(ParseErrorKind::ExpectedToken, "expected ')'");
            return None;
        }
        Some(params)
    }

    /// A function body block. A body that returns on some paths but not all
    /// is a reported error.
    fn func_body(&mut self, parent: ScopeId) -> Option<Block> {
        if self.peek().kind != TokenKind::LeftBrace {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected '{'");
            return None;
        }
        let scope = self.scopes.create_scope(parent);
        let block = self.parse_block_in(scope, StmtFlags::FUNC);
        if block.kind == BlockKind::MayReturn {
            let span = self.previous().span;
            self.error(
                ParseErrorKind::PartialReturn,
                span,
                "function only returns in some cases",
            );
        }
        Some(block)
    }

    /// `class Name [: friend F, Parent, ...] { members }`
    ///
    /// Members are `let`, `func` and nested `class` declarations; anything
    /// else is reported once and skipped.
    fn class_decl(&mut self, parent: ScopeId) -> Stmt {
        self.step(); // 'class'
        let Some(first) = self.match_idf() else {
            self.error_sync(ParseErrorKind::ExpectedIdentifier, "expected an identifier");
            return Stmt::Error;
        };
        let name = self.identifier(first);
        let name_span = self.previous().span;
        let name_id = match self.scopes.get_or_create(parent, &name) {
            Ok(id) => id,
            Err(err) => {
                self.error(ParseErrorKind::NameCollision, name_span, err.to_string());
                self.panic_mode();
                return Stmt::Error;
            }
        };
        let class_scope = match self.scopes.declare_class(name_id) {
            Ok(scope) => scope,
            Err(err) => {
                let kind = match err {
                    crate::scope::DeclareError::Redeclared => ParseErrorKind::Redeclaration,
                    _ => ParseErrorKind::NameCollision,
                };
                self.error(
                    kind,
                    name_span,
                    format!("class '{}'; {}", name.join(self.interner), err),
                );
                self.panic_mode();
                return Stmt::Error;
            }
        };
        // parents and friends stay unresolved until the resolution pass
        if self.match_tk(TokenKind::Colon) {
            loop {
                if self.match_tk(TokenKind::Friend) {
                    let Some(first) = self.match_idf() else {
                        self.error_sync(
                            ParseErrorKind::ExpectedIdentifier,
                            "expected an identifier after 'friend'",
                        );
                        return Stmt::Error;
                    };
                    let friend = self.identifier(first);
                    if let Some(class) = self.scopes.class_mut(name_id) {
                        class.friends.push(friend);
                    }
                } else if let Some(first) = self.match_idf() {
                    let parent_name = self.identifier(first);
                    if let Some(class) = self.scopes.class_mut(name_id) {
                        class.parents.push(parent_name);
                    }
                } else {
                    self.error_sync(
                        ParseErrorKind::UnexpectedToken,
                        "expected a parent class or friend declaration",
                    );
                    return Stmt::Error;
                }
                if !self.match_tk(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.match_tk(TokenKind::LeftBrace) {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected '{'");
            return Stmt::Error;
        }
        loop {
            if self.at_end() {
                let span = self.peek().span;
                self.error(
                    ParseErrorKind::UnexpectedEof,
                    span,
                    "expected '}' before end of input",
                );
                break;
            }
            if self.match_tk(TokenKind::RightBrace) {
                break;
            }
            let before = self.position();
            match self.peek().kind {
                TokenKind::Let => {
                    let stmt = self.let_statement(class_scope);
                    if !matches!(stmt, Stmt::Error) {
                        self.scopes.add_decl(class_scope, stmt);
                    }
                }
                TokenKind::Func => self.func_decl(class_scope),
                TokenKind::Class => {
                    let stmt = self.class_decl(class_scope);
                    if !matches!(stmt, Stmt::Error) {
                        self.scopes.add_decl(class_scope, stmt);
                    }
                }
                other => {
                    let span = self.peek().span;
                    self.error(
                        ParseErrorKind::UnexpectedToken,
                        span,
                        format!("unexpected {} in a class body", other),
                    );
                    if other == TokenKind::LeftBrace {
                        self.skip_balanced_braces();
                    } else {
                        self.panic_mode();
                    }
                }
            }
            if self.position() == before {
                self.step();
            }
        }
        Stmt::Class { name, name_id }
    }

    /// Skip a `{ ... }` group, honoring nesting, entered with the cursor on
    /// the opening brace.
    fn skip_balanced_braces(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            match self.peek().kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    self.step();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                    continue;
                }
                _ => {}
            }
            self.step();
        }
    }

    /// `namespace name { ... }`. Reuses an existing namespace of the same
    /// name; the body is parsed with global-scope rules.
    fn namespace_decl(&mut self, parent: ScopeId) -> Stmt {
        self.step(); // 'namespace'
        let Some(first) = self.match_idf() else {
            self.error_sync(ParseErrorKind::ExpectedIdentifier, "expected an identifier");
            return Stmt::Error;
        };
        let name = self.identifier(first);
        let name_span = self.previous().span;
        let name_id = match self.scopes.get_or_create(parent, &name) {
            Ok(id) => id,
            Err(err) => {
                self.error(ParseErrorKind::NameCollision, name_span, err.to_string());
                self.panic_mode();
                return Stmt::Error;
            }
        };
        let nmsp_scope = match self.scopes.declare_namespace(name_id) {
            Ok(scope) => scope,
            Err(err) => {
                self.error(
                    ParseErrorKind::NameCollision,
                    name_span,
                    format!(
                        "unable to create namespace '{}'; {}",
                        name.join(self.interner),
                        err
                    ),
                );
                self.panic_mode();
                return Stmt::Error;
            }
        };
        if self.peek().kind != TokenKind::LeftBrace {
            self.error_sync(ParseErrorKind::ExpectedToken, "expected '{'");
            return Stmt::Error;
        }
        let block = self.parse_block_in(nmsp_scope, StmtFlags::empty());
        Stmt::Namespace(NamespaceStmt { name, block })
    }
}
