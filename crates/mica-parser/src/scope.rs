//! The scope graph: a tree of scopes whose entries are name records.
//!
//! Scopes and names live in two arenas owned by [`ScopeTree`] and refer to
//! each other by index. A name record is created the first time an
//! identifier is referenced or declared and is upgraded in place when its
//! declaration arrives, so forward references and declarations converge on
//! the same record.
//!
//! Upgrades are restricted: an undeclared record may become any declared
//! kind, an implicitly created class may become a declared class, and
//! nothing else changes kind. Collisions surface as [`DeclareError`]s for
//! the parser to report.

use mica_core::{Access, StrId};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::class::Class;
use crate::function::OverloadSet;
use crate::idf::Idf;
use crate::stmt::Stmt;
use crate::token::IdfContext;
use crate::types::DataType;

/// Index of a scope in the [`ScopeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root (global) scope.
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Index of a name record in the [`ScopeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameId(u32);

/// Declaration kind plus kind-dependent payload of one name record.
#[derive(Debug)]
pub enum NameKind {
    /// Referenced but not yet declared.
    Undeclared,
    Namespace,
    Class(Class),
    /// Implicitly created class (for instance by an operator overload on a
    /// forward-referenced name) whose declaration has not been seen yet.
    UndeclaredClass(Class),
    Function(OverloadSet),
    Variable(Variable),
}

/// Payload of a variable name record.
#[derive(Debug, Default)]
pub struct Variable {
    /// Declared type, when the declaration wrote one.
    pub ty: Option<DataType>,
}

impl NameKind {
    /// Short description for collision diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NameKind::Undeclared => "an undeclared name",
            NameKind::Namespace => "a namespace",
            NameKind::Class(_) | NameKind::UndeclaredClass(_) => "a class",
            NameKind::Function(_) => "a function",
            NameKind::Variable(_) => "a variable",
        }
    }
}

/// One named entity in a scope.
#[derive(Debug)]
pub struct Name {
    /// The scope this record lives in.
    pub parent: ScopeId,
    pub access: Access,
    pub kind: NameKind,
    /// Scope for members declared under this name.
    pub child_scope: Option<ScopeId>,
}

/// One level of the scope tree.
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Set when this scope is a class body; the owning class name record.
    pub class: Option<NameId>,
    /// Nearest enclosing namespace scope; the root refers to itself.
    pub namespace: ScopeId,
    names: FxHashMap<StrId, NameId>,
    /// Declaration statements belonging to this scope, in source order.
    pub decls: Vec<Stmt>,
}

/// Failure to create or upgrade a name record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeclareError {
    #[error("{existing} already exists with this name")]
    KindMismatch { existing: &'static str },
    #[error("a function name cannot contain other declarations")]
    FunctionWithMembers,
    #[error("the name was already declared in this scope")]
    Redeclared,
    #[error("the name cannot contain nested declarations")]
    NotAScope,
}

/// Arena of scopes and name records for one compilation unit.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    names: Vec<Name>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// A tree containing only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                parent: None,
                class: None,
                namespace: ScopeId::ROOT,
                names: FxHashMap::default(),
                decls: Vec::new(),
            }],
            names: Vec::new(),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Create a child scope, inheriting the parent's namespace.
    pub fn create_scope(&mut self, parent: ScopeId) -> ScopeId {
        let namespace = self.scopes[parent.0 as usize].namespace;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            class: None,
            namespace,
            names: FxHashMap::default(),
            decls: Vec::new(),
        });
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn name(&self, id: NameId) -> &Name {
        &self.names[id.0 as usize]
    }

    pub fn kind(&self, id: NameId) -> &NameKind {
        &self.names[id.0 as usize].kind
    }

    pub fn kind_mut(&mut self, id: NameId) -> &mut NameKind {
        &mut self.names[id.0 as usize].kind
    }

    /// The class data of a declared or implicit class name.
    pub fn class_mut(&mut self, id: NameId) -> Option<&mut Class> {
        match &mut self.names[id.0 as usize].kind {
            NameKind::Class(class) | NameKind::UndeclaredClass(class) => Some(class),
            _ => None,
        }
    }

    /// The overload set of a function name.
    pub fn overload_set(&self, id: NameId) -> Option<&OverloadSet> {
        match &self.names[id.0 as usize].kind {
            NameKind::Function(set) => Some(set),
            _ => None,
        }
    }

    pub fn overload_set_mut(&mut self, id: NameId) -> Option<&mut OverloadSet> {
        match &mut self.names[id.0 as usize].kind {
            NameKind::Function(set) => Some(set),
            _ => None,
        }
    }

    /// Look a key up in one scope's map, without walking outward.
    pub fn lookup_local(&self, scope: ScopeId, key: StrId) -> Option<NameId> {
        self.scopes[scope.0 as usize].names.get(&key).copied()
    }

    /// The nearest scope, walking outward from `scope`, that has an entry
    /// for `key`.
    pub fn declaring_scope(&self, scope: ScopeId, key: StrId) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if self.scopes[s.0 as usize].names.contains_key(&key) {
                return Some(s);
            }
            current = self.scopes[s.0 as usize].parent;
        }
        None
    }

    /// Record a declaration statement under `scope`.
    pub fn add_decl(&mut self, scope: ScopeId, stmt: Stmt) {
        self.scopes[scope.0 as usize].decls.push(stmt);
    }

    fn insert_name(&mut self, scope: ScopeId, key: StrId) -> NameId {
        let id = NameId(self.names.len() as u32);
        self.names.push(Name {
            parent: scope,
            access: Access::default(),
            kind: NameKind::Undeclared,
            child_scope: None,
        });
        self.scopes[scope.0 as usize].names.insert(key, id);
        id
    }

    /// The member scope under a name, created on demand. Functions and
    /// variables cannot own members.
    fn ensure_child_scope(&mut self, id: NameId) -> Result<ScopeId, DeclareError> {
        if let Some(scope) = self.names[id.0 as usize].child_scope {
            return Ok(scope);
        }
        match &self.names[id.0 as usize].kind {
            NameKind::Function(_) | NameKind::Variable(_) => Err(DeclareError::NotAScope),
            _ => {
                let parent = self.names[id.0 as usize].parent;
                let scope = self.create_scope(parent);
                self.names[id.0 as usize].child_scope = Some(scope);
                Ok(scope)
            }
        }
    }

    /// Walk a dotted identifier down from `scope`, creating undeclared
    /// records for missing components. Repeated walks of the same chain
    /// return the same leaf record.
    pub fn get_or_create(&mut self, scope: ScopeId, idf: &Idf) -> Result<NameId, DeclareError> {
        let components = idf.components();
        let mut current = scope;
        let mut leaf = None;
        for (i, &component) in components.iter().enumerate() {
            let id = match self.lookup_local(current, component) {
                Some(id) => id,
                None => self.insert_name(current, component),
            };
            if i + 1 < components.len() {
                current = self.ensure_child_scope(id)?;
            }
            leaf = Some(id);
        }
        // components() is non-empty by construction
        leaf.ok_or(DeclareError::NotAScope)
    }

    /// Bind a value reference. Local references resolve the first component
    /// outward and fall back to the referencing scope; global references
    /// start at the root.
    pub fn bind_value(
        &mut self,
        scope: ScopeId,
        idf: &Idf,
        ctx: IdfContext,
    ) -> Result<NameId, DeclareError> {
        let start = match ctx {
            IdfContext::Global => self.root(),
            IdfContext::Local => self.declaring_scope(scope, idf.first()).unwrap_or(scope),
        };
        self.get_or_create(start, idf)
    }

    // =========================================
    // Declaration upgrades
    // =========================================

    /// Upgrade to a namespace, or reuse an existing one. Returns the
    /// namespace's member scope.
    pub fn declare_namespace(&mut self, id: NameId) -> Result<ScopeId, DeclareError> {
        let i = id.0 as usize;
        match &self.names[i].kind {
            NameKind::Namespace => self.names[i].child_scope.ok_or(DeclareError::NotAScope),
            NameKind::Undeclared => {
                let scope = self.ensure_child_scope(id)?;
                self.names[i].kind = NameKind::Namespace;
                // a namespace scope is its own nearest namespace
                self.scopes[scope.0 as usize].namespace = scope;
                Ok(scope)
            }
            other => Err(DeclareError::KindMismatch {
                existing: other.describe(),
            }),
        }
    }

    /// Upgrade to a declared class, adopting any implicitly created class
    /// data. Returns the class body scope.
    pub fn declare_class(&mut self, id: NameId) -> Result<ScopeId, DeclareError> {
        let i = id.0 as usize;
        let kind = std::mem::replace(&mut self.names[i].kind, NameKind::Undeclared);
        match kind {
            NameKind::Undeclared => self.names[i].kind = NameKind::Class(Class::new()),
            NameKind::UndeclaredClass(class) => self.names[i].kind = NameKind::Class(class),
            NameKind::Class(_) => {
                self.names[i].kind = kind;
                return Err(DeclareError::Redeclared);
            }
            other => {
                let existing = other.describe();
                self.names[i].kind = other;
                return Err(DeclareError::KindMismatch { existing });
            }
        }
        let scope = self.ensure_child_scope(id)?;
        self.scopes[scope.0 as usize].class = Some(id);
        Ok(scope)
    }

    /// Upgrade to a function name. Only undeclared records without members
    /// qualify; an existing function name is reused.
    pub fn declare_function(&mut self, id: NameId) -> Result<(), DeclareError> {
        let i = id.0 as usize;
        match &self.names[i].kind {
            NameKind::Function(_) => Ok(()),
            NameKind::Undeclared => {
                if self.names[i].child_scope.is_some() {
                    return Err(DeclareError::FunctionWithMembers);
                }
                self.names[i].kind = NameKind::Function(OverloadSet::new());
                Ok(())
            }
            other => Err(DeclareError::KindMismatch {
                existing: other.describe(),
            }),
        }
    }

    /// Upgrade to a variable. Redeclaring a variable is an error.
    pub fn declare_variable(
        &mut self,
        id: NameId,
        ty: Option<DataType>,
    ) -> Result<(), DeclareError> {
        let i = id.0 as usize;
        match &self.names[i].kind {
            NameKind::Undeclared => {
                if self.names[i].child_scope.is_some() {
                    return Err(DeclareError::KindMismatch {
                        existing: "a name with members",
                    });
                }
                self.names[i].kind = NameKind::Variable(Variable { ty });
                Ok(())
            }
            NameKind::Variable(_) => Err(DeclareError::Redeclared),
            other => Err(DeclareError::KindMismatch {
                existing: other.describe(),
            }),
        }
    }

    /// Promote an undeclared record to an implicitly created class, so an
    /// operator overload can attach before the class declaration is seen.
    pub fn promote_undeclared_class(&mut self, id: NameId) -> Result<(), DeclareError> {
        let i = id.0 as usize;
        match &self.names[i].kind {
            NameKind::Undeclared => {
                self.names[i].kind = NameKind::UndeclaredClass(Class::new());
                Ok(())
            }
            other => Err(DeclareError::KindMismatch {
                existing: other.describe(),
            }),
        }
    }
}
