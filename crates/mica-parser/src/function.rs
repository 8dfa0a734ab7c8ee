//! Function definitions, overload sets, and overload matching.
//!
//! Every declared function name owns an [`OverloadSet`]: the ordered list of
//! definitions sharing that name within one scope. Call sites are matched
//! against the set in three tiers of decreasing precision; a tier with more
//! than one surviving candidate is reported as ambiguous rather than picked
//! from arbitrarily.

use mica_core::StrId;

use crate::expr::Expr;
use crate::stmt::Block;
use crate::types::DataType;

/// Opaque payload produced by a downstream compilation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompiledUnit;

/// One function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: StrId,
    pub ty: DataType,
    pub default: Option<Expr>,
}

/// A cached instantiation of a generic function for one concrete
/// type-argument list.
#[derive(Debug)]
pub struct GenInst {
    pub type_args: Vec<DataType>,
    pub code: CompiledUnit,
}

/// Kind-dependent payload of a function definition.
#[derive(Debug)]
pub enum FuncValue {
    /// A concrete function compiles once.
    Concrete(Option<CompiledUnit>),
    /// A generic function compiles per distinct type-argument list.
    Generic(Vec<GenInst>),
}

/// A single function definition.
#[derive(Debug)]
pub struct Func {
    /// True until a body has been attached.
    pub declared_only: bool,
    /// Whether any parameter is generic.
    pub generic: bool,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    /// Deduced by a later pass; `Generic` until then.
    pub return_type: DataType,
    pub value: FuncValue,
}

impl Func {
    pub fn new(params: Vec<Param>) -> Self {
        let generic = params.iter().any(|p| p.ty.is_generic());
        Self {
            declared_only: true,
            generic,
            params,
            body: None,
            return_type: DataType::Generic,
            value: if generic {
                FuncValue::Generic(Vec::new())
            } else {
                FuncValue::Concrete(None)
            },
        }
    }

    /// Attach the parsed body, marking the definition complete.
    pub fn attach_body(&mut self, body: Block) {
        self.body = Some(body);
        self.declared_only = false;
    }

    /// Whether `other` declares the same parameter signature.
    pub fn same_signature(&self, other: &Func) -> bool {
        self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }

    /// The smallest argument count this definition accepts. Defaults only
    /// count once every later parameter also has one.
    fn min_args(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| p.default.is_none())
            .map_or(0, |i| i + 1)
    }

    fn accepts_arity(&self, n: usize) -> bool {
        n >= self.min_args() && n <= self.params.len()
    }

    /// Fetch or create the cached instance for one concrete type-argument
    /// list. Returns `None` for concrete functions.
    pub fn instantiate(&mut self, type_args: &[DataType]) -> Option<&GenInst> {
        let FuncValue::Generic(cache) = &mut self.value else {
            return None;
        };
        if let Some(i) = cache.iter().position(|inst| inst.type_args == type_args) {
            return Some(&cache[i]);
        }
        cache.push(GenInst {
            type_args: type_args.to_vec(),
            code: CompiledUnit,
        });
        cache.last()
    }
}

/// Tier of the overload-matching precedence, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Every argument type equals the parameter type.
    Exact,
    /// A generic definition whose concrete parameters match exactly.
    Generic,
    /// Every argument implicitly converts to the parameter type.
    Castable,
}

/// Outcome of matching a call's argument types against an overload set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Selected { tier: MatchTier, index: usize },
    Ambiguous { tier: MatchTier, candidates: Vec<usize> },
    NoMatch,
}

/// All definitions sharing one declared name within a scope.
#[derive(Debug, Default)]
pub struct OverloadSet {
    funcs: Vec<Func>,
}

impl OverloadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition, returning its index in the set.
    pub fn add(&mut self, func: Func) -> usize {
        self.funcs.push(func);
        self.funcs.len() - 1
    }

    pub fn funcs(&self) -> &[Func] {
        &self.funcs
    }

    pub fn get(&self, index: usize) -> Option<&Func> {
        self.funcs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Func> {
        self.funcs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Whether a definition with the same parameter signature already exists.
    pub fn contains_signature(&self, func: &Func) -> bool {
        self.funcs.iter().any(|f| f.same_signature(func))
    }

    /// Match argument types against the set, tier by tier. The first tier
    /// with candidates decides the outcome; several survivors in one tier
    /// are ambiguous.
    pub fn match_call(&self, args: &[DataType]) -> MatchOutcome {
        for tier in [MatchTier::Exact, MatchTier::Generic, MatchTier::Castable] {
            let candidates: Vec<usize> = self
                .funcs
                .iter()
                .enumerate()
                .filter(|(_, f)| Self::matches_tier(f, args, tier))
                .map(|(i, _)| i)
                .collect();
            match candidates.len() {
                0 => {}
                1 => {
                    return MatchOutcome::Selected {
                        tier,
                        index: candidates[0],
                    };
                }
                _ => return MatchOutcome::Ambiguous { tier, candidates },
            }
        }
        MatchOutcome::NoMatch
    }

    fn matches_tier(func: &Func, args: &[DataType], tier: MatchTier) -> bool {
        if !func.accepts_arity(args.len()) {
            return false;
        }
        let mut pairs = func.params.iter().zip(args);
        match tier {
            MatchTier::Exact => !func.generic && pairs.all(|(p, a)| a.is_err() || p.ty == *a),
            MatchTier::Generic => {
                func.generic && pairs.all(|(p, a)| p.ty.is_generic() || a.is_err() || p.ty == *a)
            }
            MatchTier::Castable => pairs.all(|(p, a)| p.ty.is_generic() || a.castable_to(&p.ty)),
        }
    }
}
