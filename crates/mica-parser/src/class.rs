//! Class data: inheritance, friendship, and operator overloads.

use rustc_hash::FxHashMap;

use crate::function::Func;
use crate::idf::Idf;
use crate::token::TokenKind;
use crate::types::DataType;

/// Key of the operator-overload table.
///
/// Operator overloads are keyed by their operator token; cast overloads by
/// the target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverloadKey {
    Op(TokenKind),
    Cast(DataType),
}

/// Data attached to a class name record.
#[derive(Debug, Default)]
pub struct Class {
    /// Parent class references, left unresolved for a later pass.
    pub parents: Vec<Idf>,
    /// Friend references, also unresolved.
    pub friends: Vec<Idf>,
    operators: FxHashMap<OverloadKey, Func>,
}

impl Class {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an operator or cast overload.
    ///
    /// Each key admits exactly one definition; a second insert returns the
    /// rejected function.
    pub fn add_operator(&mut self, key: OverloadKey, func: Func) -> Result<(), Func> {
        if self.operators.contains_key(&key) {
            return Err(func);
        }
        self.operators.insert(key, func);
        Ok(())
    }

    pub fn operator(&self, key: &OverloadKey) -> Option<&Func> {
        self.operators.get(key)
    }

    pub fn operator_mut(&mut self, key: &OverloadKey) -> Option<&mut Func> {
        self.operators.get_mut(key)
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }
}
