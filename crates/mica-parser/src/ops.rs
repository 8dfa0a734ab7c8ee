//! Operator dispatch tables.
//!
//! Every binary and unary expression node carries a reference to the dispatch
//! table for its operator, selected purely from the operator token during
//! parsing. The tables are opaque payload here; the code generator attaches
//! the actual operation entries.

use std::fmt;

/// An operator dispatch table.
#[derive(Debug)]
pub struct OpTable {
    /// Stable table name, used for diagnostics and structural comparison.
    pub name: &'static str,
}

impl PartialEq for OpTable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for OpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub static ADD: OpTable = OpTable { name: "add" };
pub static SUB: OpTable = OpTable { name: "sub" };
pub static MUL: OpTable = OpTable { name: "mul" };
pub static DIV: OpTable = OpTable { name: "div" };
pub static MOD: OpTable = OpTable { name: "mod" };
pub static LESS: OpTable = OpTable { name: "less" };
pub static LESS_EQ: OpTable = OpTable { name: "less_eq" };
pub static GREATER: OpTable = OpTable { name: "greater" };
pub static GREATER_EQ: OpTable = OpTable { name: "greater_eq" };
pub static EQ: OpTable = OpTable { name: "eq" };
pub static NOT_EQ: OpTable = OpTable { name: "not_eq" };
pub static NOT: OpTable = OpTable { name: "not" };
pub static NEG: OpTable = OpTable { name: "neg" };
