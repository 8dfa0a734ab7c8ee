//! The data-type representation that drives overload matching.

use crate::idf::Idf;
use crate::token::PrimType;

/// A class type reference: a name chain plus optional type arguments.
///
/// The name is left unresolved; a later pass binds it against the scope
/// graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjType {
    pub name: Idf,
    pub type_args: Vec<DataType>,
}

/// A data type as written in source or deduced during matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Num,
    Str,
    Bool,
    Void,
    /// Not yet deduced; matches any type during deferred matching.
    Generic,
    /// Error sentinel. Combines with anything without producing further
    /// diagnostics.
    Err,
    /// `T[]`
    Arr(Box<DataType>),
    /// A class type, possibly parameterized.
    Obj(ObjType),
}

impl From<PrimType> for DataType {
    fn from(prim: PrimType) -> Self {
        match prim {
            PrimType::Num => DataType::Num,
            PrimType::Str => DataType::Str,
            PrimType::Bool => DataType::Bool,
        }
    }
}

impl DataType {
    /// A class type from its unresolved name and type arguments.
    pub fn obj(name: Idf, type_args: Vec<DataType>) -> Self {
        DataType::Obj(ObjType { name, type_args })
    }

    pub fn is_err(&self) -> bool {
        matches!(self, DataType::Err)
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, DataType::Generic)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, DataType::Num | DataType::Str | DataType::Bool)
    }

    /// Generic-permissive structural equality.
    ///
    /// `Generic` and `Err` match everything; arrays and parameterized class
    /// types match component-wise.
    pub fn matches(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::Err, _) | (_, DataType::Err) => true,
            (DataType::Generic, _) | (_, DataType::Generic) => true,
            (DataType::Arr(a), DataType::Arr(b)) => a.matches(b),
            (DataType::Obj(a), DataType::Obj(b)) => {
                a.name == b.name
                    && a.type_args.len() == b.type_args.len()
                    && a.type_args
                        .iter()
                        .zip(&b.type_args)
                        .all(|(x, y)| x.matches(y))
            }
            _ => self == other,
        }
    }

    /// Whether a value of this type implicitly converts to `to`.
    ///
    /// Primitives convert freely among themselves; everything else requires
    /// an exact match. `Err` converts both ways so one bad expression does
    /// not cascade.
    pub fn castable_to(&self, to: &DataType) -> bool {
        if self.is_err() || to.is_err() {
            return true;
        }
        self == to || (self.is_primitive() && to.is_primitive())
    }

    /// Whether the written form of this type ends in `]`.
    ///
    /// Cast expressions omit the closing `>` for such types.
    pub fn is_bracket_terminated(&self) -> bool {
        match self {
            DataType::Arr(_) => true,
            DataType::Obj(obj) => !obj.type_args.is_empty(),
            _ => false,
        }
    }
}
