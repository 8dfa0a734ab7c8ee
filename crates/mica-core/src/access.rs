//! Access modifiers for names in a scope.

use std::fmt;

/// Access modifier attached to a name record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Public,
    Private,
    Protected,
    /// Public for classes within the same namespace.
    Namespace,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Private => write!(f, "private"),
            Access::Protected => write!(f, "protected"),
            Access::Namespace => write!(f, "namespace"),
        }
    }
}
