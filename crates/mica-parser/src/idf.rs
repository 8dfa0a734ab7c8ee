//! Dotted identifier chains.

use mica_core::{Interner, StrId};

/// A non-empty ordered identifier chain (`a.b.c`), immutable once built.
///
/// The last component is the leaf name being referenced or declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Idf(Vec<StrId>);

impl Idf {
    /// Build a chain from its components.
    ///
    /// # Panics
    ///
    /// Panics if `components` is empty; chains are non-empty by construction.
    pub fn new(components: Vec<StrId>) -> Self {
        assert!(!components.is_empty(), "identifier chains are non-empty");
        Self(components)
    }

    /// A single-component chain.
    pub fn single(component: StrId) -> Self {
        Self(vec![component])
    }

    pub fn components(&self) -> &[StrId] {
        &self.0
    }

    /// The first component, where resolution starts.
    pub fn first(&self) -> StrId {
        self.0[0]
    }

    /// The last component: the name being referenced or declared.
    pub fn leaf(&self) -> StrId {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    /// Render the chain as `a.b.c` for diagnostics.
    pub fn join(&self, interner: &Interner) -> String {
        let mut out = String::new();
        for (i, &component) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(interner.resolve(component));
        }
        out
    }
}
