//! String interning for one compilation unit.
//!
//! The parser never compares identifier text; it works with opaque [`StrId`]
//! handles where handle equality implies identical lexemes. The table is kept
//! alive for the duration of one compilation unit.

use rustc_hash::FxHashMap;

/// Handle to an interned string.
///
/// Two equal handles always refer to the same lexeme within one [`Interner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrId(u32);

impl StrId {
    /// Raw index of this handle, for diagnostics only.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Deduplicating string table.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, StrId>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the existing handle if it was seen before.
    pub fn intern(&mut self, s: &str) -> StrId {
        if let Some(&id) = self.map.get(s) {
            return id;
        }
        let id = StrId(self.strings.len() as u32);
        self.strings.push(s.into());
        self.map.insert(s.into(), id);
        id
    }

    /// Resolve a handle back to its lexeme.
    ///
    /// # Panics
    ///
    /// Panics if the handle came from a different interner.
    pub fn resolve(&self, id: StrId) -> &str {
        &self.strings[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
