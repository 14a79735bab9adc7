//! String interner for names shared across the AST.
//!
//! Uses `Arc<str>` so that interned names can be cloned cheaply and the
//! resolved graph can be shared with parallel readers.

use std::sync::Arc;

use rustc_hash::FxHashSet;

/// An interned string - cheap to clone (just an Arc increment)
pub type Name = Arc<str>;

/// String interner that deduplicates names.
///
/// A GIR document repeats the same handful of strings (type names, ctypes,
/// transfer modes) thousands of times; interning them keeps one allocation
/// per distinct string.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: FxHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a cheap-to-clone reference.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.strings.get(s) {
            Arc::clone(existing)
        } else {
            let name: Arc<str> = Arc::from(s);
            self.strings.insert(Arc::clone(&name));
            name
        }
    }

    /// Get an interned string if it exists, without creating it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.strings.get(s).cloned()
    }

    /// Number of unique strings interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
