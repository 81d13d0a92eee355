//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. A finished [`crate::CompilationUnit`]
//! may be shared read-only across evaluation tasks, so access goes through a
//! `RwLock`; interning itself is expected to happen from a single thread
//! while the unit is being built.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Interior storage for interned strings.
///
/// Interned text is leaked to get `'static` lifetimes; an interner lives for
/// the whole compilation, so the leak is bounded by the source text.
struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

/// String interner.
///
/// The empty string is pre-interned as [`Name::EMPTY`].
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its identifier.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(text) {
            return Name::from_raw(idx);
        }

        let mut inner = self.inner.write();
        // Re-check under the write lock; another caller may have won the race.
        if let Some(&idx) = inner.map.get(text) {
            return Name::from_raw(idx);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let idx = u32::try_from(inner.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded u32::MAX strings"));
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the text for an interned name.
    ///
    /// # Panics
    ///
    /// Panics if `name` did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.raw() as usize]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}
