//! String interner for identifier storage.
//!
//! Single-threaded: one interner belongs to one [`Ir`](crate::Ir), and the
//! IR is only ever touched by the traversal that owns it.

use rustc_hash::FxHashMap;

use crate::{IrError, Name};

/// Maps strings to [`Name`] handles and back.
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the well-known names pre-interned.
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        for (raw, text) in (0u32..).zip(Name::PREDEFINED) {
            interner.insert(raw, text);
        }
        debug_assert_eq!(interner.lookup(Name::ARGUMENTS), "arguments");
        interner
    }

    fn insert(&mut self, raw: u32, s: &str) -> Name {
        let name = Name::from_raw(raw);
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, IrError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let Ok(raw) = u32::try_from(self.strings.len()) else {
            return Err(IrError::InternerOverflow {
                count: self.strings.len(),
            });
        };
        Ok(self.insert(raw, s))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        match self.try_intern(s) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Look up an already-interned string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a Name to its text.
    ///
    /// # Panics
    /// Panics if the Name came from another interner and is out of range.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of interned strings, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false: the pre-interned names are present from construction.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
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
            .field("len", &self.strings.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
