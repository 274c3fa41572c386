//! Interned string identifier.
//!
//! Provides compact 32-bit interned identifiers. The well-known names the IR
//! refers to by value (`this`, `arguments`, the default export binding) are
//! pre-interned at fixed indices so they can be compared without an interner.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Interned string identifier.
///
/// Equality is O(1) integer comparison. Resolve the text through
/// [`StringInterner::lookup`](crate::StringInterner::lookup).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    /// `default`, the export name of a default export.
    pub const DEFAULT: Name = Name(1);
    /// `*default*`, the local binding of an anonymous default export.
    pub const DEFAULT_BINDING: Name = Name(2);
    /// `*`, the import name of namespace imports and star exports.
    pub const STAR: Name = Name(3);
    /// `this`.
    pub const THIS: Name = Name(4);
    /// `arguments`.
    pub const ARGUMENTS: Name = Name(5);

    /// Text of the pre-interned names, in index order.
    pub(crate) const PREDEFINED: [&'static str; 6] =
        ["", "default", "*default*", "*", "this", "arguments"];

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Hash for Name {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
