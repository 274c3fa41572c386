//! Local variable type knowledge supplied to expression typing.
//!
//! Typing an expression needs the current types of the locals it reads.
//! Each distinct state of that knowledge has a snapshot id, and cached
//! expression types are only reused for the snapshot they were computed
//! against.

use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;

use crate::{SymbolId, Type};

/// Source of local variable types.
pub trait LocalVariableTypes {
    /// Identity of the current state. Two calls return the same value only
    /// if every `type_of` answer is unchanged in between.
    fn snapshot(&self) -> u32;

    /// Type of a bytecode-local symbol; `None` if the symbol is not a local
    /// (it is then typed as `Object`).
    fn type_of(&self, symbol: SymbolId) -> Option<Type>;
}

/// No local type knowledge: every variable is an `Object`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoLocalTypes;

impl LocalVariableTypes for NoLocalTypes {
    fn snapshot(&self) -> u32 {
        0
    }

    fn type_of(&self, _symbol: SymbolId) -> Option<Type> {
        None
    }
}

static NEXT_SNAPSHOT: AtomicU32 = AtomicU32::new(1);

fn next_snapshot() -> u32 {
    NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed)
}

/// Mutable symbol to type map. Every change takes a new snapshot id.
#[derive(Debug)]
pub struct LocalTypeMap {
    snapshot: u32,
    types: FxHashMap<SymbolId, Type>,
}

impl LocalTypeMap {
    pub fn new() -> Self {
        LocalTypeMap {
            snapshot: next_snapshot(),
            types: FxHashMap::default(),
        }
    }

    /// Set the type of `symbol`. A no-op if the type is unchanged.
    pub fn insert(&mut self, symbol: SymbolId, ty: Type) {
        if self.types.insert(symbol, ty) != Some(ty) {
            self.snapshot = next_snapshot();
        }
    }

    pub fn remove(&mut self, symbol: SymbolId) -> Option<Type> {
        let removed = self.types.remove(&symbol);
        if removed.is_some() {
            self.snapshot = next_snapshot();
        }
        removed
    }

    pub fn get(&self, symbol: SymbolId) -> Option<Type> {
        self.types.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for LocalTypeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LocalTypeMap {
    /// Clones share the snapshot: they answer identically until one changes.
    fn clone(&self) -> Self {
        LocalTypeMap {
            snapshot: self.snapshot,
            types: self.types.clone(),
        }
    }
}

impl LocalVariableTypes for LocalTypeMap {
    fn snapshot(&self) -> u32 {
        self.snapshot
    }

    fn type_of(&self, symbol: SymbolId) -> Option<Type> {
        self.get(symbol)
    }
}
