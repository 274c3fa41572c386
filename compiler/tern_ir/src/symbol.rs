//! Symbols and block symbol tables.
//!
//! Nodes are immutable but symbols are not: a symbol's slot assignment,
//! flags and use count are updated in place by the passes that resolve
//! them, and every `Ident` that refers to the symbol sees the update.
//! Symbols live in a [`SymbolTable`] arena and are addressed by
//! [`SymbolId`]; all mutation goes through the table.
//!
//! Block scopes live in the same table. A `Block` node carries a
//! [`ScopeId`], and every copy of that block shares it.

use std::fmt;

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Name, StringInterner, SymbolTrace, Type};

/// Index into the symbol arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Index of a block's symbol table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Global,
    Var,
    Param,
}

bitflags! {
    /// Storage and declaration properties of a symbol.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SymbolFlags: u32 {
        /// Stored in a scope object rather than a local slot.
        const IS_SCOPE = 1 << 0;
        const IS_THIS = 1 << 1;
        const IS_LET = 1 << 2;
        const IS_CONST = 1 << 3;
        /// Compiler-generated temporary.
        const IS_INTERNAL = 1 << 4;
        /// The self-reference of a named function expression.
        const IS_FUNCTION_SELF = 1 << 5;
        const IS_FUNCTION_DECLARATION = 1 << 6;
        const IS_PROGRAM_LEVEL = 1 << 7;
        /// Stored in bytecode local slots.
        const HAS_SLOT = 1 << 8;
        const HAS_INT_VALUE = 1 << 9;
        const HAS_LONG_VALUE = 1 << 10;
        const HAS_DOUBLE_VALUE = 1 << 11;
        const HAS_OBJECT_VALUE = 1 << 12;
        const HAS_BEEN_DECLARED = 1 << 13;

        /// Per-type slot bits.
        const VALUE_MASK = Self::HAS_INT_VALUE.bits()
            | Self::HAS_LONG_VALUE.bits()
            | Self::HAS_DOUBLE_VALUE.bits()
            | Self::HAS_OBJECT_VALUE.bits();
    }
}

impl SymbolFlags {
    /// The slot bit storing values of `ty`. Booleans share the int slot.
    pub fn value_flag(ty: Type) -> SymbolFlags {
        match ty {
            Type::Boolean | Type::Int => SymbolFlags::HAS_INT_VALUE,
            Type::Long => SymbolFlags::HAS_LONG_VALUE,
            Type::Number => SymbolFlags::HAS_DOUBLE_VALUE,
            _ => {
                debug_assert!(ty.is_object(), "no slot storage for {ty}");
                SymbolFlags::HAS_OBJECT_VALUE
            }
        }
    }
}

/// A named storage location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: Name,
    kind: SymbolKind,
    flags: SymbolFlags,
    first_slot: i32,
    field_index: i32,
    use_count: u32,
}

impl Symbol {
    /// Slot or field index not yet assigned.
    pub const UNASSIGNED: i32 = -1;

    pub fn new(name: Name, kind: SymbolKind, flags: SymbolFlags) -> Self {
        Symbol {
            name,
            kind,
            flags,
            first_slot: Self::UNASSIGNED,
            field_index: Self::UNASSIGNED,
            use_count: 0,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn flags(&self) -> SymbolFlags {
        self.flags
    }

    pub fn first_slot(&self) -> i32 {
        self.first_slot
    }

    pub fn field_index(&self) -> i32 {
        self.field_index
    }

    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    pub fn is_global(&self) -> bool {
        self.kind == SymbolKind::Global
    }

    pub fn is_var(&self) -> bool {
        self.kind == SymbolKind::Var
    }

    pub fn is_param(&self) -> bool {
        self.kind == SymbolKind::Param
    }

    pub fn is_scope(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_SCOPE)
    }

    pub fn is_this(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_THIS)
    }

    pub fn is_let(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_LET)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_CONST)
    }

    /// Declared with `let` or `const`.
    pub fn is_block_scoped(&self) -> bool {
        self.flags
            .intersects(SymbolFlags::IS_LET | SymbolFlags::IS_CONST)
    }

    pub fn is_internal(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_INTERNAL)
    }

    pub fn is_function_self(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_FUNCTION_SELF)
    }

    pub fn is_function_declaration(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_FUNCTION_DECLARATION)
    }

    pub fn is_program_level(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_PROGRAM_LEVEL)
    }

    pub fn has_been_declared(&self) -> bool {
        self.flags.contains(SymbolFlags::HAS_BEEN_DECLARED)
    }

    pub fn has_slot(&self) -> bool {
        self.flags.contains(SymbolFlags::HAS_SLOT)
    }

    /// Has slot storage and a first slot assigned.
    pub fn is_slotted(&self) -> bool {
        self.has_slot() && self.first_slot != Self::UNASSIGNED
    }

    pub fn has_field_index(&self) -> bool {
        self.field_index != Self::UNASSIGNED
    }

    /// Neither slotted nor scoped: no storage is needed.
    pub fn is_dead(&self) -> bool {
        !self
            .flags
            .intersects(SymbolFlags::HAS_SLOT | SymbolFlags::IS_SCOPE)
    }

    /// Lives only in bytecode local slots.
    pub fn is_bytecode_local(&self) -> bool {
        self.has_slot() && !self.is_scope()
    }

    /// Total slot width of the per-type slots this symbol holds.
    pub fn slot_count(&self) -> u32 {
        let width = |flag: SymbolFlags, n: u32| if self.flags.contains(flag) { n } else { 0 };
        width(SymbolFlags::HAS_INT_VALUE, 1)
            + width(SymbolFlags::HAS_LONG_VALUE, 2)
            + width(SymbolFlags::HAS_DOUBLE_VALUE, 2)
            + width(SymbolFlags::HAS_OBJECT_VALUE, 1)
    }

    /// Whether a slot for values of `ty` is allocated.
    pub fn has_slot_for(&self, ty: Type) -> bool {
        self.flags.contains(SymbolFlags::value_flag(ty))
    }

    /// Local slot holding values of `ty`.
    ///
    /// Per-type slots are laid out by ascending width: int, long, double,
    /// object, each present only if its bit is set.
    ///
    /// # Panics
    /// Panics if the symbol is not slotted or has no slot for `ty`.
    pub fn get_slot(&self, ty: Type) -> i32 {
        assert!(self.is_slotted(), "symbol {:?} has no slots", self.name);
        let wanted = SymbolFlags::value_flag(ty);
        assert!(
            self.flags.contains(wanted),
            "symbol {:?} has no slot for {ty}",
            self.name
        );
        let mut slot = self.first_slot;
        for (flag, width) in [
            (SymbolFlags::HAS_INT_VALUE, 1),
            (SymbolFlags::HAS_LONG_VALUE, 2),
            (SymbolFlags::HAS_DOUBLE_VALUE, 2),
        ] {
            if flag == wanted {
                return slot;
            }
            if self.flags.contains(flag) {
                slot += width;
            }
        }
        slot
    }
}

/// Insertion-ordered name to symbol map of one block.
#[derive(Clone, Debug, Default)]
struct BlockScope {
    index: FxHashMap<Name, usize>,
    entries: Vec<(Name, SymbolId)>,
}

/// Which symbols emit mutation traces, resolved against the interner.
#[derive(Clone, Debug, Default)]
enum TraceFilter {
    #[default]
    Off,
    All,
    Names(FxHashSet<Name>),
}

/// Arena of symbols and block scopes.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<BlockScope>,
    trace: TraceFilter,
}

/// Mutation target for symbol traces.
const TRACE_TARGET: &str = "tern::symbols";

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table that traces mutations of the symbols `trace` selects.
    pub fn with_trace(trace: &SymbolTrace, interner: &mut StringInterner) -> Self {
        let trace = match trace {
            SymbolTrace::Off => TraceFilter::Off,
            SymbolTrace::All => TraceFilter::All,
            SymbolTrace::Named(names) => {
                TraceFilter::Names(names.iter().map(|n| interner.intern(n)).collect())
            }
        };
        SymbolTable {
            trace,
            ..Self::default()
        }
    }

    pub fn new_symbol(&mut self, name: Name, kind: SymbolKind, flags: SymbolFlags) -> SymbolId {
        let id = SymbolId(self.next_index(self.symbols.len()));
        self.symbols.push(Symbol::new(name, kind, flags));
        self.trace(id, "created");
        id
    }

    fn next_index(&self, len: usize) -> u32 {
        match u32::try_from(len) {
            Ok(index) => index,
            Err(_) => panic!("symbol table exceeded u32::MAX entries"),
        }
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        (0u32..).zip(&self.symbols).map(|(i, s)| (SymbolId(i), s))
    }

    // Block scopes

    /// Allocate an empty block scope.
    pub fn new_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.next_index(self.scopes.len()));
        self.scopes.push(BlockScope::default());
        id
    }

    /// Bind `symbol` under its name in `scope`.
    ///
    /// Rebinding a name replaces the symbol but keeps the name's position.
    pub fn put_symbol(&mut self, scope: ScopeId, symbol: SymbolId) {
        let name = self.get(symbol).name;
        let block = &mut self.scopes[scope.index()];
        if let Some(&pos) = block.index.get(&name) {
            block.entries[pos].1 = symbol;
        } else {
            block.index.insert(name, block.entries.len());
            block.entries.push((name, symbol));
        }
    }

    /// Create a symbol and bind it in `scope`.
    pub fn define(
        &mut self,
        scope: ScopeId,
        name: Name,
        kind: SymbolKind,
        flags: SymbolFlags,
    ) -> SymbolId {
        let id = self.new_symbol(name, kind, flags);
        self.put_symbol(scope, id);
        id
    }

    pub fn existing_symbol(&self, scope: ScopeId, name: Name) -> Option<SymbolId> {
        let block = &self.scopes[scope.index()];
        block.index.get(&name).map(|&pos| block.entries[pos].1)
    }

    /// Symbols of `scope` in first-declared order.
    pub fn symbols_in(&self, scope: ScopeId) -> impl Iterator<Item = SymbolId> + '_ {
        self.scopes[scope.index()].entries.iter().map(|&(_, id)| id)
    }

    pub fn scope_len(&self, scope: ScopeId) -> usize {
        self.scopes[scope.index()].entries.len()
    }

    // Mutation

    /// Move the symbol into a scope object.
    ///
    /// Non-parameters lose their slot; a parameter captured by a closure
    /// keeps both.
    pub fn set_is_scope(&mut self, id: SymbolId) {
        let symbol = &mut self.symbols[id.index()];
        if symbol.is_scope() {
            return;
        }
        symbol.flags.insert(SymbolFlags::IS_SCOPE);
        if !symbol.is_param() {
            symbol.flags.remove(SymbolFlags::HAS_SLOT);
        }
        self.trace(id, "set_is_scope");
    }

    /// # Panics
    /// Panics when requesting a slot for a scoped symbol.
    pub fn set_needs_slot(&mut self, id: SymbolId, needs_slot: bool) {
        let symbol = &mut self.symbols[id.index()];
        if needs_slot {
            assert!(
                !symbol.is_scope() || symbol.is_param(),
                "scoped symbol {:?} cannot take a slot",
                symbol.name
            );
            symbol.flags.insert(SymbolFlags::HAS_SLOT);
        } else {
            symbol.flags.remove(SymbolFlags::HAS_SLOT);
        }
        self.trace(id, "set_needs_slot");
    }

    pub fn set_has_slot_for(&mut self, id: SymbolId, ty: Type) {
        self.symbols[id.index()]
            .flags
            .insert(SymbolFlags::value_flag(ty));
        self.trace(id, "set_has_slot_for");
    }

    /// # Panics
    /// Panics if `slot` is below [`Symbol::UNASSIGNED`] or beyond the
    /// local variable limit.
    pub fn set_first_slot(&mut self, id: SymbolId, slot: i32) {
        assert!(
            (Symbol::UNASSIGNED..=0xFFFF).contains(&slot),
            "invalid first slot {slot}"
        );
        let symbol = &mut self.symbols[id.index()];
        if symbol.first_slot == slot {
            return;
        }
        symbol.first_slot = slot;
        self.trace(id, "set_first_slot");
    }

    pub fn set_field_index(&mut self, id: SymbolId, index: i32) {
        let symbol = &mut self.symbols[id.index()];
        if symbol.field_index == index {
            return;
        }
        symbol.field_index = index;
        self.trace(id, "set_field_index");
    }

    pub fn increase_use_count(&mut self, id: SymbolId) {
        let symbol = &mut self.symbols[id.index()];
        symbol.use_count = symbol.use_count.saturating_add(1);
    }

    pub fn set_flags(&mut self, id: SymbolId, flags: SymbolFlags) {
        let symbol = &mut self.symbols[id.index()];
        if symbol.flags.contains(flags) {
            return;
        }
        symbol.flags.insert(flags);
        self.trace(id, "set_flags");
    }

    pub fn clear_flags(&mut self, id: SymbolId, flags: SymbolFlags) {
        let symbol = &mut self.symbols[id.index()];
        if !symbol.flags.intersects(flags) {
            return;
        }
        symbol.flags.remove(flags);
        self.trace(id, "clear_flags");
    }

    pub fn set_has_been_declared(&mut self, id: SymbolId) {
        self.set_flags(id, SymbolFlags::HAS_BEEN_DECLARED);
    }

    fn traces(&self, symbol: &Symbol) -> bool {
        match &self.trace {
            TraceFilter::Off => false,
            TraceFilter::All => true,
            TraceFilter::Names(names) => names.contains(&symbol.name),
        }
    }

    fn trace(&self, id: SymbolId, event: &'static str) {
        let symbol = self.get(id);
        if self.traces(symbol) {
            tracing::debug!(
                target: TRACE_TARGET,
                symbol = id.raw(),
                name = symbol.name.raw(),
                flags = ?symbol.flags,
                first_slot = symbol.first_slot,
                field_index = symbol.field_index,
                "{event}"
            );
        }
    }
}

impl std::ops::Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        self.get(id)
    }
}
