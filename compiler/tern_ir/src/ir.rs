//! The IR bundle: nodes, symbols and names of one compilation.

use crate::{
    IrOptions, Name, NodeArena, ScopeId, StringInterner, SymbolFlags, SymbolId, SymbolKind,
    SymbolTable,
};

/// Everything a pass reads and writes: the node arena, the symbol table
/// and the interner, plus the options they were built with.
#[derive(Debug)]
pub struct Ir {
    pub nodes: NodeArena,
    pub symbols: SymbolTable,
    pub interner: StringInterner,
    options: IrOptions,
}

impl Ir {
    pub fn new(options: IrOptions) -> Self {
        let mut interner = StringInterner::new();
        let symbols = SymbolTable::with_trace(&options.trace_symbols, &mut interner);
        Ir {
            nodes: NodeArena::new(),
            symbols,
            interner,
            options,
        }
    }

    pub fn options(&self) -> &IrOptions {
        &self.options
    }

    /// Intern `s`.
    pub fn name(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn resolve(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn new_scope(&mut self) -> ScopeId {
        self.symbols.new_scope()
    }

    /// Create a symbol named `name` and bind it in `scope`.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        flags: SymbolFlags,
    ) -> SymbolId {
        let name = self.interner.intern(name);
        self.symbols.define(scope, name, kind, flags)
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        self.interner.lookup(self.symbols[symbol].name())
    }
}

impl Default for Ir {
    fn default() -> Self {
        Self::new(IrOptions::default())
    }
}
