//! Local variable type conversions at control-flow joins.
//!
//! When two paths merge with different types for the same local, the
//! predecessor node of the join records the coercions that reconcile them
//! as a chain of `(symbol, from, to)` links. Chains are immutable and shared
//! between node copies; two chains are the same only if they are the same
//! allocation.

use std::fmt::Write as _;
use std::rc::Rc;

use crate::{StringInterner, SymbolId, SymbolTable, Type};

#[derive(Debug)]
struct Link {
    symbol: SymbolId,
    from: Type,
    to: Type,
    next: Option<LocalVariableConversion>,
}

/// Head of an immutable conversion chain.
#[derive(Clone, Debug)]
pub struct LocalVariableConversion(Rc<Link>);

impl LocalVariableConversion {
    /// Prepend a conversion of `symbol` from `from` to `to` onto `next`.
    pub fn new(
        symbol: SymbolId,
        from: Type,
        to: Type,
        next: Option<LocalVariableConversion>,
    ) -> Self {
        LocalVariableConversion(Rc::new(Link {
            symbol,
            from,
            to,
            next,
        }))
    }

    pub fn symbol(&self) -> SymbolId {
        self.0.symbol
    }

    pub fn from(&self) -> Type {
        self.0.from
    }

    pub fn to(&self) -> Type {
        self.0.to
    }

    pub fn next(&self) -> Option<&LocalVariableConversion> {
        self.0.next.as_ref()
    }

    /// The target type has a slot, so the conversion has to be emitted.
    pub fn is_live(&self, symbols: &SymbolTable) -> bool {
        symbols.get(self.symbol()).has_slot_for(self.to())
    }

    /// Any link of the chain is live.
    pub fn is_any_live(&self, symbols: &SymbolTable) -> bool {
        self.iter().any(|link| link.is_live(symbols))
    }

    /// Links from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Never true; a chain has at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Render as `⟦x:int→double, y:int→object⟧`.
    pub fn describe(&self, symbols: &SymbolTable, interner: &StringInterner) -> String {
        let mut out = String::from("\u{27e6}");
        for (i, link) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let name = interner.lookup(symbols.get(link.symbol()).name());
            // Writing to a String cannot fail.
            let _ = write!(out, "{name}:{}\u{2192}{}", link.from(), link.to());
        }
        out.push('\u{27e7}');
        out
    }
}

impl PartialEq for LocalVariableConversion {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LocalVariableConversion {}

/// Iterator over the links of a conversion chain.
pub struct Iter<'a> {
    next: Option<&'a LocalVariableConversion>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LocalVariableConversion;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next();
        Some(current)
    }
}

#[cfg(test)]
mod tests;
