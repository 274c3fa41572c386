//! Per-function log of optimistic type assumptions.
//!
//! A pass that types a symbol optimistically records the assumption
//! against the innermost open function, so that a function whose
//! assumptions fail can be recompiled with wider types. Logging is off
//! unless [`IrOptions::optimistic_types`] is set; when off, every
//! operation is a no-op.

use std::fmt;

use tern_ir::{Ir, IrOptions, NodeId, NodeTag, SymbolId, Type};

use crate::{ContextExtension, LexicalContext};

/// `symbol` was assumed to hold values of type `ty`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Assumption {
    pub symbol: SymbolId,
    pub ty: Type,
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}={}", self.symbol, self.ty)
    }
}

#[derive(Debug, Default)]
pub struct OptimisticAssumptions {
    enabled: bool,
    /// One entry per frame while enabled; `Some` for function frames.
    frames: Vec<Option<Vec<Assumption>>>,
}

/// A lexical context logging optimistic assumptions per function.
pub type OptimisticLexicalContext = LexicalContext<OptimisticAssumptions>;

impl OptimisticAssumptions {
    pub fn new(enabled: bool) -> Self {
        OptimisticAssumptions {
            enabled,
            frames: Vec::new(),
        }
    }

    pub fn from_options(options: &IrOptions) -> Self {
        Self::new(options.optimistic_types)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record that `symbol` is assumed to be of type `ty` in the innermost
    /// open function.
    pub fn log(&mut self, symbol: SymbolId, ty: Type) {
        if !self.enabled {
            return;
        }
        let function = self.frames.iter_mut().rev().find_map(Option::as_mut);
        debug_assert!(function.is_some(), "optimistic assumption outside a function");
        if let Some(assumptions) = function {
            assumptions.push(Assumption { symbol, ty });
        }
    }

    /// Assumptions of the innermost open function, in logging order.
    pub fn assumptions(&self) -> &[Assumption] {
        self.frames
            .iter()
            .rev()
            .find_map(Option::as_deref)
            .unwrap_or_default()
    }

    pub fn has_assumptions(&self) -> bool {
        !self.assumptions().is_empty()
    }
}

impl ContextExtension for OptimisticAssumptions {
    fn on_push(&mut self, ir: &Ir, node: NodeId) {
        if self.enabled {
            let is_function = ir.nodes.tag(node) == NodeTag::Function;
            self.frames.push(is_function.then(Vec::new));
        }
    }

    fn after_pop(&mut self, _ir: &Ir, _node: NodeId) {
        if self.enabled {
            self.frames.pop();
        }
    }
}

impl OptimisticLexicalContext {
    /// A context logging assumptions when `ir` was built with
    /// optimistic types enabled.
    pub fn optimistic(ir: Ir) -> Self {
        let assumptions = OptimisticAssumptions::from_options(ir.options());
        Self::with_extension(ir, assumptions)
    }

    pub fn log_optimistic_assumption(&mut self, symbol: SymbolId, ty: Type) {
        self.extension_mut().log(symbol, ty);
    }

    pub fn optimistic_assumptions(&self) -> &[Assumption] {
        self.extension().assumptions()
    }

    pub fn has_optimistic_assumptions(&self) -> bool {
        self.extension().has_assumptions()
    }

    pub fn is_optimistic_enabled(&self) -> bool {
        self.extension().is_enabled()
    }
}
