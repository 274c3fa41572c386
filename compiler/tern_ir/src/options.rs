//! Compilation options threaded through the IR layer.
//!
//! There is no process-wide configuration: an `IrOptions` value is owned by
//! the [`Ir`](crate::Ir) and handed to the symbol table and lexical contexts
//! when they are built.

/// Which symbols report their mutations on the `tern::symbols` tracing target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SymbolTrace {
    #[default]
    Off,
    All,
    /// Only symbols with one of these names.
    Named(Vec<String>),
}

impl SymbolTrace {
    /// Parse the `TERN_TRACE_SYMBOLS` syntax: `*` for all symbols, otherwise
    /// a comma-separated list of names. Blank input disables tracing.
    pub fn parse(value: &str) -> SymbolTrace {
        let value = value.trim();
        if value.is_empty() {
            return SymbolTrace::Off;
        }
        if value == "*" {
            return SymbolTrace::All;
        }
        let names: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if names.is_empty() {
            SymbolTrace::Off
        } else {
            SymbolTrace::Named(names)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IrOptions {
    /// Record optimistic type assumptions per function.
    pub optimistic_types: bool,
    pub trace_symbols: SymbolTrace,
}

impl IrOptions {
    /// Environment variable enabling optimistic assumption tracking.
    pub const OPTIMISTIC_TYPES_VAR: &'static str = "TERN_OPTIMISTIC_TYPES";
    /// Environment variable selecting traced symbols.
    pub const TRACE_SYMBOLS_VAR: &'static str = "TERN_TRACE_SYMBOLS";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_optimistic_types(mut self, enabled: bool) -> Self {
        self.optimistic_types = enabled;
        self
    }

    #[must_use]
    pub fn with_trace_symbols(mut self, trace: SymbolTrace) -> Self {
        self.trace_symbols = trace;
        self
    }

    /// Read options from `TERN_OPTIMISTIC_TYPES` and `TERN_TRACE_SYMBOLS`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read options through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = IrOptions::default();
        if let Some(value) = lookup(Self::OPTIMISTIC_TYPES_VAR) {
            options.optimistic_types = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(value) = lookup(Self::TRACE_SYMBOLS_VAR) {
            options.trace_symbols = SymbolTrace::parse(&value);
        }
        options
    }
}

#[cfg(test)]
mod tests;
