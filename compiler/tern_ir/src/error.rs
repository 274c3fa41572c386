//! Recoverable IR construction errors.
//!
//! These describe malformed parser input. Broken compiler-pass invariants
//! (stack imbalance, missing symbols, re-deciding a type) are assertions,
//! not `IrError`s.

use thiserror::Error;

/// Error raised by a node constructor or setter when its input is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    /// Token length does not fit the 24-bit length field.
    #[error("token length {length} exceeds the 24-bit token length field")]
    TokenLengthOverflow { length: u32 },

    /// Catch binding is not an identifier, array pattern or object pattern.
    #[error("invalid catch parameter: expected identifier or destructuring pattern, found {found}")]
    InvalidCatchParameter { found: &'static str },

    /// The `this` argument of a direct eval is not an identifier.
    #[error("invalid eval arguments: `this` must be an identifier, found {found}")]
    InvalidEvalArguments { found: &'static str },

    /// Assignment, increment or decrement of something that cannot be assigned.
    #[error("invalid assignment target: {found}")]
    InvalidAssignmentTarget { found: &'static str },

    /// The interner ran out of 32-bit indices.
    #[error("interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    InternerOverflow { count: usize },
}

/// Result alias for fallible IR construction.
pub type IrResult<T> = Result<T, IrError>;
