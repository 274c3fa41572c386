//! Tern IR - Immutable JavaScript Intermediate Representation
//!
//! This crate contains the data model compiler passes rewrite:
//! - Names for interned identifiers, tokens and source positions
//! - The optimistic type lattice
//! - Symbols, block scopes and local variable conversions
//! - Nodes in an append-only arena, with copy-on-write setters
//! - Control-flow and typing queries over nodes
//! - ES module import/export records
//!
//! # Design Philosophy
//!
//! - **Immutable nodes**: a setter returns the same `NodeId` when nothing
//!   changed and a fresh copy otherwise, so id comparison detects rewrites
//! - **Flatten everything**: children are `NodeId(u32)` handles, symbols
//!   are `SymbolId(u32)` handles into one table
//! - **No global state**: options are injected through [`Ir`]
//!
//! Literal numbers are stored as u64 bits so nodes keep `Eq` and `Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod conversion;
mod dump;
mod error;
mod interner;
mod ir;
mod local_types;
mod module;
mod name;
pub mod node;
mod ops;
mod options;
mod symbol;
mod token;
mod types;

pub use arena::{Children, NodeArena};
pub use conversion::{Iter as ConversionIter, LocalVariableConversion};
pub use dump::dump;
pub use error::{IrError, IrResult};
pub use interner::StringInterner;
pub use ir::Ir;
pub use local_types::{LocalTypeMap, LocalVariableTypes, NoLocalTypes};
pub use module::{ExportEntry, ImportEntry, Module, ModuleBuilder};
pub use name::Name;
pub use node::{
    AccessNode, ArrayLiteralNode, BaseFlags, BinaryNode, BlockFlags, BlockNode,
    BlockStatementNode, CallFlags, CallNode, CaseNode, CatchNode, EvalArgs,
    ExpressionStatementNode, ForFlags, ForNode, FunctionFlags, FunctionKind, FunctionNode,
    IdentFlags, IdentNode, IfNode, IndexNode, JoinPredecessorNode, JumpNode,
    JumpToInlinedFinallyNode, Label, LabelKind, LabelNode, LiteralValue, Node, NodeId, NodeKind,
    NodeTag, ObjectNode, Optimistic, PropertyNode, ReturnNode, SplitNode, SwitchNode,
    TemplateLiteralNode, TernaryNode, ThrowNode, TryNode, UnaryNode, VarFlags, VarNode, WhileNode,
    WithNode,
};
pub use ops::{BinaryOp, UnaryOp};
pub use options::{IrOptions, SymbolTrace};
pub use symbol::{ScopeId, Symbol, SymbolFlags, SymbolId, SymbolKind, SymbolTable};
pub use token::{Origin, Token, NO_FINISH, NO_LINE_NUMBER};
pub use types::Type;

static_assert_size!(NodeId, 4);
static_assert_size!(SymbolId, 4);
static_assert_size!(Name, 4);
static_assert_size!(Token, 8);
static_assert_size!(Type, 1);
static_assert_size!(Optimistic, 8);
static_assert_size!(Label, 8);
