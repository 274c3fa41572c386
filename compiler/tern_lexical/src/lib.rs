//! Tern Lexical - Lexical Contexts and Tree Traversal
//!
//! Compiler passes walk the immutable IR with a [`NodeVisitor`] and ask a
//! [`LexicalContext`] about the nodes enclosing the one being visited:
//! the current function and block, the target of a `break`, how many
//! scopes a jump unwinds.
//!
//! # Contexts
//!
//! - [`LexicalContext`]: the ancestor stack with per-frame flags
//! - [`BlockLexicalContext`]: collects the statements of open blocks so
//!   passes can inject or drop statements
//! - [`TrimmingLexicalContext`]: drops statements after a terminal one
//! - [`OptimisticLexicalContext`]: logs optimistic type assumptions per
//!   function
//!
//! Extensions compose as tuples, e.g.
//! `LexicalContext<(BlockStatements, OptimisticAssumptions)>`.
//!
//! # Traversal
//!
//! [`traverse`] visits a tree depth first and rebuilds every node whose
//! children changed. Nodes that nothing rewrote keep their ids.

mod block;
mod context;
mod jump;
mod optimistic;
mod stack;
mod traverse;
mod trim;
mod visitor;

pub use block::{BlockHooks, BlockLexicalContext, BlockStatements, KeepStatements};
pub use context::{ContextExtension, LexicalContext};
pub use optimistic::{Assumption, OptimisticAssumptions, OptimisticLexicalContext};
pub use stack::ensure_sufficient_stack;
pub use traverse::{accept, traverse};
pub use trim::{TerminalTrimming, TrimmingLexicalContext};
pub use visitor::NodeVisitor;
