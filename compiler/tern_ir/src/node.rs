//! The node model.
//!
//! Nodes live in a [`NodeArena`](crate::NodeArena) and are addressed by
//! [`NodeId`]. A node never changes after allocation (apart from `finish`
//! while it is being assembled); "changing" a node allocates a copy, so
//! comparing ids answers "did this subtree change".
//!
//! # Design
//!
//! - **Closed sum type**: one `NodeKind` variant per node kind, so every
//!   pass matches exhaustively.
//! - **Flat**: children are `NodeId`s; absent children are `None`, never a
//!   placeholder node.

mod expr;
mod flags;
mod label;
mod stmt;

use std::fmt;

pub use expr::{
    AccessNode, ArrayLiteralNode, BinaryNode, CallNode, EvalArgs, FunctionKind, FunctionNode,
    IdentNode, IndexNode, JoinPredecessorNode, LiteralValue, ObjectNode, Optimistic, PropertyNode,
    TemplateLiteralNode, TernaryNode, UnaryNode,
};
pub use flags::{BaseFlags, BlockFlags, CallFlags, ForFlags, FunctionFlags, IdentFlags, VarFlags};
pub use label::{Label, LabelKind};
pub use stmt::{
    BlockNode, BlockStatementNode, CaseNode, CatchNode, ExpressionStatementNode, ForNode, IfNode,
    JumpNode, JumpToInlinedFinallyNode, LabelNode, ReturnNode, SplitNode, SwitchNode, ThrowNode,
    TryNode, VarNode, WhileNode, WithNode,
};

use crate::Token;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
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

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node: position data plus its kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub token: Token,
    pub start: u32,
    pub finish: u32,
    /// Source line of statements; expressions carry their statement's line.
    pub line_number: i32,
    pub kind: NodeKind,
}

/// Declare `NodeKind` and its field-less mirror `NodeTag` from one list.
macro_rules! define_node_kinds {
    ($( $(#[$doc:meta])* $variant:ident $(($payload:ty))? ),+ $(,)?) => {
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum NodeKind {
            $( $(#[$doc])* $variant $(($payload))? ),+
        }

        /// Discriminant of [`NodeKind`].
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum NodeTag {
            $( $(#[$doc])* $variant ),+
        }

        impl NodeKind {
            pub fn tag(&self) -> NodeTag {
                match self {
                    $( NodeKind::$variant { .. } => NodeTag::$variant ),+
                }
            }
        }

        impl NodeTag {
            pub const fn name(self) -> &'static str {
                match self {
                    $( NodeTag::$variant => stringify!($variant) ),+
                }
            }
        }
    };
}

define_node_kinds! {
    // Expressions
    Ident(IdentNode),
    Literal(LiteralValue),
    ArrayLiteral(ArrayLiteralNode),
    Object(ObjectNode),
    Property(PropertyNode),
    TemplateLiteral(TemplateLiteralNode),
    Binary(BinaryNode),
    Unary(UnaryNode),
    Access(AccessNode),
    Index(IndexNode),
    Call(CallNode),
    Ternary(TernaryNode),
    JoinPredecessor(JoinPredecessorNode),
    Function(FunctionNode),
    /// Placeholder for an expression the parser could not recover.
    Error,

    // Statements
    Block(BlockNode),
    BlockStatement(BlockStatementNode),
    ExpressionStatement(ExpressionStatementNode),
    Var(VarNode),
    If(IfNode),
    For(ForNode),
    While(WhileNode),
    Label(LabelNode),
    Switch(SwitchNode),
    Case(CaseNode),
    Try(TryNode),
    Catch(CatchNode),
    Throw(ThrowNode),
    Return(ReturnNode),
    Break(JumpNode),
    Continue(JumpNode),
    JumpToInlinedFinally(JumpToInlinedFinallyNode),
    With(WithNode),
    Split(SplitNode),
    Empty,
    Debugger,
}

impl NodeTag {
    /// Kept on the lexical-context stack while being traversed.
    pub const fn is_lexical_context(self) -> bool {
        matches!(
            self,
            NodeTag::Block
                | NodeTag::Function
                | NodeTag::Label
                | NodeTag::For
                | NodeTag::While
                | NodeTag::Switch
                | NodeTag::Try
                | NodeTag::With
                | NodeTag::Split
        )
    }

    /// Can be the target of a `break`.
    pub const fn is_breakable(self) -> bool {
        matches!(
            self,
            NodeTag::Block | NodeTag::For | NodeTag::While | NodeTag::Switch
        )
    }

    /// Target of an unlabelled `break`. Blocks need a label.
    pub const fn is_breakable_without_label(self) -> bool {
        matches!(self, NodeTag::For | NodeTag::While | NodeTag::Switch)
    }

    pub const fn is_loop(self) -> bool {
        matches!(self, NodeTag::For | NodeTag::While)
    }

    /// Carries a local variable conversion chain.
    pub const fn is_join_predecessor(self) -> bool {
        matches!(
            self,
            NodeTag::Ident
                | NodeTag::Binary
                | NodeTag::Block
                | NodeTag::JoinPredecessor
                | NodeTag::If
                | NodeTag::For
                | NodeTag::While
                | NodeTag::Label
                | NodeTag::Switch
                | NodeTag::Case
                | NodeTag::Try
                | NodeTag::Throw
                | NodeTag::Break
                | NodeTag::Continue
                | NodeTag::JumpToInlinedFinally
        )
    }

    /// `break`, `continue` or a jump into an inlined finally.
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            NodeTag::Break | NodeTag::Continue | NodeTag::JumpToInlinedFinally
        )
    }

    /// Has a type, in contrast to statements and structural nodes.
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            NodeTag::Ident
                | NodeTag::Literal
                | NodeTag::ArrayLiteral
                | NodeTag::Object
                | NodeTag::TemplateLiteral
                | NodeTag::Binary
                | NodeTag::Unary
                | NodeTag::Access
                | NodeTag::Index
                | NodeTag::Call
                | NodeTag::Ternary
                | NodeTag::JoinPredecessor
                | NodeTag::Function
                | NodeTag::Error
        )
    }

    /// Statement kinds. `Block` is not one; `BlockStatement` wraps it.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            NodeTag::BlockStatement
                | NodeTag::ExpressionStatement
                | NodeTag::Var
                | NodeTag::If
                | NodeTag::For
                | NodeTag::While
                | NodeTag::Label
                | NodeTag::Switch
                | NodeTag::Try
                | NodeTag::Throw
                | NodeTag::Return
                | NodeTag::Break
                | NodeTag::Continue
                | NodeTag::JumpToInlinedFinally
                | NodeTag::With
                | NodeTag::Split
                | NodeTag::Empty
                | NodeTag::Debugger
        )
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    #[inline]
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Compiler-generated node with no source token.
    pub fn is_synthetic(&self) -> bool {
        self.token.is_synthetic()
    }
}
