//! Statement node payloads.

use super::flags::{BlockFlags, ForFlags, VarFlags};
use super::label::Label;
use super::NodeId;
use crate::{LocalVariableConversion, Name, ScopeId, SymbolId};

/// Sequence of statements with its own symbol table.
///
/// A block is not a statement; statement lists hold it through a
/// `BlockStatement`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockNode {
    pub statements: Vec<NodeId>,
    /// Shared by every copy of the block.
    pub scope: ScopeId,
    pub flags: BlockFlags,
    pub entry_label: Label,
    pub break_label: Label,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStatementNode {
    pub block: NodeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionStatementNode {
    pub expression: NodeId,
}

/// `var`, `let` or `const` declaration of a single name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarNode {
    /// The declared `Ident`.
    pub name: NodeId,
    pub init: Option<NodeId>,
    pub flags: VarFlags,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfNode {
    pub test: NodeId,
    pub pass: NodeId,
    pub fail: Option<NodeId>,
    pub conversion: Option<LocalVariableConversion>,
}

/// `for`, `for-in`, `for-of` and `for each` loops.
///
/// For-in and for-of loops keep the loop variable in `init` and the
/// iterated object in `modify`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForNode {
    pub init: Option<NodeId>,
    pub test: Option<NodeId>,
    pub modify: Option<NodeId>,
    pub body: NodeId,
    pub flags: ForFlags,
    /// A `break` or `return` leaves the loop from inside the body.
    pub control_flow_escapes: bool,
    pub break_label: Label,
    pub continue_label: Label,
    pub conversion: Option<LocalVariableConversion>,
}

/// `while` and `do-while` loops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhileNode {
    pub test: Option<NodeId>,
    pub body: NodeId,
    pub is_do_while: bool,
    pub control_flow_escapes: bool,
    pub break_label: Label,
    pub continue_label: Label,
    pub conversion: Option<LocalVariableConversion>,
}

/// Source label: `name: body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelNode {
    pub label: Name,
    pub body: NodeId,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchNode {
    pub expression: NodeId,
    pub cases: Vec<NodeId>,
    /// Index of the `default` case in `cases`.
    pub default_case: Option<usize>,
    /// Every case test is a distinct int literal; codegen may use a table.
    pub unique_integer: bool,
    /// Temporary holding the switch value.
    pub tag: Option<SymbolId>,
    pub break_label: Label,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseNode {
    /// `None` for `default`.
    pub test: Option<NodeId>,
    /// Body `Block`.
    pub body: NodeId,
    pub entry_label: Label,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TryNode {
    /// Body `Block`.
    pub body: NodeId,
    /// Blocks each wrapping one `Catch`.
    pub catch_blocks: Vec<NodeId>,
    pub finally_body: Option<NodeId>,
    /// Copies of the finally body inlined at each exit, each a `Block`
    /// holding a single `Label` statement.
    pub inlined_finallies: Vec<NodeId>,
    /// Symbol holding the caught exception.
    pub exception: Option<SymbolId>,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatchNode {
    /// Catch binding: an `Ident`, or an array or object pattern.
    pub exception: NodeId,
    /// Conditional catch guard (`catch (e if cond)`).
    pub condition: Option<NodeId>,
    /// Body `Block`.
    pub body: NodeId,
    /// Catch-all rethrow introduced by finally inlining.
    pub is_synthetic_rethrow: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrowNode {
    pub expression: NodeId,
    /// Rethrow of a synthetic catch-all; codegen must not unwrap the value.
    pub is_synthetic_rethrow: bool,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnNode {
    pub expression: Option<NodeId>,
}

/// `break` or `continue`, optionally labelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpNode {
    pub label: Option<Name>,
    pub conversion: Option<LocalVariableConversion>,
}

/// Jump into the inlined finally labelled `label`. Resolved against the
/// lexical context wherever the jump is encountered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpToInlinedFinallyNode {
    pub label: Name,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithNode {
    pub expression: NodeId,
    /// Body `Block`.
    pub body: NodeId,
}

/// Part of a function body compiled as a separate method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitNode {
    pub name: Name,
    /// Body `Block`.
    pub body: NodeId,
    pub compile_unit: u32,
}
