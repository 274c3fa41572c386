//! Node arena.
//!
//! Append-only storage for nodes. Construction lives in `build`, the
//! copy-on-write setters in `setters`, control-flow queries in
//! `control_flow` and expression typing in `typing`.

mod build;
mod children;
mod control_flow;
mod setters;
mod typing;

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::node::{
    AccessNode, ArrayLiteralNode, BinaryNode, BlockNode, BlockStatementNode, CallNode, CaseNode,
    CatchNode, ExpressionStatementNode, ForNode, FunctionNode, IdentNode, IfNode, IndexNode,
    JoinPredecessorNode, JumpNode, JumpToInlinedFinallyNode, Label, LabelKind, LabelNode,
    LiteralValue, Node, NodeId, NodeKind, NodeTag, ObjectNode, PropertyNode, ReturnNode,
    SplitNode, SwitchNode, TemplateLiteralNode, TernaryNode, ThrowNode, TryNode, UnaryNode,
    VarNode, WhileNode, WithNode,
};
use crate::{LocalVariableConversion, SymbolTable, Type};

pub use children::Children;

/// Cached `get_type` result: the local-type snapshot it was computed
/// against, and the type.
type TypeCache = FxHashMap<NodeId, (u32, Type)>;

/// Append-only store of immutable nodes.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    next_label: u32,
    type_cache: RefCell<TypeCache>,
}

#[cold]
#[track_caller]
fn wrong_kind(expected: &str, id: NodeId, found: NodeTag) -> ! {
    panic!("expected {expected} node at {id:?}, found {found}")
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let Ok(index) = u32::try_from(self.nodes.len()) else {
            panic!("node arena exceeded u32::MAX nodes");
        };
        self.nodes.push(node);
        NodeId::new(index)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.get(id).tag()
    }

    #[inline]
    pub fn start(&self, id: NodeId) -> u32 {
        self.get(id).start
    }

    #[inline]
    pub fn finish(&self, id: NodeId) -> u32 {
        self.get(id).finish
    }

    #[inline]
    pub fn line_number(&self, id: NodeId) -> i32 {
        self.get(id).line_number
    }

    /// Extend a node under construction. The only in-place mutation; it
    /// must not be used on nodes a traversal has seen.
    pub fn set_finish(&mut self, id: NodeId, finish: u32) {
        self.nodes[id.index()].finish = finish;
    }

    pub(crate) fn fresh_label(&mut self, kind: LabelKind) -> Label {
        let id = self.next_label;
        self.next_label += 1;
        Label { id, kind }
    }

    fn refresh_labels(&mut self, kind: &mut NodeKind) {
        match kind {
            NodeKind::Block(block) => {
                block.entry_label = self.fresh_label(LabelKind::BlockEntry);
                block.break_label = self.fresh_label(LabelKind::BlockBreak);
            }
            NodeKind::For(ForNode {
                break_label,
                continue_label,
                ..
            })
            | NodeKind::While(WhileNode {
                break_label,
                continue_label,
                ..
            }) => {
                *break_label = self.fresh_label(LabelKind::LoopBreak);
                *continue_label = self.fresh_label(LabelKind::LoopContinue);
            }
            NodeKind::Switch(switch) => {
                switch.break_label = self.fresh_label(LabelKind::SwitchBreak);
            }
            NodeKind::Case(case) => {
                case.entry_label = self.fresh_label(LabelKind::CaseEntry);
            }
            _ => {}
        }
    }

    /// Allocate a copy of `id` with `edit` applied to its payload.
    ///
    /// Position data is copied verbatim; labels are fresh.
    pub(crate) fn derive(&mut self, id: NodeId, edit: impl FnOnce(&mut Node)) -> NodeId {
        let mut node = self.get(id).clone();
        edit(&mut node);
        self.refresh_labels(&mut node.kind);
        self.alloc(node)
    }

    /// Conversion chain of a join predecessor; `None` for other kinds.
    pub fn conversion(&self, id: NodeId) -> Option<&LocalVariableConversion> {
        match self.kind(id) {
            NodeKind::Ident(IdentNode { conversion, .. })
            | NodeKind::Binary(BinaryNode { conversion, .. })
            | NodeKind::Block(BlockNode { conversion, .. })
            | NodeKind::JoinPredecessor(JoinPredecessorNode { conversion, .. })
            | NodeKind::If(IfNode { conversion, .. })
            | NodeKind::For(ForNode { conversion, .. })
            | NodeKind::While(WhileNode { conversion, .. })
            | NodeKind::Label(LabelNode { conversion, .. })
            | NodeKind::Switch(SwitchNode { conversion, .. })
            | NodeKind::Case(CaseNode { conversion, .. })
            | NodeKind::Try(TryNode { conversion, .. })
            | NodeKind::Throw(ThrowNode { conversion, .. })
            | NodeKind::Break(JumpNode { conversion, .. })
            | NodeKind::Continue(JumpNode { conversion, .. })
            | NodeKind::JumpToInlinedFinally(JumpToInlinedFinallyNode { conversion, .. }) => {
                conversion.as_ref()
            }
            _ => None,
        }
    }

    /// Some conversion attached to `id` has to be emitted.
    pub fn has_live_conversion(&self, id: NodeId, symbols: &SymbolTable) -> bool {
        self.conversion(id)
            .is_some_and(|conversion| conversion.is_any_live(symbols))
    }

    /// Payload of a `Break` or `Continue`.
    #[track_caller]
    pub fn jump(&self, id: NodeId) -> &JumpNode {
        match self.kind(id) {
            NodeKind::Break(jump) | NodeKind::Continue(jump) => jump,
            other => wrong_kind("Break or Continue", id, other.tag()),
        }
    }

    #[track_caller]
    pub fn literal(&self, id: NodeId) -> LiteralValue {
        match self.kind(id) {
            NodeKind::Literal(value) => *value,
            other => wrong_kind("Literal", id, other.tag()),
        }
    }
}

/// Typed payload accessors: `block(id)` panics on another kind,
/// `as_block(id)` returns `None`.
macro_rules! typed_accessors {
    ($( ($method:ident, $as_method:ident) => $variant:ident : $payload:ty ),+ $(,)?) => {
        impl NodeArena {
            $(
                #[track_caller]
                pub fn $method(&self, id: NodeId) -> &$payload {
                    match self.kind(id) {
                        NodeKind::$variant(payload) => payload,
                        other => wrong_kind(stringify!($variant), id, other.tag()),
                    }
                }

                pub fn $as_method(&self, id: NodeId) -> Option<&$payload> {
                    match self.kind(id) {
                        NodeKind::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            )+
        }
    };
}

typed_accessors! {
    (ident, as_ident) => Ident: IdentNode,
    (array_literal, as_array_literal) => ArrayLiteral: ArrayLiteralNode,
    (object, as_object) => Object: ObjectNode,
    (property, as_property) => Property: PropertyNode,
    (template_literal, as_template_literal) => TemplateLiteral: TemplateLiteralNode,
    (binary, as_binary) => Binary: BinaryNode,
    (unary, as_unary) => Unary: UnaryNode,
    (access, as_access) => Access: AccessNode,
    (index, as_index) => Index: IndexNode,
    (call, as_call) => Call: CallNode,
    (ternary, as_ternary) => Ternary: TernaryNode,
    (join_predecessor, as_join_predecessor) => JoinPredecessor: JoinPredecessorNode,
    (function, as_function) => Function: FunctionNode,
    (block, as_block) => Block: BlockNode,
    (block_statement, as_block_statement) => BlockStatement: BlockStatementNode,
    (expression_statement, as_expression_statement) => ExpressionStatement: ExpressionStatementNode,
    (var, as_var) => Var: VarNode,
    (if_node, as_if) => If: IfNode,
    (for_node, as_for) => For: ForNode,
    (while_node, as_while) => While: WhileNode,
    (label, as_label) => Label: LabelNode,
    (switch, as_switch) => Switch: SwitchNode,
    (case, as_case) => Case: CaseNode,
    (try_node, as_try) => Try: TryNode,
    (catch, as_catch) => Catch: CatchNode,
    (throw, as_throw) => Throw: ThrowNode,
    (return_node, as_return) => Return: ReturnNode,
    (jump_to_inlined_finally, as_jump_to_inlined_finally) =>
        JumpToInlinedFinally: JumpToInlinedFinallyNode,
    (with, as_with) => With: WithNode,
    (split, as_split) => Split: SplitNode,
}

impl std::fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeArena")
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
