//! The lexical context: the stack of lexical-context nodes that are
//! ancestors of whatever a traversal is visiting.
//!
//! Only scope-forming nodes are pushed (blocks, functions, labels, loops,
//! switches, try, with and split nodes; see
//! [`NodeTag::is_lexical_context`]). Every frame carries a `u32` of flags
//! that passes accumulate while the node's subtree is visited; the flags are
//! OR'd into the node when it is popped, since the node itself is immutable.
//!
//! The context owns the [`Ir`] for the duration of a traversal, so
//! visitors rewrite nodes through [`LexicalContext::ir_mut`] and query
//! ancestors through the same handle.
//!
//! Extensions hook into push and pop (see [`ContextExtension`]):
//! [`BlockStatements`](crate::BlockStatements) accumulates statement lists,
//! [`OptimisticAssumptions`](crate::OptimisticAssumptions) logs per-function
//! type assumptions.

use tern_ir::{
    BlockFlags, FunctionFlags, Ir, LabelNode, Name, NodeArena, NodeId, NodeKind, NodeTag, SymbolId,
};
use tracing::trace;

/// Behaviour layered onto a [`LexicalContext`].
///
/// All hooks default to no-ops. Extensions compose as tuples: `(A, B)`
/// runs `A`'s hooks before `B`'s.
pub trait ContextExtension {
    /// `node` was pushed.
    fn on_push(&mut self, _ir: &Ir, _node: NodeId) {}

    /// The traversal rebuilt `statement`, a direct child of the block on
    /// top of the stack.
    fn on_statement(&mut self, _statement: NodeId) {}

    /// `node` is about to be popped. Returns the node to pop in its place.
    fn before_pop(&mut self, _ir: &mut Ir, node: NodeId) -> NodeId {
        node
    }

    /// `node` was popped with its frame flags applied.
    fn after_pop(&mut self, _ir: &Ir, _node: NodeId) {}
}

impl ContextExtension for () {}

impl<A: ContextExtension, B: ContextExtension> ContextExtension for (A, B) {
    fn on_push(&mut self, ir: &Ir, node: NodeId) {
        self.0.on_push(ir, node);
        self.1.on_push(ir, node);
    }

    fn on_statement(&mut self, statement: NodeId) {
        self.0.on_statement(statement);
        self.1.on_statement(statement);
    }

    fn before_pop(&mut self, ir: &mut Ir, node: NodeId) -> NodeId {
        let node = self.0.before_pop(ir, node);
        self.1.before_pop(ir, node)
    }

    fn after_pop(&mut self, ir: &Ir, node: NodeId) {
        self.0.after_pop(ir, node);
        self.1.after_pop(ir, node);
    }
}

/// Stack of lexical-context nodes with per-frame flags.
pub struct LexicalContext<X: ContextExtension = ()> {
    ir: Ir,
    stack: Vec<NodeId>,
    flags: Vec<u32>,
    ext: X,
}

impl LexicalContext {
    pub fn new(ir: Ir) -> Self {
        Self::with_extension(ir, ())
    }
}

impl<X: ContextExtension> LexicalContext<X> {
    /// Initial stack capacity; grows by doubling.
    const INITIAL_CAPACITY: usize = 16;

    pub fn with_extension(ir: Ir, ext: X) -> Self {
        LexicalContext {
            ir,
            stack: Vec::with_capacity(Self::INITIAL_CAPACITY),
            flags: Vec::with_capacity(Self::INITIAL_CAPACITY),
            ext,
        }
    }

    pub fn ir(&self) -> &Ir {
        &self.ir
    }

    pub fn ir_mut(&mut self) -> &mut Ir {
        &mut self.ir
    }

    /// Shorthand for `self.ir().nodes`.
    pub fn nodes(&self) -> &NodeArena {
        &self.ir.nodes
    }

    pub fn extension(&self) -> &X {
        &self.ext
    }

    pub fn extension_mut(&mut self) -> &mut X {
        &mut self.ext
    }

    /// Hand the IR back after a traversal.
    ///
    /// # Panics
    /// If nodes are still on the stack.
    pub fn into_ir(self) -> Ir {
        assert!(
            self.stack.is_empty(),
            "lexical context still holds {} nodes",
            self.stack.len()
        );
        self.ir
    }

    // Stack discipline

    /// Push a lexical-context node with empty frame flags.
    pub fn push(&mut self, node: NodeId) -> NodeId {
        debug_assert!(
            self.nodes().tag(node).is_lexical_context(),
            "{node:?} ({}) is not a lexical-context node",
            self.nodes().tag(node)
        );
        debug_assert!(!self.contains(node), "{node:?} is already on the stack");
        self.stack.push(node);
        self.flags.push(0);
        trace!(depth = self.stack.len(), ?node, "push");
        self.ext.on_push(&self.ir, node);
        node
    }

    /// Pop `node`, which must be on top, and return it with the flags
    /// accumulated on its frame applied.
    ///
    /// # Panics
    /// If `node` is not the top of the stack.
    #[track_caller]
    pub fn pop(&mut self, node: NodeId) -> NodeId {
        let top = self.stack.last().copied();
        assert_eq!(top, Some(node), "popping {node:?}, which is not on top of the stack");
        let node = self.ext.before_pop(&mut self.ir, node);
        self.stack.pop();
        let bits = self.flags.pop().unwrap_or_default();
        let node = self.ir.nodes.apply_frame_flags(node, bits);
        trace!(depth = self.stack.len(), ?node, bits, "pop");
        self.ext.after_pop(&self.ir, node);
        node
    }

    /// Replace the top of the stack, which must be `old`, with `new`.
    ///
    /// Used when a node is rebuilt while its subtree is being visited.
    ///
    /// # Panics
    /// If `old` is not the top of the stack.
    #[track_caller]
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> NodeId {
        let Some(top) = self.stack.last_mut().filter(|top| **top == old) else {
            panic!("replacing {old:?}, which is not on top of the stack");
        };
        if old == new {
            return new;
        }
        *top = new;
        trace!(depth = self.stack.len(), ?old, ?new, "replace");
        new
    }

    pub fn peek(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    pub fn size(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.stack.contains(&node)
    }

    pub(crate) fn note_statement(&mut self, statement: NodeId) {
        self.ext.on_statement(statement);
    }

    // Frame flags

    fn frame_of(&self, node: NodeId) -> Option<usize> {
        self.stack.iter().rposition(|&n| n == node)
    }

    /// OR `flag` into the frame of `node`; applied when `node` is popped.
    ///
    /// # Panics
    /// If `node` is not on the stack.
    #[track_caller]
    pub fn set_flag(&mut self, node: NodeId, flag: u32) {
        if flag == 0 {
            return;
        }
        let Some(frame) = self.frame_of(node) else {
            panic!("setting flags on {node:?}, which is not on the stack");
        };
        self.flags[frame] |= flag;
    }

    /// Pending frame flags of `node`; 0 when it is not on the stack.
    pub fn get_flags(&self, node: NodeId) -> u32 {
        self.frame_of(node).map_or(0, |frame| self.flags[frame])
    }

    /// Mark `block` as needing a scope object, and the nearest function
    /// below it as having a scope block.
    ///
    /// # Panics
    /// If `block` is not on the stack.
    #[track_caller]
    pub fn set_block_needs_scope(&mut self, block: NodeId) {
        let Some(frame) = self.frame_of(block) else {
            panic!("{block:?} is not on the stack");
        };
        self.flags[frame] |= BlockFlags::NEEDS_SCOPE.bits();
        let function = (0..frame)
            .rev()
            .find(|&i| self.nodes().tag(self.stack[i]) == NodeTag::Function);
        if let Some(function) = function {
            self.flags[function] |= FunctionFlags::HAS_SCOPE_BLOCK.bits();
        }
    }

    fn needs_scope(&self, frame: usize) -> bool {
        let node = self.stack[frame];
        let pending = BlockFlags::from_bits_retain(self.flags[frame]);
        self.nodes()
            .as_block(node)
            .is_some_and(|block| (block.flags | pending).contains(BlockFlags::NEEDS_SCOPE))
    }

    // Iteration

    /// Every node on the stack, innermost first.
    pub fn nodes_top_down(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.stack.iter().rev().copied()
    }

    fn of_tag(&self, tag: NodeTag) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_top_down()
            .filter(move |&node| self.nodes().tag(node) == tag)
    }

    /// Nodes above the current function, innermost first. The whole stack
    /// when no function is open.
    fn within_function(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_top_down()
            .take_while(move |&node| self.nodes().tag(node) != NodeTag::Function)
    }

    /// Nodes below `node`, innermost first.
    ///
    /// # Panics
    /// If `node` is not on the stack.
    #[track_caller]
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let Some(frame) = self.frame_of(node) else {
            panic!("{node:?} is not on the stack");
        };
        self.stack[..frame].iter().rev().copied()
    }

    pub fn functions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.of_tag(NodeTag::Function)
    }

    pub fn blocks(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.of_tag(NodeTag::Block)
    }

    // Ancestor queries

    pub fn current_function(&self) -> Option<NodeId> {
        self.functions().next()
    }

    pub fn current_block(&self) -> Option<NodeId> {
        self.blocks().next()
    }

    /// Innermost loop within the current function.
    pub fn current_loop(&self) -> Option<NodeId> {
        self.within_function()
            .find(|&node| self.nodes().tag(node).is_loop())
    }

    /// The block enclosing the current block within the current function,
    /// `None` when the current block is the function body.
    pub fn parent_block(&self) -> Option<NodeId> {
        self.within_function()
            .filter(|&node| self.nodes().tag(node) == NodeTag::Block)
            .nth(1)
    }

    /// The current block is the body of the current function.
    pub fn is_function_body(&self) -> bool {
        self.parent_block().is_none()
    }

    /// The function nearest to the bottom of the stack.
    pub fn outermost_function(&self) -> Option<NodeId> {
        self.stack
            .iter()
            .copied()
            .find(|&node| self.nodes().tag(node) == NodeTag::Function)
    }

    /// The function enclosing `function`.
    pub fn parent_function(&self, function: NodeId) -> Option<NodeId> {
        self.functions()
            .skip_while(|&node| node != function)
            .nth(1)
    }

    /// The body block of `function`: the frame pushed right after it.
    ///
    /// # Panics
    /// If `function` is not on the stack or its body is not being visited.
    #[track_caller]
    pub fn function_body(&self, function: NodeId) -> NodeId {
        let body = self
            .frame_of(function)
            .and_then(|frame| self.stack.get(frame + 1).copied());
        match body {
            Some(body) if self.nodes().tag(body) == NodeTag::Block => body,
            _ => panic!("the body of {function:?} is not on the stack"),
        }
    }

    /// The open block whose scope defines `symbol`.
    ///
    /// # Panics
    /// If no block on the stack defines `symbol`.
    #[track_caller]
    pub fn defining_block(&self, symbol: SymbolId) -> NodeId {
        match self.defining_frame(symbol) {
            Some(frame) => self.stack[frame],
            None => panic!("{} is not defined in the lexical context", self.ir.symbol_name(symbol)),
        }
    }

    /// The function containing the block that defines `symbol`.
    ///
    /// # Panics
    /// If no block on the stack defines `symbol`, or that block has no
    /// enclosing function.
    #[track_caller]
    pub fn defining_function(&self, symbol: SymbolId) -> NodeId {
        let Some(frame) = self.defining_frame(symbol) else {
            panic!("{} is not defined in the lexical context", self.ir.symbol_name(symbol));
        };
        let function = self.stack[..frame]
            .iter()
            .rev()
            .copied()
            .find(|&node| self.nodes().tag(node) == NodeTag::Function);
        match function {
            Some(function) => function,
            None => panic!("the block defining {} has no function", self.ir.symbol_name(symbol)),
        }
    }

    fn defining_frame(&self, symbol: SymbolId) -> Option<usize> {
        let name = self.ir.symbols[symbol].name();
        self.stack.iter().rposition(|&node| {
            self.nodes().as_block(node).is_some_and(|block| {
                self.ir.symbols.existing_symbol(block.scope, name) == Some(symbol)
            })
        })
    }

    // Labels and jump targets

    /// The label node named `name` within the current function.
    pub fn find_label(&self, name: Name) -> Option<NodeId> {
        self.within_function()
            .find(|&node| self.nodes().as_label(node).is_some_and(|label| label.label == name))
    }

    /// Target of `break` or `break name`.
    ///
    /// A labelled break targets the breakable nearest to its label node, so
    /// `outer: while (..) { for (..) { break outer; } }` resolves to the
    /// while. An unlabelled break targets the innermost loop or switch of
    /// the current function.
    pub fn breakable(&self, label: Option<Name>) -> Option<NodeId> {
        match label {
            Some(name) => {
                let label = self.find_label(name)?;
                self.nodes_top_down()
                    .take_while(|&node| node != label)
                    .filter(|&node| self.nodes().tag(node).is_breakable())
                    .last()
            }
            None => self
                .within_function()
                .find(|&node| self.nodes().tag(node).is_breakable_without_label()),
        }
    }

    /// Target loop of `continue` or `continue name`.
    pub fn continue_to(&self, label: Option<Name>) -> Option<NodeId> {
        match label {
            Some(name) => {
                let label = self.find_label(name)?;
                self.nodes_top_down()
                    .take_while(|&node| node != label)
                    .filter(|&node| self.nodes().tag(node).is_loop())
                    .last()
            }
            None => self.current_loop(),
        }
    }

    /// Body of the inlined finally labelled `label` of some try on the
    /// stack.
    ///
    /// # Panics
    /// If no try on the stack has such an inlined finally.
    #[track_caller]
    pub fn inlined_finally(&self, label: Name) -> NodeId {
        let found = self
            .of_tag(NodeTag::Try)
            .find_map(|try_node| inlined_finally_of(self.nodes(), try_node, label));
        match found {
            Some(body) => body,
            None => panic!("inlined finally {} not found", self.ir.resolve(label)),
        }
    }

    /// The try node owning the inlined finally labelled `label`.
    ///
    /// # Panics
    /// If no try on the stack has such an inlined finally.
    #[track_caller]
    pub fn try_node_for_inlined_finally(&self, label: Name) -> NodeId {
        let found = self
            .of_tag(NodeTag::Try)
            .find(|&try_node| inlined_finally_of(self.nodes(), try_node, label).is_some());
        match found {
            Some(try_node) => try_node,
            None => panic!("inlined finally {} not found", self.ir.resolve(label)),
        }
    }

    /// Scope objects to pop when jumping from the top of the stack to
    /// `target`: one per `with` and per block needing a scope.
    ///
    /// Returns 0 when a split intervenes, since a split method restores
    /// the scope itself.
    ///
    /// # Panics
    /// If `target` is not on the stack, or a function lies between the top
    /// of the stack and `target`.
    #[track_caller]
    pub fn scope_nesting_level_to(&self, target: NodeId) -> usize {
        let Some(target_frame) = self.frame_of(target) else {
            panic!("{target:?} is not on the stack");
        };
        let mut level = 0;
        for frame in (target_frame + 1..self.stack.len()).rev() {
            let node = self.stack[frame];
            match self.nodes().tag(node) {
                NodeTag::Split => return 0,
                NodeTag::Function => panic!("scope nesting crosses {node:?}"),
                NodeTag::With => level += 1,
                NodeTag::Block if self.needs_scope(frame) => level += 1,
                _ => {}
            }
        }
        level
    }

    /// Name resolution is dynamic: a `with` is open, or some open function
    /// runs in a dynamic context.
    pub fn in_dynamic_scope(&self) -> bool {
        self.nodes_top_down().any(|node| match self.nodes().kind(node) {
            NodeKind::With(_) => true,
            NodeKind::Function(function) => {
                function.flags.contains(FunctionFlags::IN_DYNAMIC_CONTEXT)
            }
            _ => false,
        })
    }

    /// A jump from inside `split` to `target` leaves the split method.
    ///
    /// # Panics
    /// If neither `split` nor `target` is on the stack.
    #[track_caller]
    pub fn is_external_target(&self, split: NodeId, target: NodeId) -> bool {
        for node in self.nodes_top_down() {
            if node == split {
                return true;
            }
            if node == target {
                return false;
            }
            if let Some(try_node) = self.nodes().as_try(node) {
                let inlined = try_node
                    .inlined_finallies
                    .iter()
                    .any(|&block| labelled_inlined_finally(self.nodes(), block) == Some(target));
                if inlined {
                    return false;
                }
            }
        }
        panic!("{target:?} was expected in the lexical context");
    }
}

/// The label statement opening an inlined finally block.
fn inlined_finally_label(nodes: &NodeArena, block: NodeId) -> Option<&LabelNode> {
    let first = *nodes.as_block(block)?.statements.first()?;
    nodes.as_label(first)
}

/// Body of the label statement opening an inlined finally block.
fn labelled_inlined_finally(nodes: &NodeArena, block: NodeId) -> Option<NodeId> {
    inlined_finally_label(nodes, block).map(|label| label.body)
}

fn inlined_finally_of(nodes: &NodeArena, try_node: NodeId, name: Name) -> Option<NodeId> {
    nodes
        .try_node(try_node)
        .inlined_finallies
        .iter()
        .filter_map(|&block| inlined_finally_label(nodes, block))
        .find(|label| label.label == name)
        .map(|label| label.body)
}

impl<X: ContextExtension> std::fmt::Debug for LexicalContext<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stack.iter().zip(&self.flags).map(|(&node, &flags)| {
                (self.nodes().tag(node), node, flags)
            }))
            .finish()
    }
}
