//! Jump resolution against the lexical context.
//!
//! Jump statements name their target by source label (or not at all), so
//! the target depends on where the jump sits: `break` resolves to a
//! breakable, `continue` to a loop, and a jump to an inlined finally to the
//! labelled body of some enclosing try's inlined finally.

use tern_ir::{Label, NodeId, NodeKind};

use crate::{ContextExtension, LexicalContext};

impl<X: ContextExtension> LexicalContext<X> {
    /// The node `jump` transfers control to, or `None` when its label does
    /// not resolve in the current function.
    ///
    /// # Panics
    /// If `jump` is not a jump statement, or is a jump to an inlined
    /// finally that no try on the stack owns.
    #[track_caller]
    pub fn jump_target(&self, jump: NodeId) -> Option<NodeId> {
        match self.nodes().kind(jump) {
            NodeKind::Break(node) => self.breakable(node.label),
            NodeKind::Continue(node) => self.continue_to(node.label),
            NodeKind::JumpToInlinedFinally(node) => Some(self.inlined_finally(node.label)),
            other => panic!("{jump:?} ({}) is not a jump", other.tag()),
        }
    }

    /// Code generation label of `target` that `jump` jumps to.
    ///
    /// # Panics
    /// If `jump` is not a jump statement.
    #[track_caller]
    pub fn jump_target_label(&self, jump: NodeId, target: NodeId) -> Option<Label> {
        let nodes = self.nodes();
        match nodes.kind(jump) {
            NodeKind::Break(_) => nodes.break_label(target),
            NodeKind::Continue(_) => nodes.continue_label(target),
            NodeKind::JumpToInlinedFinally(_) => nodes.entry_label(target),
            other => panic!("{jump:?} ({}) is not a jump", other.tag()),
        }
    }

    /// The node up to which scopes are popped when `jump` executes: its
    /// target, or for a jump into an inlined finally, the try owning it.
    #[track_caller]
    pub fn pop_scope_limit(&self, jump: NodeId) -> Option<NodeId> {
        match self.nodes().kind(jump) {
            NodeKind::JumpToInlinedFinally(node) => {
                Some(self.try_node_for_inlined_finally(node.label))
            }
            _ => self.jump_target(jump),
        }
    }
}

#[cfg(test)]
mod tests;
