//! Reachability queries.
//!
//! A statement is *terminal* when control never falls through it, and
//! *has a goto* when it transfers control elsewhere (`break`, `continue`,
//! a loop with no test). Blocks cache terminality in IS_TERMINAL.

use super::NodeArena;
use crate::node::{BlockFlags, ForFlags, Label, NodeId, NodeKind};

impl NodeArena {
    /// Control flow never falls through `id`.
    pub fn is_terminal(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Block(block) => block.flags.contains(BlockFlags::IS_TERMINAL),
            NodeKind::BlockStatement(statement) => self.is_terminal(statement.block),
            NodeKind::Throw(_) | NodeKind::Return(_) => true,
            NodeKind::If(if_node) => {
                self.is_terminal(if_node.pass)
                    && if_node.fail.is_some_and(|fail| self.is_terminal(fail))
            }
            NodeKind::For(_) | NodeKind::While(_) => self.is_terminal_loop(id),
            // A labelled body may be left by `break label`; only loops track
            // that through `control_flow_escapes`.
            NodeKind::Label(label) => {
                self.tag(label.body).is_loop() && self.is_terminal_loop(label.body)
            }
            NodeKind::Switch(switch) => {
                switch.default_case.is_some()
                    && !switch.cases.is_empty()
                    && switch.cases.iter().all(|&case| self.is_terminal(case))
            }
            NodeKind::Case(case) => self.is_terminal(case.body),
            NodeKind::Try(try_node) => {
                self.is_terminal(try_node.body)
                    && try_node.catch_blocks.iter().all(|&block| self.is_terminal(block))
            }
            NodeKind::Catch(catch) => self.is_terminal(catch.body),
            NodeKind::With(with) => self.is_terminal(with.body),
            NodeKind::Split(split) => self.is_terminal(split.body),
            _ => false,
        }
    }

    fn is_terminal_loop(&self, id: NodeId) -> bool {
        let (test, body, escapes) = match self.kind(id) {
            NodeKind::For(f) => (f.test, f.body, f.control_flow_escapes),
            NodeKind::While(w) => (w.test, w.body, w.control_flow_escapes),
            _ => return false,
        };
        if !self.must_enter(id) || escapes {
            return false;
        }
        self.is_terminal(body) || test.is_none()
    }

    /// Transfers control somewhere other than the next statement.
    pub fn has_goto(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Break(_) | NodeKind::Continue(_) | NodeKind::JumpToInlinedFinally(_) => true,
            NodeKind::For(f) => !Self::is_for_in_or_of(f.flags) && f.test.is_none(),
            NodeKind::While(w) => w.test.is_none(),
            _ => false,
        }
    }

    /// Terminal or has a goto: nothing after it in the same list runs.
    pub fn has_terminal_flags(&self, id: NodeId) -> bool {
        self.is_terminal(id) || self.has_goto(id)
    }

    /// The loop body runs at least once.
    ///
    /// True for `do-while` and for loops without a test; never for
    /// for-in and for-of, whose collection may be empty.
    pub fn must_enter(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::For(f) => !Self::is_for_in_or_of(f.flags) && f.test.is_none(),
            NodeKind::While(w) => w.is_do_while || w.test.is_none(),
            _ => false,
        }
    }

    fn is_for_in_or_of(flags: ForFlags) -> bool {
        flags.intersects(ForFlags::IS_FOR_IN | ForFlags::IS_FOR_OF)
    }

    /// Label a `break` targeting `id` jumps to.
    pub fn break_label(&self, id: NodeId) -> Option<Label> {
        match self.kind(id) {
            NodeKind::Block(block) => Some(block.break_label),
            NodeKind::For(f) => Some(f.break_label),
            NodeKind::While(w) => Some(w.break_label),
            NodeKind::Switch(switch) => Some(switch.break_label),
            _ => None,
        }
    }

    /// Label a `continue` targeting the loop `id` jumps to.
    pub fn continue_label(&self, id: NodeId) -> Option<Label> {
        match self.kind(id) {
            NodeKind::For(f) => Some(f.continue_label),
            NodeKind::While(w) => Some(w.continue_label),
            _ => None,
        }
    }

    /// Entry label of a block or case.
    pub fn entry_label(&self, id: NodeId) -> Option<Label> {
        match self.kind(id) {
            NodeKind::Block(block) => Some(block.entry_label),
            NodeKind::Case(case) => Some(case.entry_label),
            _ => None,
        }
    }
}
