//! Dead statement trimming for lowering passes.
//!
//! Statements after a terminal statement or a jump never run. They are
//! dropped when their block is popped, except for `var` declarations,
//! which are hoisted to the function and must keep declaring their name.
//! Those survive with their initialisers removed.

use tern_ir::{Ir, NodeArena, NodeId, NodeTag, VarFlags};

use crate::{BlockHooks, BlockLexicalContext};

/// [`BlockHooks`] trimming unreachable statements.
#[derive(Copy, Clone, Debug, Default)]
pub struct TerminalTrimming;

/// A block lexical context trimming unreachable statements.
pub type TrimmingLexicalContext = BlockLexicalContext<TerminalTrimming>;

impl BlockHooks for TerminalTrimming {
    fn pop_statements(&mut self, ir: &mut Ir, statements: Vec<NodeId>) -> Vec<NodeId> {
        let mut kept = Vec::with_capacity(statements.len());
        let mut terminated = false;
        for statement in statements {
            if terminated {
                extract_var_declarations(&mut ir.nodes, statement, &mut kept);
                continue;
            }
            kept.push(statement);
            terminated = ir.nodes.is_terminal(statement) || ir.nodes.tag(statement).is_jump();
        }
        kept
    }

    /// Terminality comes from the last statement that is not an
    /// uninitialised `var`; only those can follow a terminal statement.
    fn after_set_statements(&mut self, ir: &mut Ir, block: NodeId) -> NodeId {
        let nodes = &ir.nodes;
        let is_terminal = nodes
            .block(block)
            .statements
            .iter()
            .rev()
            .find(|&&statement| !is_uninitialized_var(nodes, statement))
            .is_some_and(|&statement| nodes.is_terminal(statement));
        ir.nodes.set_block_is_terminal(block, is_terminal)
    }
}

fn is_uninitialized_var(nodes: &NodeArena, statement: NodeId) -> bool {
    nodes.as_var(statement).is_some_and(|var| var.init.is_none())
}

/// Append the function-scoped `var` declarations under `root`, without
/// their initialisers, to `out`. Nested functions are not searched.
fn extract_var_declarations(nodes: &mut NodeArena, root: NodeId, out: &mut Vec<NodeId>) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        match nodes.tag(node) {
            NodeTag::Function => {}
            NodeTag::Var => {
                let flags = nodes.var(node).flags;
                let block_scoped = flags.intersects(VarFlags::IS_LET | VarFlags::IS_CONST);
                if !block_scoped {
                    out.push(nodes.set_var_init(node, None));
                }
            }
            _ => pending.extend(nodes.children(node).into_iter().rev()),
        }
    }
}

#[cfg(test)]
mod tests;
