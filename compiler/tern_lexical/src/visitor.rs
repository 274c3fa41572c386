//! The visitor protocol.
//!
//! A pass implements [`NodeVisitor`] and overrides the hooks for the node
//! kinds it cares about; every other kind falls through to
//! [`NodeVisitor::enter_default`] and [`NodeVisitor::leave_default`].
//!
//! - `enter_*` runs before the children are visited. Returning `false`
//!   skips the children and the matching `leave_*`.
//! - `leave_*` runs after the children were visited and receives the node
//!   rebuilt from the new children. It returns the node that replaces it
//!   in the parent: the same id to keep it, another node to rewrite it.
//!
//! Lexical-context nodes are on top of the stack during both hooks.

use tern_ir::{NodeId, NodeTag};

use crate::{ContextExtension, LexicalContext};

/// Declare the visitor trait and its dispatch from one list of node kinds.
macro_rules! define_visitor {
    ($( $tag:ident => $enter:ident, $leave:ident; )+) => {
        /// Hooks called by [`traverse`](crate::traverse) for every node.
        pub trait NodeVisitor<X: ContextExtension = ()> {
            /// Fallback for every `enter_*` hook.
            fn enter_default(&mut self, _lc: &mut LexicalContext<X>, _node: NodeId) -> bool {
                true
            }

            /// Fallback for every `leave_*` hook.
            fn leave_default(&mut self, _lc: &mut LexicalContext<X>, node: NodeId) -> NodeId {
                node
            }

            $(
                #[doc = concat!(
                    "Called before the children of a `", stringify!($tag), "` are visited."
                )]
                fn $enter(&mut self, lc: &mut LexicalContext<X>, node: NodeId) -> bool {
                    self.enter_default(lc, node)
                }

                #[doc = concat!(
                    "Called after the children of a `", stringify!($tag), "` were visited."
                )]
                fn $leave(&mut self, lc: &mut LexicalContext<X>, node: NodeId) -> NodeId {
                    self.leave_default(lc, node)
                }
            )+
        }

        pub(crate) fn dispatch_enter<X, V>(
            visitor: &mut V,
            lc: &mut LexicalContext<X>,
            tag: NodeTag,
            node: NodeId,
        ) -> bool
        where
            X: ContextExtension,
            V: NodeVisitor<X> + ?Sized,
        {
            match tag {
                $( NodeTag::$tag => visitor.$enter(lc, node), )+
            }
        }

        pub(crate) fn dispatch_leave<X, V>(
            visitor: &mut V,
            lc: &mut LexicalContext<X>,
            tag: NodeTag,
            node: NodeId,
        ) -> NodeId
        where
            X: ContextExtension,
            V: NodeVisitor<X> + ?Sized,
        {
            match tag {
                $( NodeTag::$tag => visitor.$leave(lc, node), )+
            }
        }
    };
}

define_visitor! {
    Ident => enter_ident, leave_ident;
    Literal => enter_literal, leave_literal;
    ArrayLiteral => enter_array_literal, leave_array_literal;
    Object => enter_object, leave_object;
    Property => enter_property, leave_property;
    TemplateLiteral => enter_template_literal, leave_template_literal;
    Binary => enter_binary, leave_binary;
    Unary => enter_unary, leave_unary;
    Access => enter_access, leave_access;
    Index => enter_index, leave_index;
    Call => enter_call, leave_call;
    Ternary => enter_ternary, leave_ternary;
    JoinPredecessor => enter_join_predecessor, leave_join_predecessor;
    Function => enter_function, leave_function;
    Error => enter_error, leave_error;
    Block => enter_block, leave_block;
    BlockStatement => enter_block_statement, leave_block_statement;
    ExpressionStatement => enter_expression_statement, leave_expression_statement;
    Var => enter_var, leave_var;
    If => enter_if, leave_if;
    For => enter_for, leave_for;
    While => enter_while, leave_while;
    Label => enter_label, leave_label;
    Switch => enter_switch, leave_switch;
    Case => enter_case, leave_case;
    Try => enter_try, leave_try;
    Catch => enter_catch, leave_catch;
    Throw => enter_throw, leave_throw;
    Return => enter_return, leave_return;
    Break => enter_break, leave_break;
    Continue => enter_continue, leave_continue;
    JumpToInlinedFinally => enter_jump_to_inlined_finally, leave_jump_to_inlined_finally;
    With => enter_with, leave_with;
    Split => enter_split, leave_split;
    Empty => enter_empty, leave_empty;
    Debugger => enter_debugger, leave_debugger;
}
