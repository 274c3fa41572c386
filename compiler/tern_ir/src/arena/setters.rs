//! Copy-on-write setters.
//!
//! `set_x(id, v)` returns `id` itself when `v` equals the current value
//! (child ids compare by identity, conversion chains by allocation) and a
//! fresh copy with only `x` replaced otherwise. Nothing else mutates a node.

use super::{NodeArena, wrong_kind};
use crate::node::{
    AccessNode, BaseFlags, BinaryNode, BlockFlags, CallNode, EvalArgs, ForFlags, FunctionFlags,
    IdentFlags, IdentNode, IndexNode, NodeId, NodeKind, Optimistic, UnaryNode, VarFlags,
};
use crate::{IrError, IrResult, LocalVariableConversion, NodeTag, SymbolId, Type};

/// Generate `set_<field>` methods for one payload field each.
macro_rules! field_setters {
    ($( $(#[$meta:meta])* $method:ident => $variant:ident . $field:ident : $ty:ty ),+ $(,)?) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                #[track_caller]
                pub fn $method(&mut self, id: NodeId, value: $ty) -> NodeId {
                    let unchanged = match self.kind(id) {
                        NodeKind::$variant(payload) => payload.$field == value,
                        other => wrong_kind(stringify!($variant), id, other.tag()),
                    };
                    if unchanged {
                        return id;
                    }
                    self.derive(id, |node| {
                        if let NodeKind::$variant(payload) = &mut node.kind {
                            payload.$field = value;
                        }
                    })
                }
            )+
        }
    };
}

field_setters! {
    // Block
    set_block_flags => Block.flags: BlockFlags,

    // Function
    set_function_ident => Function.ident: Option<NodeId>,
    set_function_params => Function.params: Vec<NodeId>,
    set_function_body => Function.body: NodeId,
    set_function_flags => Function.flags: FunctionFlags,
    set_function_return_type => Function.return_type: Type,

    // Ident
    set_ident_flags => Ident.flags: IdentFlags,

    // Operators
    set_binary_lhs => Binary.lhs: NodeId,
    set_binary_rhs => Binary.rhs: NodeId,
    set_unary_expression => Unary.expression: NodeId,

    // Access, index and call
    set_access_base => Access.base: NodeId,
    set_index_base => Index.base: NodeId,
    set_index_index => Index.index: NodeId,
    set_call_function => Call.function: NodeId,
    set_call_args => Call.args: Vec<NodeId>,
    /// Eval arguments must come from [`NodeArena::eval_args`].
    set_call_eval_args => Call.eval_args: Option<EvalArgs>,

    // Literals
    set_array_literal_elements => ArrayLiteral.elements: Vec<Option<NodeId>>,
    set_object_properties => Object.properties: Vec<NodeId>,
    set_property_key => Property.key: NodeId,
    set_property_value => Property.value: Option<NodeId>,
    set_property_getter => Property.getter: Option<NodeId>,
    set_property_setter => Property.setter: Option<NodeId>,
    set_template_literal_exprs => TemplateLiteral.exprs: Vec<NodeId>,

    // Ternary and join predecessor
    set_ternary_test => Ternary.test: NodeId,
    set_ternary_true_expr => Ternary.true_expr: NodeId,
    set_ternary_false_expr => Ternary.false_expr: NodeId,
    set_join_predecessor_expression => JoinPredecessor.expression: Option<NodeId>,

    // Simple statements
    set_block_statement_block => BlockStatement.block: NodeId,
    set_expression_statement_expression => ExpressionStatement.expression: NodeId,
    set_var_name => Var.name: NodeId,
    set_var_init => Var.init: Option<NodeId>,
    set_var_flags => Var.flags: VarFlags,
    set_throw_expression => Throw.expression: NodeId,
    set_return_expression => Return.expression: Option<NodeId>,

    // Control flow
    set_if_test => If.test: NodeId,
    set_if_pass => If.pass: NodeId,
    set_if_fail => If.fail: Option<NodeId>,
    set_for_init => For.init: Option<NodeId>,
    set_for_test => For.test: Option<NodeId>,
    set_for_modify => For.modify: Option<NodeId>,
    set_for_body => For.body: NodeId,
    set_for_flags => For.flags: ForFlags,
    set_while_test => While.test: Option<NodeId>,
    set_while_body => While.body: NodeId,
    set_label_body => Label.body: NodeId,
    set_switch_expression => Switch.expression: NodeId,
    set_switch_unique_integer => Switch.unique_integer: bool,
    set_switch_tag => Switch.tag: Option<SymbolId>,
    set_case_test => Case.test: Option<NodeId>,
    set_case_body => Case.body: NodeId,
    set_try_body => Try.body: NodeId,
    set_try_catch_blocks => Try.catch_blocks: Vec<NodeId>,
    set_try_finally_body => Try.finally_body: Option<NodeId>,
    set_try_inlined_finallies => Try.inlined_finallies: Vec<NodeId>,
    set_try_exception => Try.exception: Option<SymbolId>,
    set_catch_condition => Catch.condition: Option<NodeId>,
    set_catch_body => Catch.body: NodeId,
    set_with_expression => With.expression: NodeId,
    set_with_body => With.body: NodeId,
    set_split_body => Split.body: NodeId,
}

fn optimistic_mut(kind: &mut NodeKind) -> Option<&mut Optimistic> {
    match kind {
        NodeKind::Ident(IdentNode { optimistic, .. })
        | NodeKind::Binary(BinaryNode { optimistic, .. })
        | NodeKind::Unary(UnaryNode { optimistic, .. })
        | NodeKind::Access(AccessNode { optimistic, .. })
        | NodeKind::Index(IndexNode { optimistic, .. })
        | NodeKind::Call(CallNode { optimistic, .. }) => Some(optimistic),
        _ => None,
    }
}

fn conversion_mut(kind: &mut NodeKind) -> Option<&mut Option<LocalVariableConversion>> {
    match kind {
        NodeKind::Ident(n) => Some(&mut n.conversion),
        NodeKind::Binary(n) => Some(&mut n.conversion),
        NodeKind::Block(n) => Some(&mut n.conversion),
        NodeKind::JoinPredecessor(n) => Some(&mut n.conversion),
        NodeKind::If(n) => Some(&mut n.conversion),
        NodeKind::For(n) => Some(&mut n.conversion),
        NodeKind::While(n) => Some(&mut n.conversion),
        NodeKind::Label(n) => Some(&mut n.conversion),
        NodeKind::Switch(n) => Some(&mut n.conversion),
        NodeKind::Case(n) => Some(&mut n.conversion),
        NodeKind::Try(n) => Some(&mut n.conversion),
        NodeKind::Throw(n) => Some(&mut n.conversion),
        NodeKind::Break(n) | NodeKind::Continue(n) => Some(&mut n.conversion),
        NodeKind::JumpToInlinedFinally(n) => Some(&mut n.conversion),
        _ => None,
    }
}

impl NodeArena {
    /// Replace the statements of a block.
    ///
    /// IS_TERMINAL is recomputed from the new last statement and `finish`
    /// grows to cover it.
    pub fn set_block_statements(&mut self, id: NodeId, statements: Vec<NodeId>) -> NodeId {
        if self.block(id).statements == statements {
            return id;
        }
        let last = statements.last().copied();
        let is_terminal = last.is_some_and(|s| self.has_terminal_flags(s));
        let finish = last.map_or(self.finish(id), |s| self.finish(id).max(self.finish(s)));
        self.derive(id, |node| {
            node.finish = finish;
            if let NodeKind::Block(block) = &mut node.kind {
                block.statements = statements;
                block.flags.set(BlockFlags::IS_TERMINAL, is_terminal);
            }
        })
    }

    pub fn set_block_flag(&mut self, id: NodeId, flag: BlockFlags) -> NodeId {
        let flags = self.block(id).flags | flag;
        self.set_block_flags(id, flags)
    }

    pub fn clear_block_flag(&mut self, id: NodeId, flag: BlockFlags) -> NodeId {
        let flags = self.block(id).flags - flag;
        self.set_block_flags(id, flags)
    }

    pub fn set_block_needs_scope(&mut self, id: NodeId) -> NodeId {
        self.set_block_flag(id, BlockFlags::NEEDS_SCOPE)
    }

    /// Override the derived terminal state, for passes that know better
    /// than the last statement.
    pub fn set_block_is_terminal(&mut self, id: NodeId, is_terminal: bool) -> NodeId {
        let mut flags = self.block(id).flags;
        flags.set(BlockFlags::IS_TERMINAL, is_terminal);
        self.set_block_flags(id, flags)
    }

    pub fn set_function_flag(&mut self, id: NodeId, flag: FunctionFlags) -> NodeId {
        let flags = self.function(id).flags | flag;
        self.set_function_flags(id, flags)
    }

    pub fn clear_function_flag(&mut self, id: NodeId, flag: FunctionFlags) -> NodeId {
        let flags = self.function(id).flags - flag;
        self.set_function_flags(id, flags)
    }

    pub fn set_ident_symbol(&mut self, id: NodeId, symbol: SymbolId) -> NodeId {
        if self.ident(id).symbol == Some(symbol) {
            return id;
        }
        self.derive(id, |node| {
            if let NodeKind::Ident(ident) = &mut node.kind {
                ident.symbol = Some(symbol);
            }
        })
    }

    pub fn set_ident_is_dead(&mut self, id: NodeId) -> NodeId {
        let flags = self.ident(id).flags | IdentFlags::IS_DEAD;
        self.set_ident_flags(id, flags)
    }

    pub fn set_ident_is_initialized_here(&mut self, id: NodeId) -> NodeId {
        let flags = self.ident(id).flags | IdentFlags::INITIALIZED_HERE;
        self.set_ident_flags(id, flags)
    }

    /// Mark a property or element access as the callee of a call.
    #[track_caller]
    pub fn set_base_is_function(&mut self, id: NodeId) -> NodeId {
        let flags = match self.kind(id) {
            NodeKind::Access(AccessNode { flags, .. })
            | NodeKind::Index(IndexNode { flags, .. }) => *flags,
            other => wrong_kind("Access or Index", id, other.tag()),
        };
        if flags.contains(BaseFlags::IS_FUNCTION) {
            return id;
        }
        self.derive(id, |node| match &mut node.kind {
            NodeKind::Access(AccessNode { flags, .. })
            | NodeKind::Index(IndexNode { flags, .. }) => {
                flags.insert(BaseFlags::IS_FUNCTION);
            }
            _ => {}
        })
    }

    /// Replace the catch binding. The binding must be an identifier or a
    /// destructuring pattern.
    pub fn set_catch_exception(&mut self, id: NodeId, exception: NodeId) -> IrResult<NodeId> {
        if self.catch(id).exception == exception {
            return Ok(id);
        }
        match self.tag(exception) {
            NodeTag::Ident | NodeTag::ArrayLiteral | NodeTag::Object => {}
            other => return Err(IrError::InvalidCatchParameter { found: other.name() }),
        }
        Ok(self.derive(id, |node| {
            if let NodeKind::Catch(catch) = &mut node.kind {
                catch.exception = exception;
            }
        }))
    }

    /// Replace the cases of a switch together with the default index.
    pub fn set_switch_cases(
        &mut self,
        id: NodeId,
        cases: Vec<NodeId>,
        default_case: Option<usize>,
    ) -> NodeId {
        let switch = self.switch(id);
        if switch.cases == cases && switch.default_case == default_case {
            return id;
        }
        debug_assert!(default_case.is_none_or(|i| i < cases.len()));
        self.derive(id, |node| {
            if let NodeKind::Switch(switch) = &mut node.kind {
                switch.cases = cases;
                switch.default_case = default_case;
            }
        })
    }

    /// Record whether a `break` or `return` leaves the loop body.
    #[track_caller]
    pub fn set_control_flow_escapes(&mut self, id: NodeId, escapes: bool) -> NodeId {
        let current = match self.kind(id) {
            NodeKind::For(f) => f.control_flow_escapes,
            NodeKind::While(w) => w.control_flow_escapes,
            other => wrong_kind("loop", id, other.tag()),
        };
        if current == escapes {
            return id;
        }
        self.derive(id, |node| match &mut node.kind {
            NodeKind::For(f) => f.control_flow_escapes = escapes,
            NodeKind::While(w) => w.control_flow_escapes = escapes,
            _ => {}
        })
    }

    /// Set the optimistic type of an identifier, operator, access or call.
    #[track_caller]
    pub fn set_optimistic_type(&mut self, id: NodeId, ty: Type) -> NodeId {
        let Some(current) = self.optimistic(id) else {
            wrong_kind("optimistic expression", id, self.tag(id));
        };
        if current.ty == Some(ty) {
            return id;
        }
        self.derive(id, |node| {
            if let Some(optimistic) = optimistic_mut(&mut node.kind) {
                optimistic.ty = Some(ty);
            }
        })
    }

    #[track_caller]
    pub fn set_program_point(&mut self, id: NodeId, program_point: i32) -> NodeId {
        let Some(current) = self.optimistic(id) else {
            wrong_kind("optimistic expression", id, self.tag(id));
        };
        if current.program_point == program_point {
            return id;
        }
        self.derive(id, |node| {
            if let Some(optimistic) = optimistic_mut(&mut node.kind) {
                optimistic.program_point = program_point;
            }
        })
    }

    /// Attach a conversion chain to a join predecessor.
    #[track_caller]
    pub fn set_local_variable_conversion(
        &mut self,
        id: NodeId,
        conversion: Option<LocalVariableConversion>,
    ) -> NodeId {
        let tag = self.tag(id);
        if !tag.is_join_predecessor() {
            wrong_kind("join predecessor", id, tag);
        }
        if self.conversion(id) == conversion.as_ref() {
            return id;
        }
        self.derive(id, |node| {
            if let Some(slot) = conversion_mut(&mut node.kind) {
                *slot = conversion;
            }
        })
    }

    /// OR frame flags accumulated on the lexical-context stack into the
    /// node. Block, Function and For nodes take flags; others ignore them.
    pub fn apply_frame_flags(&mut self, id: NodeId, bits: u32) -> NodeId {
        if bits == 0 {
            return id;
        }
        match self.kind(id) {
            NodeKind::Block(block) => {
                let flags = block.flags | BlockFlags::from_bits_retain(bits);
                self.set_block_flags(id, flags)
            }
            NodeKind::Function(function) => {
                let flags = function.flags | FunctionFlags::from_bits_retain(bits);
                self.set_function_flags(id, flags)
            }
            NodeKind::For(for_node) => {
                let flags = for_node.flags | ForFlags::from_bits_retain(bits);
                self.set_for_flags(id, flags)
            }
            _ => id,
        }
    }
}
