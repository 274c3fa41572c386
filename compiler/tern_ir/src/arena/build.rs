//! Node constructors.
//!
//! Every constructor takes an [`Origin`] (line, token, finish) except those
//! whose position is fully determined by their operands. Constructors that
//! validate parser input return [`IrResult`].

use std::rc::Rc;

use super::{NodeArena, wrong_kind};
use crate::node::{
    AccessNode, ArrayLiteralNode, BaseFlags, BinaryNode, BlockFlags, BlockNode,
    BlockStatementNode, CallFlags, CallNode, CaseNode, CatchNode, EvalArgs,
    ExpressionStatementNode, ForFlags, ForNode, FunctionFlags, FunctionKind, FunctionNode,
    IdentFlags, IdentNode, IfNode, IndexNode, JoinPredecessorNode, JumpNode,
    JumpToInlinedFinallyNode, LabelKind, LabelNode, LiteralValue, Node, NodeId, NodeKind, NodeTag,
    ObjectNode, Optimistic, PropertyNode, ReturnNode, SplitNode, SwitchNode, TemplateLiteralNode,
    TernaryNode, ThrowNode, TryNode, UnaryNode, VarFlags, VarNode, WhileNode, WithNode,
};
use crate::{BinaryOp, IrError, IrResult, Module, Name, Origin, ScopeId, Token, Type, UnaryOp};

impl NodeArena {
    fn push(&mut self, origin: Origin, kind: NodeKind) -> NodeId {
        self.alloc(Node {
            token: origin.token,
            start: origin.token.position(),
            finish: origin.finish,
            line_number: origin.line,
            kind,
        })
    }

    /// Allocate with explicit extent, for nodes spanning their operands.
    fn push_spanning(
        &mut self,
        line: i32,
        token: Token,
        start: u32,
        finish: u32,
        kind: NodeKind,
    ) -> NodeId {
        self.alloc(Node {
            token,
            start,
            finish,
            line_number: line,
            kind,
        })
    }

    // Expressions

    pub fn new_ident(&mut self, origin: Origin, name: Name) -> NodeId {
        self.push(
            origin,
            NodeKind::Ident(IdentNode {
                name,
                symbol: None,
                flags: IdentFlags::empty(),
                optimistic: Optimistic::NONE,
                conversion: None,
            }),
        )
    }

    pub fn new_literal(&mut self, origin: Origin, value: LiteralValue) -> NodeId {
        self.push(origin, NodeKind::Literal(value))
    }

    pub fn new_array_literal(&mut self, origin: Origin, elements: Vec<Option<NodeId>>) -> NodeId {
        self.push(origin, NodeKind::ArrayLiteral(ArrayLiteralNode { elements }))
    }

    pub fn new_object(&mut self, origin: Origin, properties: Vec<NodeId>) -> NodeId {
        self.push(origin, NodeKind::Object(ObjectNode { properties }))
    }

    /// `key: value` property.
    pub fn new_property(&mut self, origin: Origin, key: NodeId, value: NodeId) -> NodeId {
        self.push(
            origin,
            NodeKind::Property(PropertyNode {
                key,
                value: Some(value),
                getter: None,
                setter: None,
                is_static: false,
                computed: false,
            }),
        )
    }

    /// Property with accessors or modifiers; the payload is taken as is.
    pub fn new_property_with(&mut self, origin: Origin, property: PropertyNode) -> NodeId {
        self.push(origin, NodeKind::Property(property))
    }

    pub fn new_template_literal(&mut self, origin: Origin, exprs: Vec<NodeId>) -> NodeId {
        self.push(origin, NodeKind::TemplateLiteral(TemplateLiteralNode { exprs }))
    }

    /// Binary operation spanning from `lhs` to `rhs`; `token` is the operator.
    ///
    /// Assignments require an identifier, property or element target; plain
    /// `=` also accepts array and object destructuring patterns.
    pub fn new_binary(
        &mut self,
        token: Token,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    ) -> IrResult<NodeId> {
        if op.is_assignment() {
            self.check_assignment_target(lhs, op == BinaryOp::Assign)?;
        }
        let (start, line) = (self.start(lhs), self.line_number(lhs));
        let finish = self.finish(rhs);
        Ok(self.push_spanning(
            line,
            token,
            start,
            finish,
            NodeKind::Binary(BinaryNode {
                op,
                lhs,
                rhs,
                optimistic: Optimistic::NONE,
                conversion: None,
            }),
        ))
    }

    /// Unary operation. Prefix operators span from the operator token to
    /// the operand; postfix ones from the operand to `origin.finish`.
    pub fn new_unary(
        &mut self,
        origin: Origin,
        op: UnaryOp,
        expression: NodeId,
    ) -> IrResult<NodeId> {
        if op.is_self_modifying() {
            self.check_assignment_target(expression, false)?;
        }
        let (start, finish) = if op.is_postfix() {
            (self.start(expression), origin.finish)
        } else {
            (origin.token.position(), self.finish(expression))
        };
        Ok(self.push_spanning(
            origin.line,
            origin.token,
            start,
            finish,
            NodeKind::Unary(UnaryNode {
                op,
                expression,
                optimistic: Optimistic::NONE,
            }),
        ))
    }

    fn check_assignment_target(&self, target: NodeId, allow_pattern: bool) -> IrResult<()> {
        match self.tag(target) {
            NodeTag::Ident | NodeTag::Access | NodeTag::Index => Ok(()),
            NodeTag::ArrayLiteral | NodeTag::Object if allow_pattern => Ok(()),
            other => Err(IrError::InvalidAssignmentTarget { found: other.name() }),
        }
    }

    pub fn new_access(&mut self, origin: Origin, base: NodeId, property: Name) -> NodeId {
        let start = self.start(base);
        self.push_spanning(
            origin.line,
            origin.token,
            start,
            origin.finish,
            NodeKind::Access(AccessNode {
                base,
                property,
                flags: BaseFlags::empty(),
                optimistic: Optimistic::NONE,
            }),
        )
    }

    pub fn new_index(&mut self, origin: Origin, base: NodeId, index: NodeId) -> NodeId {
        let start = self.start(base);
        self.push_spanning(
            origin.line,
            origin.token,
            start,
            origin.finish,
            NodeKind::Index(IndexNode {
                base,
                index,
                flags: BaseFlags::empty(),
                optimistic: Optimistic::NONE,
            }),
        )
    }

    pub fn new_call(&mut self, origin: Origin, function: NodeId, args: Vec<NodeId>) -> NodeId {
        let start = self.start(function);
        self.push_spanning(
            origin.line,
            origin.token,
            start,
            origin.finish,
            NodeKind::Call(CallNode {
                function,
                args,
                eval_args: None,
                flags: CallFlags::empty(),
                optimistic: Optimistic::NONE,
            }),
        )
    }

    /// Validate the extra arguments of a direct `eval`. `this` must be an
    /// identifier.
    pub fn eval_args(
        &self,
        args: Vec<NodeId>,
        this: NodeId,
        location: Name,
        strict: bool,
    ) -> IrResult<EvalArgs> {
        match self.tag(this) {
            NodeTag::Ident => Ok(EvalArgs {
                args,
                this,
                location,
                strict,
            }),
            other => Err(IrError::InvalidEvalArguments { found: other.name() }),
        }
    }

    pub fn new_ternary(
        &mut self,
        origin: Origin,
        test: NodeId,
        true_expr: NodeId,
        false_expr: NodeId,
    ) -> NodeId {
        let (start, finish) = (self.start(test), self.finish(false_expr));
        self.push_spanning(
            origin.line,
            origin.token,
            start,
            finish,
            NodeKind::Ternary(TernaryNode {
                test,
                true_expr,
                false_expr,
            }),
        )
    }

    /// Join predecessor wrapping `expression`, sharing its position.
    pub fn new_join_predecessor(&mut self, expression: Option<NodeId>) -> NodeId {
        let kind = NodeKind::JoinPredecessor(JoinPredecessorNode {
            expression,
            conversion: None,
        });
        match expression {
            Some(expr) => {
                let node = self.get(expr);
                let (line, token, start, finish) =
                    (node.line_number, node.token, node.start, node.finish);
                self.push_spanning(line, token, start, finish, kind)
            }
            None => self.push(Origin::SYNTHETIC, kind),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_function(
        &mut self,
        origin: Origin,
        kind: FunctionKind,
        name: Name,
        ident: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
        flags: FunctionFlags,
    ) -> NodeId {
        let mut flags = flags;
        if kind == FunctionKind::Arrow {
            flags |= FunctionFlags::IS_ARROW;
        }
        if kind == FunctionKind::Script {
            flags |= FunctionFlags::IS_PROGRAM;
        }
        self.push(
            origin,
            NodeKind::Function(FunctionNode {
                kind,
                ident,
                name,
                params,
                body,
                flags,
                return_type: Type::Unknown,
                module: None,
            }),
        )
    }

    /// Module function carrying its import/export records.
    pub fn new_module_function(
        &mut self,
        origin: Origin,
        name: Name,
        body: NodeId,
        module: Module,
    ) -> NodeId {
        let id = self.new_function(
            origin,
            FunctionKind::Module,
            name,
            None,
            Vec::new(),
            body,
            FunctionFlags::IS_STRICT,
        );
        if let NodeKind::Function(function) = &mut self.nodes[id.index()].kind {
            function.module = Some(Rc::new(module));
        }
        id
    }

    pub fn new_error(&mut self, origin: Origin) -> NodeId {
        self.push(origin, NodeKind::Error)
    }

    // Statements

    /// Block over `statements`. IS_TERMINAL is derived from the last
    /// statement.
    pub fn new_block(
        &mut self,
        origin: Origin,
        scope: ScopeId,
        flags: BlockFlags,
        statements: Vec<NodeId>,
    ) -> NodeId {
        let mut flags = flags - BlockFlags::IS_TERMINAL;
        if statements.last().is_some_and(|&last| self.has_terminal_flags(last)) {
            flags |= BlockFlags::IS_TERMINAL;
        }
        let entry_label = self.fresh_label(LabelKind::BlockEntry);
        let break_label = self.fresh_label(LabelKind::BlockBreak);
        self.push(
            origin,
            NodeKind::Block(BlockNode {
                statements,
                scope,
                flags,
                entry_label,
                break_label,
                conversion: None,
            }),
        )
    }

    /// Statement wrapper of a block, sharing its position.
    pub fn new_block_statement(&mut self, block: NodeId) -> NodeId {
        let node = self.get(block);
        let (line, token, start, finish) = (node.line_number, node.token, node.start, node.finish);
        if !matches!(node.kind, NodeKind::Block(_)) {
            wrong_kind("Block", block, node.tag());
        }
        let kind = NodeKind::BlockStatement(BlockStatementNode { block });
        self.push_spanning(line, token, start, finish, kind)
    }

    pub fn new_expression_statement(&mut self, origin: Origin, expression: NodeId) -> NodeId {
        self.push(
            origin,
            NodeKind::ExpressionStatement(ExpressionStatementNode { expression }),
        )
    }

    /// Declaration of the identifier `name`.
    pub fn new_var(
        &mut self,
        origin: Origin,
        name: NodeId,
        init: Option<NodeId>,
        flags: VarFlags,
    ) -> NodeId {
        if !matches!(self.kind(name), NodeKind::Ident(_)) {
            wrong_kind("Ident", name, self.tag(name));
        }
        self.push(origin, NodeKind::Var(VarNode { name, init, flags }))
    }

    pub fn new_if(
        &mut self,
        origin: Origin,
        test: NodeId,
        pass: NodeId,
        fail: Option<NodeId>,
    ) -> NodeId {
        self.push(
            origin,
            NodeKind::If(IfNode {
                test,
                pass,
                fail,
                conversion: None,
            }),
        )
    }

    pub fn new_for(
        &mut self,
        origin: Origin,
        init: Option<NodeId>,
        test: Option<NodeId>,
        modify: Option<NodeId>,
        body: NodeId,
        flags: ForFlags,
    ) -> NodeId {
        let break_label = self.fresh_label(LabelKind::LoopBreak);
        let continue_label = self.fresh_label(LabelKind::LoopContinue);
        self.push(
            origin,
            NodeKind::For(ForNode {
                init,
                test,
                modify,
                body,
                flags,
                control_flow_escapes: false,
                break_label,
                continue_label,
                conversion: None,
            }),
        )
    }

    /// `while` loop, or `do-while` when `is_do_while`.
    pub fn new_while(
        &mut self,
        origin: Origin,
        is_do_while: bool,
        test: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        let break_label = self.fresh_label(LabelKind::LoopBreak);
        let continue_label = self.fresh_label(LabelKind::LoopContinue);
        self.push(
            origin,
            NodeKind::While(WhileNode {
                test,
                body,
                is_do_while,
                control_flow_escapes: false,
                break_label,
                continue_label,
                conversion: None,
            }),
        )
    }

    pub fn new_label(&mut self, origin: Origin, label: Name, body: NodeId) -> NodeId {
        self.push(
            origin,
            NodeKind::Label(LabelNode {
                label,
                body,
                conversion: None,
            }),
        )
    }

    /// Switch over `cases`; `default_case` indexes the `default` case.
    pub fn new_switch(
        &mut self,
        origin: Origin,
        expression: NodeId,
        cases: Vec<NodeId>,
        default_case: Option<usize>,
    ) -> NodeId {
        debug_assert!(default_case.is_none_or(|i| i < cases.len()));
        let break_label = self.fresh_label(LabelKind::SwitchBreak);
        self.push(
            origin,
            NodeKind::Switch(SwitchNode {
                expression,
                cases,
                default_case,
                unique_integer: false,
                tag: None,
                break_label,
                conversion: None,
            }),
        )
    }

    pub fn new_case(&mut self, origin: Origin, test: Option<NodeId>, body: NodeId) -> NodeId {
        let entry_label = self.fresh_label(LabelKind::CaseEntry);
        self.push(
            origin,
            NodeKind::Case(CaseNode {
                test,
                body,
                entry_label,
                conversion: None,
            }),
        )
    }

    pub fn new_try(
        &mut self,
        origin: Origin,
        body: NodeId,
        catch_blocks: Vec<NodeId>,
        finally_body: Option<NodeId>,
    ) -> NodeId {
        self.push(
            origin,
            NodeKind::Try(TryNode {
                body,
                catch_blocks,
                finally_body,
                inlined_finallies: Vec::new(),
                exception: None,
                conversion: None,
            }),
        )
    }

    /// Catch clause. The binding must be an identifier or an array or
    /// object destructuring pattern.
    pub fn new_catch(
        &mut self,
        origin: Origin,
        exception: NodeId,
        condition: Option<NodeId>,
        body: NodeId,
        is_synthetic_rethrow: bool,
    ) -> IrResult<NodeId> {
        match self.tag(exception) {
            NodeTag::Ident | NodeTag::ArrayLiteral | NodeTag::Object => {}
            other => return Err(IrError::InvalidCatchParameter { found: other.name() }),
        }
        Ok(self.push(
            origin,
            NodeKind::Catch(CatchNode {
                exception,
                condition,
                body,
                is_synthetic_rethrow,
            }),
        ))
    }

    pub fn new_throw(
        &mut self,
        origin: Origin,
        expression: NodeId,
        is_synthetic_rethrow: bool,
    ) -> NodeId {
        self.push(
            origin,
            NodeKind::Throw(ThrowNode {
                expression,
                is_synthetic_rethrow,
                conversion: None,
            }),
        )
    }

    pub fn new_return(&mut self, origin: Origin, expression: Option<NodeId>) -> NodeId {
        self.push(origin, NodeKind::Return(ReturnNode { expression }))
    }

    pub fn new_break(&mut self, origin: Origin, label: Option<Name>) -> NodeId {
        self.push(
            origin,
            NodeKind::Break(JumpNode {
                label,
                conversion: None,
            }),
        )
    }

    pub fn new_continue(&mut self, origin: Origin, label: Option<Name>) -> NodeId {
        self.push(
            origin,
            NodeKind::Continue(JumpNode {
                label,
                conversion: None,
            }),
        )
    }

    /// Synthetic jump into the inlined finally labelled `label`.
    pub fn new_jump_to_inlined_finally(&mut self, label: Name) -> NodeId {
        self.push(
            Origin::SYNTHETIC,
            NodeKind::JumpToInlinedFinally(JumpToInlinedFinallyNode {
                label,
                conversion: None,
            }),
        )
    }

    pub fn new_with(&mut self, origin: Origin, expression: NodeId, body: NodeId) -> NodeId {
        self.push(origin, NodeKind::With(WithNode { expression, body }))
    }

    /// Split wrapper around `body`, sharing its position.
    pub fn new_split(&mut self, name: Name, body: NodeId, compile_unit: u32) -> NodeId {
        let node = self.get(body);
        let (line, token, start, finish) = (node.line_number, node.token, node.start, node.finish);
        self.push_spanning(
            line,
            token,
            start,
            finish,
            NodeKind::Split(SplitNode {
                name,
                body,
                compile_unit,
            }),
        )
    }

    pub fn new_empty(&mut self, origin: Origin) -> NodeId {
        self.push(origin, NodeKind::Empty)
    }

    pub fn new_debugger(&mut self, origin: Origin) -> NodeId {
        self.push(origin, NodeKind::Debugger)
    }
}
