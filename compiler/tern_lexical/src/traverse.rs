//! Depth-first rewriting traversal.
//!
//! [`accept`] visits one node: enter hook, children, rebuild, leave hook.
//! Children are visited in [`NodeArena::children`](tern_ir::NodeArena::children)
//! order and put back through the copy-on-write setters, so a traversal
//! that rewrites nothing allocates nothing and returns the root it was
//! given.

use tern_ir::{EvalArgs, IrResult, NodeId, NodeKind, NodeTag};

use crate::stack::ensure_sufficient_stack;
use crate::visitor::{dispatch_enter, dispatch_leave};
use crate::{ContextExtension, LexicalContext, NodeVisitor};

/// Visit the tree rooted at `root` and return its replacement.
#[tracing::instrument(level = "debug", skip_all)]
pub fn traverse<X, V>(lc: &mut LexicalContext<X>, visitor: &mut V, root: NodeId) -> NodeId
where
    X: ContextExtension,
    V: NodeVisitor<X> + ?Sized,
{
    let depth = lc.size();
    let root = accept(lc, visitor, root);
    debug_assert_eq!(lc.size(), depth, "traversal left the lexical context unbalanced");
    root
}

/// Visit `node` and its subtree.
///
/// Lexical-context nodes are pushed before their enter hook and popped
/// after their leave hook; when the node is rebuilt in between, the stack
/// entry follows the rebuilt node.
pub fn accept<X, V>(lc: &mut LexicalContext<X>, visitor: &mut V, node: NodeId) -> NodeId
where
    X: ContextExtension,
    V: NodeVisitor<X> + ?Sized,
{
    ensure_sufficient_stack(|| {
        let tag = lc.nodes().tag(node);
        if !tag.is_lexical_context() {
            if !dispatch_enter(visitor, lc, tag, node) {
                return node;
            }
            let rebuilt = visit_children(lc, visitor, node);
            return dispatch_leave(visitor, lc, tag, rebuilt);
        }

        lc.push(node);
        if !dispatch_enter(visitor, lc, tag, node) {
            // Skipped statements stay in the block unchanged.
            if tag == NodeTag::Block {
                for statement in lc.nodes().block(node).statements.clone() {
                    lc.note_statement(statement);
                }
            }
            return lc.pop(node);
        }
        let rebuilt = visit_children(lc, visitor, node);
        lc.replace(node, rebuilt);
        let result = dispatch_leave(visitor, lc, tag, rebuilt);
        lc.replace(rebuilt, result);
        lc.pop(result)
    })
}

fn visit_opt<X, V>(
    lc: &mut LexicalContext<X>,
    visitor: &mut V,
    node: Option<NodeId>,
) -> Option<NodeId>
where
    X: ContextExtension,
    V: NodeVisitor<X> + ?Sized,
{
    node.map(|node| accept(lc, visitor, node))
}

fn visit_all<X, V>(lc: &mut LexicalContext<X>, visitor: &mut V, nodes: &[NodeId]) -> Vec<NodeId>
where
    X: ContextExtension,
    V: NodeVisitor<X> + ?Sized,
{
    nodes.iter().map(|&node| accept(lc, visitor, node)).collect()
}

/// A rewrite broke a structural rule of the tree.
#[track_caller]
fn well_formed<T>(result: IrResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("visitor produced a malformed tree: {err}"),
    }
}

/// Visit the children of `id` and rebuild it from the results.
fn visit_children<X, V>(lc: &mut LexicalContext<X>, visitor: &mut V, id: NodeId) -> NodeId
where
    X: ContextExtension,
    V: NodeVisitor<X> + ?Sized,
{
    let kind = lc.nodes().kind(id).clone();
    match kind {
        NodeKind::Ident(_)
        | NodeKind::Literal(_)
        | NodeKind::Error
        | NodeKind::Empty
        | NodeKind::Debugger
        | NodeKind::Break(_)
        | NodeKind::Continue(_)
        | NodeKind::JumpToInlinedFinally(_) => id,

        // Expressions
        NodeKind::ArrayLiteral(array) => {
            let elements = array
                .elements
                .iter()
                .map(|&element| visit_opt(lc, visitor, element))
                .collect();
            lc.ir_mut().nodes.set_array_literal_elements(id, elements)
        }
        NodeKind::Object(object) => {
            let properties = visit_all(lc, visitor, &object.properties);
            lc.ir_mut().nodes.set_object_properties(id, properties)
        }
        NodeKind::Property(property) => {
            let key = accept(lc, visitor, property.key);
            let value = visit_opt(lc, visitor, property.value);
            let getter = visit_opt(lc, visitor, property.getter);
            let setter = visit_opt(lc, visitor, property.setter);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_property_key(id, key);
            let id = nodes.set_property_value(id, value);
            let id = nodes.set_property_getter(id, getter);
            nodes.set_property_setter(id, setter)
        }
        NodeKind::TemplateLiteral(template) => {
            let exprs = visit_all(lc, visitor, &template.exprs);
            lc.ir_mut().nodes.set_template_literal_exprs(id, exprs)
        }
        NodeKind::Binary(binary) => {
            let lhs = accept(lc, visitor, binary.lhs);
            let rhs = accept(lc, visitor, binary.rhs);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_binary_lhs(id, lhs);
            nodes.set_binary_rhs(id, rhs)
        }
        NodeKind::Unary(unary) => {
            let expression = accept(lc, visitor, unary.expression);
            lc.ir_mut().nodes.set_unary_expression(id, expression)
        }
        NodeKind::Access(access) => {
            let base = accept(lc, visitor, access.base);
            lc.ir_mut().nodes.set_access_base(id, base)
        }
        NodeKind::Index(index) => {
            let base = accept(lc, visitor, index.base);
            let index = accept(lc, visitor, index.index);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_index_base(id, base);
            nodes.set_index_index(id, index)
        }
        NodeKind::Call(call) => {
            let function = accept(lc, visitor, call.function);
            let args = visit_all(lc, visitor, &call.args);
            let eval_args = call.eval_args.map(|eval| {
                let args = visit_all(lc, visitor, &eval.args);
                let this = accept(lc, visitor, eval.this);
                (eval, args, this)
            });
            let eval_args =
                eval_args.map(|(eval, args, this)| rebuild_eval_args(lc, &eval, args, this));
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_call_function(id, function);
            let id = nodes.set_call_args(id, args);
            nodes.set_call_eval_args(id, eval_args)
        }
        NodeKind::Ternary(ternary) => {
            let test = accept(lc, visitor, ternary.test);
            let true_expr = accept(lc, visitor, ternary.true_expr);
            let false_expr = accept(lc, visitor, ternary.false_expr);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_ternary_test(id, test);
            let id = nodes.set_ternary_true_expr(id, true_expr);
            nodes.set_ternary_false_expr(id, false_expr)
        }
        NodeKind::JoinPredecessor(join) => {
            let expression = visit_opt(lc, visitor, join.expression);
            lc.ir_mut().nodes.set_join_predecessor_expression(id, expression)
        }
        NodeKind::Function(function) => {
            let ident = visit_opt(lc, visitor, function.ident);
            let params = visit_all(lc, visitor, &function.params);
            let body = accept(lc, visitor, function.body);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_function_ident(id, ident);
            let id = nodes.set_function_params(id, params);
            nodes.set_function_body(id, body)
        }

        // Statements
        NodeKind::Block(block) => {
            let mut statements = Vec::with_capacity(block.statements.len());
            for statement in block.statements {
                let statement = accept(lc, visitor, statement);
                lc.note_statement(statement);
                statements.push(statement);
            }
            lc.ir_mut().nodes.set_block_statements(id, statements)
        }
        NodeKind::BlockStatement(statement) => {
            let block = accept(lc, visitor, statement.block);
            lc.ir_mut().nodes.set_block_statement_block(id, block)
        }
        NodeKind::ExpressionStatement(statement) => {
            let expression = accept(lc, visitor, statement.expression);
            lc.ir_mut().nodes.set_expression_statement_expression(id, expression)
        }
        NodeKind::Var(var) => {
            let init = visit_opt(lc, visitor, var.init);
            let name = accept(lc, visitor, var.name);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_var_init(id, init);
            nodes.set_var_name(id, name)
        }
        NodeKind::If(if_node) => {
            let test = accept(lc, visitor, if_node.test);
            let pass = accept(lc, visitor, if_node.pass);
            let fail = visit_opt(lc, visitor, if_node.fail);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_if_test(id, test);
            let id = nodes.set_if_pass(id, pass);
            nodes.set_if_fail(id, fail)
        }
        NodeKind::For(for_node) => {
            let init = visit_opt(lc, visitor, for_node.init);
            let test = visit_opt(lc, visitor, for_node.test);
            let modify = visit_opt(lc, visitor, for_node.modify);
            let body = accept(lc, visitor, for_node.body);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_for_init(id, init);
            let id = nodes.set_for_test(id, test);
            let id = nodes.set_for_modify(id, modify);
            nodes.set_for_body(id, body)
        }
        NodeKind::While(while_node) => {
            let (test, body) = if while_node.is_do_while {
                let body = accept(lc, visitor, while_node.body);
                (visit_opt(lc, visitor, while_node.test), body)
            } else {
                let test = visit_opt(lc, visitor, while_node.test);
                (test, accept(lc, visitor, while_node.body))
            };
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_while_test(id, test);
            nodes.set_while_body(id, body)
        }
        NodeKind::Label(label) => {
            let body = accept(lc, visitor, label.body);
            lc.ir_mut().nodes.set_label_body(id, body)
        }
        NodeKind::Switch(switch) => {
            let expression = accept(lc, visitor, switch.expression);
            let cases = visit_all(lc, visitor, &switch.cases);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_switch_expression(id, expression);
            nodes.set_switch_cases(id, cases, switch.default_case)
        }
        NodeKind::Case(case) => {
            let test = visit_opt(lc, visitor, case.test);
            let body = accept(lc, visitor, case.body);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_case_test(id, test);
            nodes.set_case_body(id, body)
        }
        NodeKind::Try(try_node) => {
            let finally_body = visit_opt(lc, visitor, try_node.finally_body);
            let body = accept(lc, visitor, try_node.body);
            let catch_blocks = visit_all(lc, visitor, &try_node.catch_blocks);
            let inlined_finallies = visit_all(lc, visitor, &try_node.inlined_finallies);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_try_finally_body(id, finally_body);
            let id = nodes.set_try_body(id, body);
            let id = nodes.set_try_catch_blocks(id, catch_blocks);
            nodes.set_try_inlined_finallies(id, inlined_finallies)
        }
        NodeKind::Catch(catch) => {
            let exception = accept(lc, visitor, catch.exception);
            let condition = visit_opt(lc, visitor, catch.condition);
            let body = accept(lc, visitor, catch.body);
            let nodes = &mut lc.ir_mut().nodes;
            let id = well_formed(nodes.set_catch_exception(id, exception));
            let id = nodes.set_catch_condition(id, condition);
            nodes.set_catch_body(id, body)
        }
        NodeKind::Throw(throw) => {
            let expression = accept(lc, visitor, throw.expression);
            lc.ir_mut().nodes.set_throw_expression(id, expression)
        }
        NodeKind::Return(ret) => {
            let expression = visit_opt(lc, visitor, ret.expression);
            lc.ir_mut().nodes.set_return_expression(id, expression)
        }
        NodeKind::With(with) => {
            let expression = accept(lc, visitor, with.expression);
            let body = accept(lc, visitor, with.body);
            let nodes = &mut lc.ir_mut().nodes;
            let id = nodes.set_with_expression(id, expression);
            nodes.set_with_body(id, body)
        }
        NodeKind::Split(split) => {
            let body = accept(lc, visitor, split.body);
            lc.ir_mut().nodes.set_split_body(id, body)
        }
    }
}

fn rebuild_eval_args<X: ContextExtension>(
    lc: &LexicalContext<X>,
    eval: &EvalArgs,
    args: Vec<NodeId>,
    this: NodeId,
) -> EvalArgs {
    if args == eval.args && this == eval.this {
        return eval.clone();
    }
    well_formed(lc.nodes().eval_args(args, this, eval.location, eval.strict))
}
