//! Child enumeration in traversal order.

use smallvec::SmallVec;

use super::NodeArena;
use crate::node::{NodeId, NodeKind};

/// Child ids of one node. Most nodes have at most four.
pub type Children = SmallVec<[NodeId; 4]>;

impl NodeArena {
    /// Direct children of `id` in the order a traversal visits them.
    ///
    /// Source order, except: a try visits its finally body before its body,
    /// a do-while visits its body before its test, and a var visits its
    /// initialiser before its name.
    pub fn children(&self, id: NodeId) -> Children {
        let mut out = Children::new();
        match self.kind(id) {
            NodeKind::Ident(_)
            | NodeKind::Literal(_)
            | NodeKind::Error
            | NodeKind::Empty
            | NodeKind::Debugger => {}
            NodeKind::ArrayLiteral(array) => out.extend(array.elements.iter().flatten().copied()),
            NodeKind::Object(object) => out.extend_from_slice(&object.properties),
            NodeKind::Property(property) => {
                out.push(property.key);
                out.extend(property.value);
                out.extend(property.getter);
                out.extend(property.setter);
            }
            NodeKind::TemplateLiteral(template) => out.extend_from_slice(&template.exprs),
            NodeKind::Binary(binary) => out.extend([binary.lhs, binary.rhs]),
            NodeKind::Unary(unary) => out.push(unary.expression),
            NodeKind::Access(access) => out.push(access.base),
            NodeKind::Index(index) => out.extend([index.base, index.index]),
            NodeKind::Call(call) => {
                out.push(call.function);
                out.extend_from_slice(&call.args);
                if let Some(eval) = &call.eval_args {
                    out.extend_from_slice(&eval.args);
                    out.push(eval.this);
                }
            }
            NodeKind::Ternary(ternary) => {
                out.extend([ternary.test, ternary.true_expr, ternary.false_expr]);
            }
            NodeKind::JoinPredecessor(join) => out.extend(join.expression),
            NodeKind::Function(function) => {
                out.extend(function.ident);
                out.extend_from_slice(&function.params);
                out.push(function.body);
            }
            NodeKind::Block(block) => out.extend_from_slice(&block.statements),
            NodeKind::BlockStatement(statement) => out.push(statement.block),
            NodeKind::ExpressionStatement(statement) => out.push(statement.expression),
            NodeKind::Var(var) => {
                out.extend(var.init);
                out.push(var.name);
            }
            NodeKind::If(if_node) => {
                out.extend([if_node.test, if_node.pass]);
                out.extend(if_node.fail);
            }
            NodeKind::For(for_node) => {
                out.extend(for_node.init);
                out.extend(for_node.test);
                out.extend(for_node.modify);
                out.push(for_node.body);
            }
            NodeKind::While(while_node) => {
                if while_node.is_do_while {
                    out.push(while_node.body);
                    out.extend(while_node.test);
                } else {
                    out.extend(while_node.test);
                    out.push(while_node.body);
                }
            }
            NodeKind::Label(label) => out.push(label.body),
            NodeKind::Switch(switch) => {
                out.push(switch.expression);
                out.extend_from_slice(&switch.cases);
            }
            NodeKind::Case(case) => {
                out.extend(case.test);
                out.push(case.body);
            }
            NodeKind::Try(try_node) => {
                out.extend(try_node.finally_body);
                out.push(try_node.body);
                out.extend_from_slice(&try_node.catch_blocks);
                out.extend_from_slice(&try_node.inlined_finallies);
            }
            NodeKind::Catch(catch) => {
                out.push(catch.exception);
                out.extend(catch.condition);
                out.push(catch.body);
            }
            NodeKind::Throw(throw) => out.push(throw.expression),
            NodeKind::Return(ret) => out.extend(ret.expression),
            NodeKind::Break(_) | NodeKind::Continue(_) | NodeKind::JumpToInlinedFinally(_) => {}
            NodeKind::With(with) => out.extend([with.expression, with.body]),
            NodeKind::Split(split) => out.push(split.body),
        }
        out
    }
}
