use super::*;
use crate::{traverse, BlockStatements, NodeVisitor};
use pretty_assertions::assert_eq;
use tern_ir::{BlockFlags, FunctionFlags, FunctionKind, LiteralValue, Origin, ScopeId};

struct Builder {
    ir: Ir,
    scope: ScopeId,
}

impl Builder {
    fn new() -> Self {
        let mut ir = Ir::default();
        let scope = ir.new_scope();
        Builder { ir, scope }
    }

    fn int_stmt(&mut self, value: i32) -> NodeId {
        let literal = self.ir.nodes.new_literal(Origin::SYNTHETIC, LiteralValue::Int(value));
        self.ir.nodes.new_expression_statement(Origin::SYNTHETIC, literal)
    }

    fn var(&mut self, name: &str, value: i32, flags: VarFlags) -> NodeId {
        let name = self.ir.name(name);
        let ident = self.ir.nodes.new_ident(Origin::SYNTHETIC, name);
        let init = self.ir.nodes.new_literal(Origin::SYNTHETIC, LiteralValue::Int(value));
        self.ir.nodes.new_var(Origin::SYNTHETIC, ident, Some(init), flags)
    }

    fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.ir
            .nodes
            .new_block(Origin::SYNTHETIC, self.scope, BlockFlags::empty(), statements)
    }

    fn throw(&mut self) -> NodeId {
        let value = self.ir.nodes.new_literal(Origin::SYNTHETIC, LiteralValue::Int(0));
        self.ir.nodes.new_throw(Origin::SYNTHETIC, value, false)
    }

    fn trim(self, root: NodeId) -> (Ir, NodeId) {
        let mut lc = TrimmingLexicalContext::with_hooks(self.ir, TerminalTrimming);
        let result = traverse(&mut lc, &mut Nothing, root);
        (lc.into_ir(), result)
    }
}

struct Nothing;

impl NodeVisitor<BlockStatements<TerminalTrimming>> for Nothing {}

fn var_names(ir: &Ir, statements: &[NodeId]) -> Vec<String> {
    statements
        .iter()
        .filter_map(|&statement| ir.nodes.as_var(statement))
        .map(|var| ir.resolve(ir.nodes.ident(var.name).name).to_owned())
        .collect()
}

#[test]
fn dead_code_keeps_only_function_scoped_vars() {
    // { 1; return; var x = 1; let y = 2; if (c) { var z = 3; (function () { var w = 4; }); } 5; }
    let mut b = Builder::new();
    let one = b.int_stmt(1);
    let ret = b.ir.nodes.new_return(Origin::SYNTHETIC, None);
    let x = b.var("x", 1, VarFlags::empty());
    let y = b.var("y", 2, VarFlags::IS_LET);
    let z = b.var("z", 3, VarFlags::empty());
    let w = b.var("w", 4, VarFlags::empty());
    let inner_body = b.block(vec![w]);
    let anonymous = b.ir.name("");
    let inner = b.ir.nodes.new_function(
        Origin::SYNTHETIC,
        FunctionKind::Normal,
        anonymous,
        None,
        Vec::new(),
        inner_body,
        FunctionFlags::IS_ANONYMOUS,
    );
    let inner = b.ir.nodes.new_expression_statement(Origin::SYNTHETIC, inner);
    let pass = b.block(vec![z, inner]);
    let c = b.ir.name("c");
    let test = b.ir.nodes.new_ident(Origin::SYNTHETIC, c);
    let if_node = b.ir.nodes.new_if(Origin::SYNTHETIC, test, pass, None);
    let five = b.int_stmt(5);
    let root = b.block(vec![one, ret, x, y, if_node, five]);

    let (ir, result) = b.trim(root);

    let statements = &ir.nodes.block(result).statements;
    assert_eq!(statements.len(), 4);
    assert_eq!(&statements[..2], &[one, ret]);
    assert_eq!(var_names(&ir, statements), vec!["x", "z"]);
    for &var in &statements[2..] {
        assert_eq!(ir.nodes.var(var).init, None);
    }
    assert!(ir.nodes.is_terminal(result));
}

#[test]
fn trailing_uninitialized_vars_keep_the_block_terminal() {
    let mut b = Builder::new();
    let throw = b.throw();
    let a = b.var("a", 1, VarFlags::empty());
    let root = b.block(vec![throw, a]);

    let (ir, result) = b.trim(root);

    assert_eq!(ir.nodes.block(result).statements.len(), 2);
    assert!(ir.nodes.block(result).flags.contains(BlockFlags::IS_TERMINAL));
}

#[test]
fn statements_after_a_jump_are_dropped() {
    let mut b = Builder::new();
    let brk = b.ir.nodes.new_break(Origin::SYNTHETIC, None);
    let one = b.int_stmt(1);
    let root = b.block(vec![brk, one]);

    let (ir, result) = b.trim(root);

    assert_eq!(ir.nodes.block(result).statements, vec![brk]);
    assert!(!ir.nodes.is_terminal(result));
}

#[test]
fn live_blocks_are_untouched() {
    let mut b = Builder::new();
    let one = b.int_stmt(1);
    let two = b.int_stmt(2);
    let throw = b.throw();
    let root = b.block(vec![one, two, throw]);
    let len = b.ir.nodes.len();

    let (ir, result) = b.trim(root);

    assert_eq!(result, root);
    assert_eq!(ir.nodes.len(), len);
}
