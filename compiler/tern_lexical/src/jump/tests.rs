use super::*;
use pretty_assertions::assert_eq;
use tern_ir::{BlockFlags, ForFlags, FunctionFlags, FunctionKind, Ir, LiteralValue, Origin};

fn block(ir: &mut Ir, statements: Vec<NodeId>) -> NodeId {
    let scope = ir.new_scope();
    ir.nodes
        .new_block(Origin::SYNTHETIC, scope, BlockFlags::empty(), statements)
}

fn function(ir: &mut Ir) -> NodeId {
    let body = block(ir, Vec::new());
    let name = ir.name("f");
    ir.nodes.new_function(
        Origin::SYNTHETIC,
        FunctionKind::Normal,
        name,
        None,
        Vec::new(),
        body,
        FunctionFlags::empty(),
    )
}

fn pop_all(lc: &mut LexicalContext) {
    while let Some(top) = lc.peek() {
        lc.pop(top);
    }
}

#[test]
fn break_and_continue_resolve_to_loops() {
    // outer: while (true) { for (;;) { <here> } }
    let mut ir = Ir::default();
    let f = function(&mut ir);
    let body = block(&mut ir, Vec::new());
    let while_body = block(&mut ir, Vec::new());
    let test = ir.nodes.new_literal(Origin::SYNTHETIC, LiteralValue::Boolean(true));
    let while_node = ir.nodes.new_while(Origin::SYNTHETIC, false, Some(test), while_body);
    let outer = ir.name("outer");
    let label = ir.nodes.new_label(Origin::SYNTHETIC, outer, while_node);
    let for_body = block(&mut ir, Vec::new());
    let for_node = ir
        .nodes
        .new_for(Origin::SYNTHETIC, None, None, None, for_body, ForFlags::empty());
    let break_outer = ir.nodes.new_break(Origin::SYNTHETIC, Some(outer));
    let break_inner = ir.nodes.new_break(Origin::SYNTHETIC, None);
    let continue_outer = ir.nodes.new_continue(Origin::SYNTHETIC, Some(outer));
    let mut lc = LexicalContext::new(ir);
    for node in [f, body, label, while_node, while_body, for_node, for_body] {
        lc.push(node);
    }

    assert_eq!(lc.jump_target(break_outer), Some(while_node));
    assert_eq!(lc.jump_target(break_inner), Some(for_node));
    assert_eq!(lc.jump_target(continue_outer), Some(while_node));
    assert_eq!(lc.pop_scope_limit(break_outer), Some(while_node));

    let nodes = lc.nodes();
    assert_eq!(
        lc.jump_target_label(break_outer, while_node),
        Some(nodes.while_node(while_node).break_label)
    );
    assert_eq!(
        lc.jump_target_label(continue_outer, while_node),
        Some(nodes.while_node(while_node).continue_label)
    );
    assert_eq!(
        lc.jump_target_label(break_inner, for_node),
        Some(nodes.for_node(for_node).break_label)
    );
    pop_all(&mut lc);
}

#[test]
fn unresolved_label_has_no_target() {
    let mut ir = Ir::default();
    let f = function(&mut ir);
    let body = block(&mut ir, Vec::new());
    let nowhere = ir.name("nowhere");
    let jump = ir.nodes.new_break(Origin::SYNTHETIC, Some(nowhere));
    let mut lc = LexicalContext::new(ir);
    lc.push(f);
    lc.push(body);

    assert_eq!(lc.jump_target(jump), None);
    assert_eq!(lc.pop_scope_limit(jump), None);
    pop_all(&mut lc);
}

#[test]
fn jump_to_inlined_finally_resolves_dynamically() {
    let mut ir = Ir::default();
    let f = function(&mut ir);
    let body = block(&mut ir, Vec::new());
    let finally_body = block(&mut ir, Vec::new());
    let name = ir.name("L1");
    let entry = ir.nodes.new_label(Origin::SYNTHETIC, name, finally_body);
    let inlined = block(&mut ir, vec![entry]);
    let try_body = block(&mut ir, Vec::new());
    let try_node = ir.nodes.new_try(Origin::SYNTHETIC, try_body, Vec::new(), None);
    let try_node = ir.nodes.set_try_inlined_finallies(try_node, vec![inlined]);
    let jump = ir.nodes.new_jump_to_inlined_finally(name);
    let mut lc = LexicalContext::new(ir);
    for node in [f, body, try_node, try_body] {
        lc.push(node);
    }

    assert_eq!(lc.jump_target(jump), Some(finally_body));
    assert_eq!(lc.pop_scope_limit(jump), Some(try_node));
    assert_eq!(
        lc.jump_target_label(jump, finally_body),
        Some(lc.nodes().block(finally_body).entry_label)
    );
    pop_all(&mut lc);
}

#[test]
#[should_panic(expected = "is not a jump")]
fn non_jump_has_no_target() {
    let mut ir = Ir::default();
    let empty = ir.nodes.new_empty(Origin::SYNTHETIC);
    let lc = LexicalContext::new(ir);
    lc.jump_target(empty);
}
