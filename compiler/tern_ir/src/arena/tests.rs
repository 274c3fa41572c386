#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use crate::node::{BlockFlags, ForFlags, FunctionFlags, FunctionKind, VarFlags};
use crate::{BinaryOp, IrError, Name, Origin, ScopeId, SymbolFlags, SymbolKind, Token, UnaryOp};
use pretty_assertions::assert_eq;

fn origin(position: u32) -> Origin {
    Origin::of_token(1, Token::new(0, position, 1))
}

struct Fixture {
    arena: NodeArena,
    symbols: SymbolTable,
    scope: ScopeId,
}

impl Fixture {
    fn new() -> Self {
        let mut symbols = SymbolTable::new();
        let scope = symbols.new_scope();
        Fixture {
            arena: NodeArena::new(),
            symbols,
            scope,
        }
    }

    fn ident(&mut self, raw: u32) -> NodeId {
        self.arena.new_ident(origin(raw), Name::from_raw(raw))
    }

    fn int(&mut self, value: i32) -> NodeId {
        self.arena.new_literal(Origin::SYNTHETIC, LiteralValue::Int(value))
    }

    fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.arena.new_expression_statement(Origin::SYNTHETIC, expr)
    }

    fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.arena
            .new_block(Origin::SYNTHETIC, self.scope, BlockFlags::empty(), statements)
    }

    fn throw(&mut self) -> NodeId {
        let value = self.int(1);
        self.arena.new_throw(Origin::SYNTHETIC, value, false)
    }
}

// Setter identity

#[test]
fn setter_with_equal_value_returns_same_id() {
    let mut f = Fixture::new();
    let x = f.ident(10);
    let one = f.int(1);
    let sum = f.arena.new_binary(Token::NONE, BinaryOp::Add, x, one).unwrap();
    let len = f.arena.len();

    assert_eq!(f.arena.set_binary_lhs(sum, x), sum);
    assert_eq!(f.arena.set_binary_rhs(sum, one), sum);
    assert_eq!(f.arena.len(), len);
}

#[test]
fn setter_with_new_value_copies_only_that_field() {
    let mut f = Fixture::new();
    let x = f.ident(10);
    let y = f.ident(11);
    let one = f.int(1);
    let sum = f.arena.new_binary(Token::NONE, BinaryOp::Sub, x, one).unwrap();

    let changed = f.arena.set_binary_lhs(sum, y);
    assert_ne!(changed, sum);
    assert_eq!(f.arena.binary(changed).lhs, y);
    assert_eq!(f.arena.binary(changed).rhs, one);
    assert_eq!(f.arena.binary(changed).op, BinaryOp::Sub);
    // The original is untouched.
    assert_eq!(f.arena.binary(sum).lhs, x);
    assert_eq!(f.arena.start(changed), f.arena.start(sum));
}

#[test]
fn flag_setters_are_idempotent() {
    let mut f = Fixture::new();
    let block = f.block(Vec::new());
    let scoped = f.arena.set_block_needs_scope(block);
    assert_ne!(scoped, block);
    assert_eq!(f.arena.set_block_needs_scope(scoped), scoped);
    assert!(f.arena.block(scoped).flags.contains(BlockFlags::NEEDS_SCOPE));
    assert_eq!(f.arena.block(scoped).scope, f.arena.block(block).scope);
}

#[test]
fn copies_get_fresh_labels() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let while_node = f.arena.new_while(Origin::SYNTHETIC, false, None, body);
    let escaping = f.arena.set_control_flow_escapes(while_node, true);

    let before = f.arena.while_node(while_node);
    let after = f.arena.while_node(escaping);
    assert_ne!(before.break_label, after.break_label);
    assert_ne!(before.continue_label, after.continue_label);
    assert_eq!(after.break_label.kind, LabelKind::LoopBreak);
}

#[test]
fn conversion_setter_compares_by_allocation() {
    let mut f = Fixture::new();
    let symbol = f.symbols.new_symbol(Name::from_raw(20), SymbolKind::Var, SymbolFlags::empty());
    let brk = f.arena.new_break(Origin::SYNTHETIC, None);
    let conversion = LocalVariableConversion::new(symbol, Type::Int, Type::Number, None);

    let with_conversion = f.arena.set_local_variable_conversion(brk, Some(conversion.clone()));
    assert_ne!(with_conversion, brk);
    assert_eq!(
        f.arena.set_local_variable_conversion(with_conversion, Some(conversion)),
        with_conversion
    );

    let equal_but_distinct = LocalVariableConversion::new(symbol, Type::Int, Type::Number, None);
    assert_ne!(
        f.arena.set_local_variable_conversion(with_conversion, Some(equal_but_distinct)),
        with_conversion
    );
}

#[test]
fn conversion_liveness_follows_symbol_slots() {
    let mut f = Fixture::new();
    let symbol = f.symbols.new_symbol(Name::from_raw(20), SymbolKind::Var, SymbolFlags::empty());
    let brk = f.arena.new_break(Origin::SYNTHETIC, None);
    let conversion = LocalVariableConversion::new(symbol, Type::Int, Type::Number, None);
    let brk = f.arena.set_local_variable_conversion(brk, Some(conversion));
    assert!(!f.arena.has_live_conversion(brk, &f.symbols));

    f.symbols.set_needs_slot(symbol, true);
    f.symbols.set_has_slot_for(symbol, Type::Number);
    assert!(f.arena.has_live_conversion(brk, &f.symbols));
}

#[test]
#[should_panic(expected = "join predecessor")]
fn conversion_on_non_join_predecessor_panics() {
    let mut f = Fixture::new();
    let ret = f.arena.new_return(Origin::SYNTHETIC, None);
    f.arena.set_local_variable_conversion(ret, None);
}

#[test]
#[should_panic(expected = "expected Block")]
fn typed_accessor_on_wrong_kind_panics() {
    let mut f = Fixture::new();
    let x = f.ident(1);
    let _ = f.arena.block(x);
}

#[test]
fn frame_flags_land_on_blocks_functions_and_loops() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let function = f.arena.new_function(
        Origin::SYNTHETIC,
        FunctionKind::Normal,
        Name::from_raw(30),
        None,
        Vec::new(),
        body,
        FunctionFlags::empty(),
    );
    let flagged = f.arena.apply_frame_flags(function, FunctionFlags::HAS_EVAL.bits());
    assert!(f.arena.function(flagged).flags.contains(FunctionFlags::HAS_EVAL));

    let flagged_block = f.arena.apply_frame_flags(body, BlockFlags::NEEDS_SCOPE.bits());
    assert!(f.arena.block(flagged_block).flags.contains(BlockFlags::NEEDS_SCOPE));

    let loop_body = f.block(Vec::new());
    let for_node = f
        .arena
        .new_for(Origin::SYNTHETIC, None, None, None, loop_body, ForFlags::empty());
    let flagged_for = f.arena.apply_frame_flags(for_node, ForFlags::PER_ITERATION_SCOPE.bits());
    assert!(f.arena.for_node(flagged_for).flags.contains(ForFlags::PER_ITERATION_SCOPE));

    let label = f.arena.new_label(Origin::SYNTHETIC, Name::from_raw(31), loop_body);
    assert_eq!(f.arena.apply_frame_flags(label, 1), label);
    assert_eq!(f.arena.apply_frame_flags(function, 0), function);
}

// Terminal propagation

#[test]
fn block_terminality_follows_last_statement() {
    let mut f = Fixture::new();
    let x = f.ident(1);
    let stmt = f.expr_stmt(x);
    let throw = f.throw();

    let open = f.block(vec![stmt]);
    assert!(!f.arena.is_terminal(open));

    let closed = f.arena.set_block_statements(open, vec![stmt, throw]);
    assert!(f.arena.is_terminal(closed));
    assert!(f.arena.block(closed).flags.contains(BlockFlags::IS_TERMINAL));

    let reopened = f.arena.set_block_statements(closed, vec![throw, stmt]);
    assert!(!f.arena.is_terminal(reopened));
}

#[test]
fn block_statements_extend_finish() {
    let mut f = Fixture::new();
    let block = f.arena.new_block(
        Origin::new(1, Token::new(0, 0, 1), 5),
        f.scope,
        BlockFlags::empty(),
        Vec::new(),
    );
    let late = f.arena.new_empty(Origin::new(2, Token::new(0, 20, 1), 21));
    let grown = f.arena.set_block_statements(block, vec![late]);
    assert_eq!(f.arena.finish(grown), 21);
}

#[test]
fn break_makes_block_terminal_through_has_goto() {
    let mut f = Fixture::new();
    let brk = f.arena.new_break(Origin::SYNTHETIC, None);
    assert!(!f.arena.is_terminal(brk));
    assert!(f.arena.has_goto(brk));
    let block = f.block(vec![brk]);
    assert!(f.arena.is_terminal(block));
}

#[test]
fn if_is_terminal_only_with_both_branches_terminal() {
    let mut f = Fixture::new();
    let test = f.ident(1);
    let throw = f.throw();
    let pass = f.block(vec![throw]);
    let pass = f.arena.new_block_statement(pass);
    let without_else = f.arena.new_if(Origin::SYNTHETIC, test, pass, None);
    assert!(!f.arena.is_terminal(without_else));

    let ret = f.arena.new_return(Origin::SYNTHETIC, None);
    let fail = f.block(vec![ret]);
    let fail = f.arena.new_block_statement(fail);
    let with_else = f.arena.set_if_fail(without_else, Some(fail));
    assert!(f.arena.is_terminal(with_else));
}

fn switch_with(f: &mut Fixture, default_case: Option<usize>) -> NodeId {
    let tag = f.ident(1);
    let mut cases = Vec::new();
    for i in 0..2 {
        let throw = f.throw();
        let body = f.block(vec![throw]);
        let test = if Some(i) == default_case { None } else { Some(f.int(7)) };
        cases.push(f.arena.new_case(Origin::SYNTHETIC, test, body));
    }
    f.arena.new_switch(Origin::SYNTHETIC, tag, cases, default_case)
}

#[test]
fn switch_without_default_is_not_terminal() {
    let mut f = Fixture::new();
    let switch = switch_with(&mut f, None);
    assert!(!f.arena.is_terminal(switch));
}

#[test]
fn switch_with_default_and_terminal_cases_is_terminal() {
    let mut f = Fixture::new();
    let switch = switch_with(&mut f, Some(1));
    assert!(f.arena.is_terminal(switch));

    let cases = f.arena.switch(switch).cases.clone();
    let empty = f.block(Vec::new());
    let open_case = f.arena.set_case_body(cases[0], empty);
    let fallthrough = f.arena.set_switch_cases(switch, vec![open_case, cases[1]], Some(1));
    assert!(!f.arena.is_terminal(fallthrough));
}

#[test]
fn infinite_loop_is_terminal_unless_it_escapes() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let forever = f.arena.new_for(Origin::SYNTHETIC, None, None, None, body, ForFlags::empty());
    assert!(f.arena.must_enter(forever));
    assert!(f.arena.has_goto(forever));
    assert!(f.arena.is_terminal(forever));

    let escaping = f.arena.set_control_flow_escapes(forever, true);
    assert!(!f.arena.is_terminal(escaping));

    let collection = f.ident(2);
    let for_in = f.arena.new_for(
        Origin::SYNTHETIC,
        None,
        None,
        Some(collection),
        body,
        ForFlags::IS_FOR_IN,
    );
    assert!(!f.arena.must_enter(for_in));
    assert!(!f.arena.is_terminal(for_in));
}

#[test]
fn do_while_with_terminal_body_is_terminal() {
    let mut f = Fixture::new();
    let throw = f.throw();
    let body = f.block(vec![throw]);
    let test = f.ident(3);
    let do_while = f.arena.new_while(Origin::SYNTHETIC, true, Some(test), body);
    assert!(f.arena.is_terminal(do_while));

    let plain_while = f.arena.new_while(Origin::SYNTHETIC, false, Some(test), body);
    assert!(!f.arena.is_terminal(plain_while));
}

#[test]
fn label_is_terminal_only_around_a_terminal_loop() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let forever = f.arena.new_while(Origin::SYNTHETIC, false, None, body);
    let labelled_loop = f.arena.new_label(Origin::SYNTHETIC, Name::from_raw(40), forever);
    assert!(f.arena.is_terminal(labelled_loop));

    let throw = f.throw();
    let block = f.block(vec![throw]);
    let statement = f.arena.new_block_statement(block);
    let labelled_block = f.arena.new_label(Origin::SYNTHETIC, Name::from_raw(40), statement);
    assert!(!f.arena.is_terminal(labelled_block));
}

#[test]
fn try_needs_terminal_body_and_catches() {
    let mut f = Fixture::new();
    let throw = f.throw();
    let body = f.block(vec![throw]);
    let e = f.ident(5);
    let catch_body = f.block(Vec::new());
    let catch = f.arena.new_catch(Origin::SYNTHETIC, e, None, catch_body, false).unwrap();
    let catch_block = f.block(vec![catch]);
    let try_node = f.arena.new_try(Origin::SYNTHETIC, body, vec![catch_block], None);
    assert!(!f.arena.is_terminal(try_node));

    let rethrow = f.throw();
    let terminal_catch_body = f.block(vec![rethrow]);
    let catch = f.arena.set_catch_body(catch, terminal_catch_body);
    let catch_block = f.block(vec![catch]);
    let try_node = f.arena.set_try_catch_blocks(try_node, vec![catch_block]);
    assert!(f.arena.is_terminal(try_node));
}

// Construction errors

#[test]
fn catch_parameter_must_be_binding() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let literal = f.int(1);
    let err = f.arena.new_catch(Origin::SYNTHETIC, literal, None, body, false).unwrap_err();
    assert_eq!(err, IrError::InvalidCatchParameter { found: "Literal" });

    let pattern = f.arena.new_array_literal(Origin::SYNTHETIC, vec![None]);
    assert!(f.arena.new_catch(Origin::SYNTHETIC, pattern, None, body, false).is_ok());
}

#[test]
fn set_catch_exception_validates_binding() {
    let mut f = Fixture::new();
    let body = f.block(Vec::new());
    let e = f.ident(5);
    let catch = f.arena.new_catch(Origin::SYNTHETIC, e, None, body, false).unwrap();
    let call_target = f.ident(6);
    let call = f.arena.new_call(Origin::SYNTHETIC, call_target, Vec::new());
    assert_eq!(
        f.arena.set_catch_exception(catch, call),
        Err(IrError::InvalidCatchParameter { found: "Call" })
    );
    assert_eq!(f.arena.set_catch_exception(catch, e), Ok(catch));
}

#[test]
fn eval_this_must_be_identifier() {
    let mut f = Fixture::new();
    let this = f.int(0);
    let err = f.arena.eval_args(Vec::new(), this, Name::EMPTY, false).unwrap_err();
    assert_eq!(err, IrError::InvalidEvalArguments { found: "Literal" });

    let this = f.arena.new_ident(Origin::SYNTHETIC, Name::THIS);
    let args = f.arena.eval_args(Vec::new(), this, Name::EMPTY, true).unwrap();
    assert!(args.strict);
}

#[test]
fn assignment_targets_are_checked() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let two = f.int(2);
    assert_eq!(
        f.arena.new_binary(Token::NONE, BinaryOp::Assign, one, two),
        Err(IrError::InvalidAssignmentTarget { found: "Literal" })
    );
    assert_eq!(
        f.arena.new_unary(Origin::SYNTHETIC, UnaryOp::IncPrefix, one),
        Err(IrError::InvalidAssignmentTarget { found: "Literal" })
    );

    let pattern = f.arena.new_object(Origin::SYNTHETIC, Vec::new());
    assert!(f.arena.new_binary(Token::NONE, BinaryOp::Assign, pattern, two).is_ok());
    assert!(f.arena.new_binary(Token::NONE, BinaryOp::AssignAdd, pattern, two).is_err());
}

#[test]
fn binary_spans_its_operands() {
    let mut f = Fixture::new();
    let lhs = f.arena.new_ident(Origin::new(3, Token::new(0, 4, 1), 5), Name::from_raw(9));
    let rhs = f.arena.new_literal(Origin::new(3, Token::new(0, 8, 2), 10), LiteralValue::Int(42));
    let sum = f.arena.new_binary(Token::new(1, 6, 1), BinaryOp::Add, lhs, rhs).unwrap();
    assert_eq!((f.arena.start(sum), f.arena.finish(sum)), (4, 10));
    assert_eq!(f.arena.line_number(sum), 3);
}

#[test]
fn var_declares_an_identifier() {
    let mut f = Fixture::new();
    let name = f.ident(8);
    let init = f.int(3);
    let var = f.arena.new_var(Origin::SYNTHETIC, name, Some(init), VarFlags::IS_LET);
    assert_eq!(f.arena.var(var).init, Some(init));
    let cleared = f.arena.set_var_init(var, None);
    assert_eq!(f.arena.var(cleared).init, None);
    assert!(f.arena.var(cleared).flags.contains(VarFlags::IS_LET));
}

// Children

#[test]
fn children_follow_traversal_order() {
    let mut f = Fixture::new();
    let name = f.ident(1);
    let init = f.int(1);
    let var = f.arena.new_var(Origin::SYNTHETIC, name, Some(init), VarFlags::empty());
    assert_eq!(f.arena.children(var).as_slice(), &[init, name]);

    let body = f.block(Vec::new());
    let test = f.ident(2);
    let do_while = f.arena.new_while(Origin::SYNTHETIC, true, Some(test), body);
    assert_eq!(f.arena.children(do_while).as_slice(), &[body, test]);

    let finally = f.block(Vec::new());
    let try_node = f.arena.new_try(Origin::SYNTHETIC, body, Vec::new(), Some(finally));
    assert_eq!(f.arena.children(try_node).as_slice(), &[finally, body]);

    let holes = f.arena.new_array_literal(Origin::SYNTHETIC, vec![Some(init), None, Some(test)]);
    assert_eq!(f.arena.children(holes).as_slice(), &[init, test]);
}
