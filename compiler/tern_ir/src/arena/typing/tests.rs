#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use crate::{
    LiteralValue, LocalTypeMap, Name, Origin, SymbolFlags, SymbolId, SymbolKind, SymbolTable, Token,
};
use pretty_assertions::assert_eq;

fn literal_of(arena: &mut NodeArena, ty: Type) -> NodeId {
    let value = match ty {
        Type::Boolean => LiteralValue::Boolean(true),
        Type::Int => LiteralValue::Int(1),
        Type::Long => LiteralValue::Long(1),
        Type::Number => LiteralValue::number(1.5),
        Type::String => LiteralValue::String(Name::from_raw(7)),
        Type::Undefined => LiteralValue::Undefined,
        _ => LiteralValue::Null,
    };
    arena.new_literal(Origin::SYNTHETIC, value)
}

fn binary(arena: &mut NodeArena, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
    arena.new_binary(Token::NONE, op, lhs, rhs).unwrap()
}

fn unary(arena: &mut NodeArena, op: UnaryOp, operand: NodeId) -> NodeId {
    arena.new_unary(Origin::SYNTHETIC, op, operand).unwrap()
}

/// Identifier bound to a fresh local symbol.
fn local(arena: &mut NodeArena, symbols: &mut SymbolTable, raw: u32) -> (NodeId, SymbolId) {
    let symbol = symbols.new_symbol(Name::from_raw(raw), SymbolKind::Var, SymbolFlags::empty());
    let ident = arena.new_ident(Origin::SYNTHETIC, Name::from_raw(raw));
    (arena.set_ident_symbol(ident, symbol), symbol)
}

#[test]
fn add_widening_table() {
    use Type::{Boolean, CharSequence, Int, Long, Number, Object, String};
    let operands = [Boolean, Int, Long, Number, String, Object];
    let expected = [
        [Int, Long, Number, Number, CharSequence, Object],
        [Long, Long, Number, Number, CharSequence, Object],
        [Number, Number, Number, Number, CharSequence, Object],
        [Number, Number, Number, Number, CharSequence, Object],
        [CharSequence; 6],
        [Object, Object, Object, Object, CharSequence, Object],
    ];

    let mut arena = NodeArena::new();
    for (row, &lhs_ty) in expected.iter().zip(&operands) {
        for (&want, &rhs_ty) in row.iter().zip(&operands) {
            let lhs = literal_of(&mut arena, lhs_ty);
            let rhs = literal_of(&mut arena, rhs_ty);
            let add = binary(&mut arena, BinaryOp::Add, lhs, rhs);
            assert_eq!(
                arena.widest_operation_type(add, &NoLocalTypes),
                want,
                "{lhs_ty} + {rhs_ty}"
            );
        }
    }
}

#[test]
fn arithmetic_widening() {
    let mut arena = NodeArena::new();
    let int = literal_of(&mut arena, Type::Int);
    let num = literal_of(&mut arena, Type::Number);
    let boolean = literal_of(&mut arena, Type::Boolean);

    let sub = binary(&mut arena, BinaryOp::Sub, int, boolean);
    assert_eq!(arena.get_type(sub, &NoLocalTypes), Type::Long);
    let mul = binary(&mut arena, BinaryOp::Mul, int, num);
    assert_eq!(arena.get_type(mul, &NoLocalTypes), Type::Number);
    let bools = binary(&mut arena, BinaryOp::Mul, boolean, boolean);
    assert_eq!(arena.get_type(bools, &NoLocalTypes), Type::Int);
    let div = binary(&mut arena, BinaryOp::Div, int, int);
    assert_eq!(arena.get_type(div, &NoLocalTypes), Type::Number);
    let shr = binary(&mut arena, BinaryOp::Shr, int, int);
    assert_eq!(arena.get_type(shr, &NoLocalTypes), Type::Long);
    let and = binary(&mut arena, BinaryOp::BitAnd, num, num);
    assert_eq!(arena.get_type(and, &NoLocalTypes), Type::Int);
    let lt = binary(&mut arena, BinaryOp::Lt, num, int);
    assert_eq!(arena.get_type(lt, &NoLocalTypes), Type::Boolean);
    let comma = binary(&mut arena, BinaryOp::CommaLeft, boolean, num);
    assert_eq!(arena.get_type(comma, &NoLocalTypes), Type::Boolean);
    let or = binary(&mut arena, BinaryOp::Or, boolean, int);
    assert_eq!(arena.get_type(or, &NoLocalTypes), Type::Object);

    // `1 || "a"` and `c ? 1 : "a"` yield one branch's value unconverted.
    let string = literal_of(&mut arena, Type::String);
    let int_or_string = binary(&mut arena, BinaryOp::Or, int, string);
    assert_eq!(arena.get_type(int_or_string, &NoLocalTypes), Type::Object);
    let choice = arena.new_ternary(Origin::SYNTHETIC, boolean, int, string);
    assert_eq!(arena.get_type(choice, &NoLocalTypes), Type::Object);
}

#[test]
fn unary_widening() {
    let mut arena = NodeArena::new();
    let mut symbols = SymbolTable::new();
    let boolean = literal_of(&mut arena, Type::Boolean);
    let string = literal_of(&mut arena, Type::String);
    let long = literal_of(&mut arena, Type::Long);

    let pos_bool = unary(&mut arena, UnaryOp::Pos, boolean);
    assert_eq!(arena.get_type(pos_bool, &NoLocalTypes), Type::Int);
    let pos_string = unary(&mut arena, UnaryOp::Pos, string);
    assert_eq!(arena.get_type(pos_string, &NoLocalTypes), Type::Number);
    let pos_long = unary(&mut arena, UnaryOp::Pos, long);
    assert_eq!(arena.get_type(pos_long, &NoLocalTypes), Type::Long);
    let neg = unary(&mut arena, UnaryOp::Neg, long);
    assert_eq!(arena.get_type(neg, &NoLocalTypes), Type::Number);
    let typeof_ = unary(&mut arena, UnaryOp::Typeof, long);
    assert_eq!(arena.get_type(typeof_, &NoLocalTypes), Type::String);
    let void = unary(&mut arena, UnaryOp::Void, long);
    assert_eq!(arena.get_type(void, &NoLocalTypes), Type::Undefined);

    let (x, symbol) = local(&mut arena, &mut symbols, 20);
    let mut locals = LocalTypeMap::new();
    locals.insert(symbol, Type::Int);
    let inc = unary(&mut arena, UnaryOp::IncPrefix, x);
    assert_eq!(arena.get_type(inc, &locals), Type::Long);
    locals.insert(symbol, Type::Number);
    assert_eq!(arena.get_type(inc, &locals), Type::Number);
}

#[test]
fn optimistic_bounds() {
    let mut arena = NodeArena::new();
    let mut symbols = SymbolTable::new();
    let (x, _) = local(&mut arena, &mut symbols, 20);
    let int = literal_of(&mut arena, Type::Int);

    assert_eq!(arena.most_optimistic_type(x), Type::Int);
    assert_eq!(arena.most_pessimistic_type(x), Type::Object);
    assert!(arena.can_be_optimistic(x));

    let add = binary(&mut arena, BinaryOp::Add, x, int);
    assert_eq!(arena.most_optimistic_type(add), Type::Undecided);

    let shr = binary(&mut arena, BinaryOp::Shr, x, int);
    assert_eq!(arena.most_optimistic_type(shr), Type::Int);
    assert_eq!(arena.most_pessimistic_type(shr), Type::Long);
    assert!(arena.can_be_optimistic(shr));

    let bit_or = binary(&mut arena, BinaryOp::BitOr, x, int);
    assert_eq!(arena.most_optimistic_type(bit_or), Type::Int);
    assert!(!arena.can_be_optimistic(bit_or));

    let not = unary(&mut arena, UnaryOp::Not, x);
    assert!(!arena.can_be_optimistic(not));
    let neg = unary(&mut arena, UnaryOp::Neg, x);
    assert_eq!(arena.most_optimistic_type(neg), Type::Int);
    assert!(!arena.can_be_optimistic(int));
}

#[test]
fn optimistic_type_narrows_and_guards() {
    let mut arena = NodeArena::new();
    let mut symbols = SymbolTable::new();
    let (x, symbol) = local(&mut arena, &mut symbols, 20);
    let one = literal_of(&mut arena, Type::Int);
    let mut locals = LocalTypeMap::new();
    locals.insert(symbol, Type::Int);

    let sub = binary(&mut arena, BinaryOp::Sub, x, one);
    assert_eq!(arena.get_type(sub, &locals), Type::Long);
    assert!(!arena.is_optimistic(sub, &locals));

    let speculated = arena.set_optimistic_type(sub, Type::Int);
    assert_eq!(arena.get_type(speculated, &locals), Type::Int);
    assert!(arena.is_optimistic(speculated, &locals));

    // A wider local invalidates the cached result.
    locals.insert(symbol, Type::Number);
    assert_eq!(arena.get_type(speculated, &locals), Type::Number);
    assert!(!arena.is_optimistic(speculated, &locals));
}

#[test]
fn ident_types_come_from_locals_or_speculation() {
    let mut arena = NodeArena::new();
    let mut symbols = SymbolTable::new();
    let (x, symbol) = local(&mut arena, &mut symbols, 20);
    let unbound = arena.new_ident(Origin::SYNTHETIC, Name::from_raw(21));

    let mut locals = LocalTypeMap::new();
    assert_eq!(arena.get_type(x, &locals), Type::Object);
    locals.insert(symbol, Type::Long);
    assert_eq!(arena.get_type(x, &locals), Type::Long);
    assert_eq!(arena.get_type(unbound, &locals), Type::Object);

    let speculated = arena.set_optimistic_type(x, Type::Int);
    assert_eq!(arena.get_type(speculated, &locals), Type::Int);
}

#[test]
fn decide_type_resolves_add() {
    let mut arena = NodeArena::new();
    let mut symbols = SymbolTable::new();
    let (x, sx) = local(&mut arena, &mut symbols, 20);
    let (y, sy) = local(&mut arena, &mut symbols, 21);
    let mut locals = LocalTypeMap::new();
    locals.insert(sx, Type::Int);
    locals.insert(sy, Type::Int);

    let add = binary(&mut arena, BinaryOp::Add, x, y);
    let undecided = arena.set_optimistic_type(add, Type::Undecided);
    assert_eq!(arena.get_type(undecided, &locals), Type::Int);

    let decided = arena.decide_type(undecided, &locals);
    assert_eq!(arena.optimistic(decided).and_then(|o| o.ty), Some(Type::Int));

    locals.insert(sy, Type::String);
    let concat = arena.decide_type(undecided, &locals);
    assert_eq!(arena.optimistic(concat).and_then(|o| o.ty), Some(Type::CharSequence));

    let boolean = literal_of(&mut arena, Type::Boolean);
    let undefined = literal_of(&mut arena, Type::Undefined);
    let mixed = binary(&mut arena, BinaryOp::Add, boolean, undefined);
    let mixed = arena.set_optimistic_type(mixed, Type::Undecided);
    let mixed = arena.decide_type(mixed, &NoLocalTypes);
    assert_eq!(arena.optimistic(mixed).and_then(|o| o.ty), Some(Type::Number));
}

#[test]
#[should_panic(expected = "already decided")]
fn deciding_twice_panics() {
    let mut arena = NodeArena::new();
    let one = literal_of(&mut arena, Type::Int);
    let add = binary(&mut arena, BinaryOp::Add, one, one);
    let add = arena.set_optimistic_type(add, Type::Undecided);
    let decided = arena.decide_type(add, &NoLocalTypes);
    arena.decide_type(decided, &NoLocalTypes);
}

#[test]
fn snapshots_change_only_on_mutation() {
    let mut locals = LocalTypeMap::new();
    let symbol = SymbolId::new(0);
    let before = locals.snapshot();
    locals.insert(symbol, Type::Int);
    let after_insert = locals.snapshot();
    assert_ne!(before, after_insert);
    locals.insert(symbol, Type::Int);
    assert_eq!(locals.snapshot(), after_insert);
    assert_eq!(locals.clone().snapshot(), after_insert);
    assert_eq!(locals.remove(symbol), Some(Type::Int));
    assert_ne!(locals.snapshot(), after_insert);
    assert_eq!(NoLocalTypes.snapshot(), 0);
}

#[test]
fn structural_expression_types() {
    let mut arena = NodeArena::new();
    let boolean = literal_of(&mut arena, Type::Boolean);
    let int = literal_of(&mut arena, Type::Int);
    let num = literal_of(&mut arena, Type::Number);

    let ternary = arena.new_ternary(Origin::SYNTHETIC, boolean, int, num);
    assert_eq!(arena.get_type(ternary, &NoLocalTypes), Type::Number);
    let join = arena.new_join_predecessor(Some(int));
    assert_eq!(arena.get_type(join, &NoLocalTypes), Type::Int);
    let template = arena.new_template_literal(Origin::SYNTHETIC, vec![int]);
    assert_eq!(arena.get_type(template, &NoLocalTypes), Type::String);
    let array = arena.new_array_literal(Origin::SYNTHETIC, Vec::new());
    assert_eq!(arena.get_type(array, &NoLocalTypes), Type::Object);
}
