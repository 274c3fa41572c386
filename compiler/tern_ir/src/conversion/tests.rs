use super::*;
use crate::{SymbolFlags, SymbolKind};

fn setup() -> (StringInterner, SymbolTable, SymbolId, SymbolId) {
    let mut interner = StringInterner::new();
    let mut symbols = SymbolTable::new();
    let x = symbols.new_symbol(interner.intern("x"), SymbolKind::Var, SymbolFlags::empty());
    let y = symbols.new_symbol(interner.intern("y"), SymbolKind::Var, SymbolFlags::empty());
    (interner, symbols, x, y)
}

#[test]
fn liveness_follows_target_slot() {
    let (_, mut symbols, x, y) = setup();
    let chain = LocalVariableConversion::new(
        x,
        Type::Int,
        Type::Number,
        Some(LocalVariableConversion::new(y, Type::Int, Type::Object, None)),
    );
    assert!(!chain.is_any_live(&symbols));

    symbols.set_needs_slot(y, true);
    symbols.set_has_slot_for(y, Type::Object);
    assert!(!chain.is_live(&symbols));
    assert!(chain.is_any_live(&symbols));
}

#[test]
fn iteration_and_description() {
    let (interner, symbols, x, y) = setup();
    let chain = LocalVariableConversion::new(
        x,
        Type::Int,
        Type::Number,
        Some(LocalVariableConversion::new(y, Type::Int, Type::Object, None)),
    );
    assert_eq!(chain.len(), 2);
    assert_eq!(
        chain.iter().map(LocalVariableConversion::symbol).collect::<Vec<_>>(),
        vec![x, y]
    );
    assert_eq!(
        chain.describe(&symbols, &interner),
        "\u{27e6}x:int\u{2192}double, y:int\u{2192}object\u{27e7}"
    );
}

#[test]
fn equality_is_identity() {
    let (_, _, x, _) = setup();
    let a = LocalVariableConversion::new(x, Type::Int, Type::Long, None);
    let b = LocalVariableConversion::new(x, Type::Int, Type::Long, None);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
