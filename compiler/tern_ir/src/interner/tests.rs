use super::*;

#[test]
fn predefined_names_resolve() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.lookup(Name::DEFAULT), "default");
    assert_eq!(interner.lookup(Name::DEFAULT_BINDING), "*default*");
    assert_eq!(interner.lookup(Name::STAR), "*");
    assert_eq!(interner.lookup(Name::THIS), "this");
    assert_eq!(interner.lookup(Name::ARGUMENTS), "arguments");
}

#[test]
fn interning_is_idempotent() {
    let mut interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("x");
    let c = interner.intern("y");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(c), "y");
}

#[test]
fn predefined_text_maps_to_fixed_name() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.intern("this"), Name::THIS);
    assert_eq!(interner.get("arguments"), Some(Name::ARGUMENTS));
}

#[test]
fn get_does_not_intern() {
    let mut interner = StringInterner::new();
    let before = interner.len();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), before);
    interner.intern("missing");
    assert_eq!(interner.len(), before + 1);
}
