use super::*;
use proptest::prelude::*;

const ALL: [Type; 10] = [
    Type::Unknown,
    Type::Boolean,
    Type::Int,
    Type::Long,
    Type::Number,
    Type::CharSequence,
    Type::String,
    Type::Undefined,
    Type::Object,
    Type::Undecided,
];

fn any_type() -> impl Strategy<Value = Type> {
    (0..ALL.len()).prop_map(|i| ALL[i])
}

#[test]
fn numeric_widening_follows_weight() {
    assert_eq!(Type::widest(Type::Int, Type::Long), Type::Long);
    assert_eq!(Type::widest(Type::Number, Type::Int), Type::Number);
    assert_eq!(Type::widest(Type::Boolean, Type::Int), Type::Int);
    assert_eq!(Type::widest(Type::Unknown, Type::Boolean), Type::Boolean);
}

#[test]
fn distinct_object_types_widen_to_object() {
    assert_eq!(Type::widest(Type::String, Type::Undefined), Type::Object);
    assert_eq!(Type::widest(Type::String, Type::String), Type::String);
    assert_eq!(Type::widest(Type::String, Type::Int), Type::String);
}

#[test]
fn narrowest_keeps_left_on_tie() {
    assert_eq!(Type::narrowest(Type::Long, Type::Int), Type::Int);
    assert_eq!(Type::narrowest(Type::String, Type::Object), Type::String);
    assert_eq!(Type::narrowest(Type::Object, Type::String), Type::Object);
}

#[test]
fn return_type_widening() {
    assert_eq!(Type::widest_return_type(Type::Unknown, Type::Int), Type::Int);
    assert_eq!(Type::widest_return_type(Type::Long, Type::Unknown), Type::Long);
    assert_eq!(Type::widest_return_type(Type::Boolean, Type::Int), Type::Object);
    assert_eq!(Type::widest_return_type(Type::Int, Type::Number), Type::Number);
    assert_eq!(Type::widest_return_type(Type::Boolean, Type::Boolean), Type::Boolean);
    assert_eq!(Type::widest_return_type(Type::Int, Type::String), Type::Object);
    assert_eq!(Type::widest_return_type(Type::CharSequence, Type::Number), Type::Object);
    assert_eq!(Type::widest_return_type(Type::String, Type::String), Type::String);
}

#[test]
fn arithmetic_promotion() {
    assert_eq!(Type::Boolean.boolean_to_int(), Type::Int);
    assert_eq!(Type::Long.boolean_to_int(), Type::Long);
    assert_eq!(Type::Undefined.undefined_to_number(), Type::Number);
    assert_eq!(Type::Object.undefined_to_number(), Type::Object);
}

#[test]
fn slot_widths() {
    assert_eq!(Type::Unknown.slot_width(), 0);
    assert_eq!(Type::Int.slot_width(), 1);
    assert_eq!(Type::Long.slot_width(), 2);
    assert_eq!(Type::Number.slot_width(), 2);
    assert_eq!(Type::Object.slot_width(), 1);
}

#[test]
fn display_uses_short_names() {
    assert_eq!(Type::Number.to_string(), "double");
    assert_eq!(Type::CharSequence.to_string(), "charseq");
}

proptest! {
    #[test]
    fn widest_is_commutative(a in any_type(), b in any_type()) {
        prop_assert_eq!(Type::widest(a, b), Type::widest(b, a));
    }

    #[test]
    fn widest_is_an_upper_bound(a in any_type(), b in any_type()) {
        let w = Type::widest(a, b);
        prop_assert!(w.weight() >= a.weight());
        prop_assert!(w.weight() >= b.weight());
    }

    #[test]
    fn narrowest_never_exceeds_either(a in any_type(), b in any_type()) {
        let n = Type::narrowest(a, b);
        prop_assert!(n == a || n == b);
        prop_assert!(n.weight() <= a.weight());
        prop_assert!(n.weight() <= b.weight());
    }
}
