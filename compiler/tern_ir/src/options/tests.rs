use super::*;
use pretty_assertions::assert_eq;

fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn defaults_when_unset() {
    assert_eq!(IrOptions::from_lookup(lookup(&[])), IrOptions::default());
}

#[test]
fn reads_both_variables() {
    let options = IrOptions::from_lookup(lookup(&[
        ("TERN_OPTIMISTIC_TYPES", "true"),
        ("TERN_TRACE_SYMBOLS", "x, y,,z"),
    ]));
    assert_eq!(
        options,
        IrOptions::new()
            .with_optimistic_types(true)
            .with_trace_symbols(SymbolTrace::Named(vec![
                "x".to_owned(),
                "y".to_owned(),
                "z".to_owned(),
            ]))
    );
}

#[test]
fn trace_syntax() {
    assert_eq!(SymbolTrace::parse("*"), SymbolTrace::All);
    assert_eq!(SymbolTrace::parse("   "), SymbolTrace::Off);
    assert_eq!(SymbolTrace::parse(" , "), SymbolTrace::Off);
}

#[test]
fn unrecognised_flag_value_disables() {
    let options = IrOptions::from_lookup(lookup(&[("TERN_OPTIMISTIC_TYPES", "maybe")]));
    assert!(!options.optimistic_types);
    let options = IrOptions::from_lookup(lookup(&[("TERN_OPTIMISTIC_TYPES", "1")]));
    assert!(options.optimistic_types);
}
