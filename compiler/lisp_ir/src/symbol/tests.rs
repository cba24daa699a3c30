use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_is_idempotent() {
    let table = SymbolTable::new();

    let a = table.intern("A");
    let b = table.intern("B");
    let c = table.intern("C");

    assert_eq!(table.intern("A"), a);
    assert_eq!(table.intern("B"), b);
    assert_eq!(table.intern("C"), c);
    assert_ne!(a, b);
    assert_ne!(b, c);
}

#[test]
fn test_ids_are_dense_in_interning_order() {
    let table = SymbolTable::new();

    assert_eq!(table.intern("first").raw(), 0);
    assert_eq!(table.intern("second").raw(), 1);
    assert_eq!(table.intern("first").raw(), 0);
    assert_eq!(table.intern("third").raw(), 2);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_lookup_returns_name() {
    let table = SymbolTable::new();
    let plus = table.intern("+");
    let let_ = table.intern("let");

    assert_eq!(table.lookup(plus), "+");
    assert_eq!(table.lookup(let_), "let");
}

#[test]
fn test_lookup_unknown_symbol() {
    let table = SymbolTable::new();
    assert_eq!(table.lookup(Symbol::from_raw(99)), "<unknown>");
}

#[test]
fn test_get_does_not_intern() {
    let table = SymbolTable::new();
    assert_eq!(table.get("x"), None);
    assert!(table.is_empty());

    let x = table.intern("x");
    assert_eq!(table.get("x"), Some(x));
}

#[test]
fn test_shared_table_sees_same_symbols() {
    let table = SharedSymbolTable::new();
    let other = table.clone();

    let name = table.intern("shared");
    assert_eq!(other.intern("shared"), name);
    assert_eq!(other.lookup(name), "shared");
}

mod proptest_interning {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn equal_names_equal_symbols(names in proptest::collection::vec("[a-z+*<>-]{1,6}", 1..40)) {
            let table = SymbolTable::new();
            let first: Vec<Symbol> = names.iter().map(|n| table.intern(n)).collect();
            let second: Vec<Symbol> = names.iter().map(|n| table.intern(n)).collect();
            prop_assert_eq!(&first, &second);

            for (i, a) in names.iter().enumerate() {
                for (j, b) in names.iter().enumerate() {
                    prop_assert_eq!(a == b, first[i] == first[j]);
                }
            }
        }
    }
}
