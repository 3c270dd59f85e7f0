mod common;

use std::rc::Rc;

use common::{entries, ikey, init_test_logging, skey};
use ordarray_values::{ArrayValue, Convertible, Error, Key, array, keyed};
use pretty_assertions::assert_eq;

// =============================================================================
// Auto keys
// =============================================================================

#[test]
fn appends_count_up_from_zero() {
    let mut a = ArrayValue::new();
    assert_eq!(a.append(10), Ok(0));
    assert_eq!(a.append(20), Ok(1));

    assert_eq!(entries(&a), vec![(ikey(0), 10), (ikey(1), 20)]);
    assert_eq!(a.next_key(), Ok(2));
}

#[test]
fn explicit_int_key_moves_the_next_key() {
    let mut a = array!['a', 'b'];
    a.set(5, 'x');
    assert_eq!(a.append('y'), Ok(6));

    a.set(3, 'z');
    assert_eq!(a.append('w'), Ok(7));
}

#[test]
fn string_keys_do_not_affect_auto_keys() {
    let mut a = ArrayValue::new();
    a.set("10", 1);
    a.set("name", 2);
    assert_eq!(a.append(3), Ok(0));
    assert!(!a.contains(10));
    assert!(a.contains("10"));
}

#[test]
fn removed_maximum_is_not_reused() {
    let mut a = array![1, 2, 3];
    assert_eq!(a.remove(2), Some(3));
    assert_eq!(a.max_int_key(), 2);
    assert_eq!(a.append(4), Ok(3));
}

#[test]
fn negative_keys() {
    let mut a = ArrayValue::new();
    a.set(-5, "neg");
    assert_eq!(a.max_int_key(), -1);
    assert_eq!(a.append("first"), Ok(0));
}

#[test]
fn exhausted_key_space_is_reported() {
    let mut a = ArrayValue::new();
    a.set(i64::MAX, 1);
    assert_eq!(a.append(2), Err(Error::KeySpaceExhausted));
    assert_eq!(a.count(), 1);
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn get_absent_key_fails() {
    let a = keyed!["a" => 1];
    assert_eq!(a.get("missing"), Err(Error::KeyNotFound(skey("missing"))));
    assert_eq!(a.try_get("missing"), None);
    assert_eq!(a.get("a"), Ok(&1));
    assert_eq!(a.try_get("a"), Some(&1));
}

#[test]
fn key_not_found_message() {
    let err = array![1].get(4).unwrap_err();
    assert_eq!(err.to_string(), "undefined array key \"4\"");
}

#[test]
fn int_and_numeric_string_are_distinct() {
    let mut a = ArrayValue::new();
    a.set(1, "int");
    a.set("1", "str");
    assert_eq!(a.count(), 2);
    assert_eq!(a.get(1), Ok(&"int"));
    assert_eq!(a.get("1"), Ok(&"str"));
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn iteration_follows_insertion() {
    let mut a = ArrayValue::new();
    a.set("b", 1);
    a.append(2).unwrap();
    a.set(-1, 3);
    a.set("a", 4);
    let keys: Vec<Key> = a.keys().cloned().collect();
    assert_eq!(keys, vec![skey("b"), ikey(0), ikey(-1), skey("a")]);
}

#[test]
fn overwrite_keeps_position() {
    let mut a = keyed!["x" => 1, "y" => 2];
    a.set("x", 10);
    assert_eq!(entries(&a), vec![(skey("x"), 10), (skey("y"), 2)]);
}

#[test]
fn remove_and_readd_moves_to_end() {
    let mut a = keyed!["x" => 1, "y" => 2, "z" => 3];
    a.remove("x");
    a.set("x", 1);
    assert_eq!(
        entries(&a),
        vec![(skey("y"), 2), (skey("z"), 3), (skey("x"), 1)]
    );
}

#[test]
fn remove_absent_key_is_noop() {
    let mut a = array![1];
    assert_eq!(a.remove("nope"), None);
    assert_eq!(a.remove(7), None);
    assert_eq!(a.count(), 1);
}

#[test]
fn heavy_churn_keeps_lookups_and_order() {
    init_test_logging();
    let mut a = ArrayValue::new();
    for i in 0..1000i64 {
        a.append(i).unwrap();
    }
    for i in 0..1000i64 {
        if i % 7 != 0 {
            a.remove(i);
        }
    }
    let expected: Vec<i64> = (0..1000).filter(|i| i % 7 == 0).collect();
    assert_eq!(a.values().copied().collect::<Vec<_>>(), expected);
    assert_eq!(a.get(994), Ok(&994));
    assert_eq!(a.count(), expected.len());
    assert_eq!(a.next_key(), Ok(1000));
}

#[test]
fn iteration_restarts() {
    let a = array![1, 2, 3];
    let first: i32 = a.values().sum();
    let second: i32 = (&a).into_iter().map(|(_, v)| v).sum();
    assert_eq!(first, second);
    assert_eq!(a.first(), Some((&ikey(0), &1)));
    assert_eq!(a.last(), Some((&ikey(2), &3)));
}

#[test]
fn clear_keeps_max_key() {
    let mut a = array![1, 2, 3];
    a.clear();
    assert!(a.is_empty());
    assert_eq!(a.append(9), Ok(3));
}

// =============================================================================
// keyed
// =============================================================================

#[test]
fn keyed_trailing_value_is_unkeyed() {
    let a = keyed!["x" => 1, "y" => 2, 99];
    assert_eq!(
        entries(&a),
        vec![(skey("x"), 1), (skey("y"), 2), (ikey(0), 99)]
    );
}

#[test]
fn keyed_trailing_follows_int_keys() {
    let a = keyed![4 => "four", "k" => "kay", "next"];
    assert_eq!(a.get(5), Ok(&"next"));
}

#[test]
fn keyed_duplicate_keeps_first_position_last_value() {
    let a = keyed!["a" => 1, "b" => 2, "a" => 3];
    assert_eq!(entries(&a), vec![(skey("a"), 3), (skey("b"), 2)]);
}

#[test]
fn keyed_function_matches_macro() {
    let from_fn = ArrayValue::keyed([("x", 1), ("y", 2)], Some(99));
    assert_eq!(from_fn, keyed!["x" => 1, "y" => 2, 99]);
    assert_eq!(ArrayValue::<i32>::keyed(Vec::<(&str, i32)>::new(), None).count(), 0);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn capacity_is_only_a_hint() {
    let mut a = ArrayValue::with_capacity(1, 1);
    for i in 0..10 {
        a.append(i).unwrap();
    }
    a.set("s", 10);
    a.set("t", 11);
    assert_eq!(a.count(), 12);
}

#[test]
fn from_slice_and_window() {
    let source = [5, 6, 7, 8];
    assert_eq!(
        entries(&ArrayValue::from_slice(&source)),
        vec![(ikey(0), 5), (ikey(1), 6), (ikey(2), 7), (ikey(3), 8)]
    );
    assert_eq!(
        entries(&ArrayValue::from_slice_window(&source, 2, 2).unwrap()),
        vec![(ikey(0), 7), (ikey(1), 8)]
    );
    assert!(ArrayValue::from_slice_window(&source, 4, 0).unwrap().is_empty());
    assert_eq!(
        ArrayValue::from_slice_window(&source, 2, 3).unwrap_err(),
        Error::WindowOutOfBounds {
            start: 2,
            len: 3,
            available: 4
        }
    );
}

#[test]
fn filtered_construction_excludes_or_keeps() {
    let source = [1, 0, 2, 0, 3, 0];
    let skip_zeros = ArrayValue::from_slice_filtered(&source, 0, 6, |v| *v != 0).unwrap();
    assert_eq!(skip_zeros.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(skip_zeros.next_key(), Ok(3));

    let only_zeros = ArrayValue::from_slice_filtered(&source, 1, 4, |v| *v == 0).unwrap();
    assert_eq!(entries(&only_zeros), vec![(ikey(0), 0), (ikey(1), 0)]);
}

#[test]
fn from_iterable_appends_in_order() {
    let a = ArrayValue::from_iterable(Some("abc".chars()));
    assert_eq!(
        entries(&a),
        vec![(ikey(0), 'a'), (ikey(1), 'b'), (ikey(2), 'c')]
    );

    let none = ArrayValue::<char>::from_iterable(None::<Vec<char>>);
    assert!(none.is_empty());
    assert_eq!(none.next_key(), Ok(0));

    let collected: ArrayValue<u8> = (1..=3).collect();
    assert_eq!(collected, array![1, 2, 3]);
}

#[test]
fn extend_appends() {
    let mut a = keyed!["k" => 0];
    a.extend([1, 2]);
    assert_eq!(entries(&a), vec![(skey("k"), 0), (ikey(0), 1), (ikey(1), 2)]);
}

#[test]
fn values_are_shared_not_deep_copied() {
    let boxed = Rc::new(String::from("payload"));
    let a = ArrayValue::from_slice(&[Rc::clone(&boxed)]);
    let mut b = a.clone_alias();
    b.set("other", Rc::new(String::new()));

    assert!(Rc::ptr_eq(a.get(0).unwrap(), b.get(0).unwrap()));
    assert_eq!(Rc::strong_count(&boxed), 3);
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn five_entries_coerce_to_five() {
    let a = array![1, 2, 3, 4, 5];
    assert_eq!(a.to_double(), 5.0);
    assert_eq!(a.to_long(), 5);
    assert!(a.to_boolean());
}

#[test]
fn empty_array_coercions() {
    let a: ArrayValue<()> = ArrayValue::new();
    assert!(!a.to_boolean());
    assert_eq!(a.to_text().as_str(), "Array");
    assert_eq!(a.to_string(), "Array");
}

#[test]
fn boolean_tracks_count() {
    let mut a = ArrayValue::new();
    assert!(!a.to_boolean());
    a.set("only", 1);
    assert!(a.to_boolean());
    a.remove("only");
    assert!(!a.to_boolean());
}
