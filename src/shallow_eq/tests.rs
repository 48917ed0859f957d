use rstest::rstest;

use crate::{shallow_eq, Value};

#[test]
fn equal_flat_arrays() {
    assert!(shallow_eq(&Value::array([1, 2]), &Value::array([1, 2])));
}

#[test]
fn nested_arrays_compare_by_reference() {
    let a = Value::array([Value::Int(1), Value::array([2])]);
    let b = Value::array([Value::Int(1), Value::array([2])]);
    assert!(!shallow_eq(&a, &b));

    let inner = Value::array([2]);
    let a = Value::array([Value::Int(1), inner.clone()]);
    let b = Value::array([Value::Int(1), inner]);
    assert!(shallow_eq(&a, &b));
}

#[test]
fn object_key_order_is_irrelevant() {
    let a = Value::object([("a", 1), ("b", 2)]);
    let b = Value::object([("b", 2), ("a", 1)]);
    assert!(shallow_eq(&a, &b));
}

#[test]
fn objects_with_different_key_counts() {
    let a = Value::object([("a", 1)]);
    let b = Value::object([("a", 1), ("b", 2)]);
    assert!(!shallow_eq(&a, &b));
    assert!(!shallow_eq(&b, &a));
}

#[test]
fn objects_with_same_count_different_keys() {
    let a = Value::object([("a", 1)]);
    let b = Value::object([("b", 1)]);
    assert!(!shallow_eq(&a, &b));
}

#[test]
fn nested_objects_compare_by_reference() {
    let a = Value::object([("inner", Value::object([("x", 1)]))]);
    let b = Value::object([("inner", Value::object([("x", 1)]))]);
    assert!(!shallow_eq(&a, &b));
}

#[test]
fn absent_markers() {
    let none: Option<&Value> = None;
    assert!(shallow_eq(&none, &None));
    assert!(!shallow_eq(&none, &Some(&Value::Null)));
    assert!(!shallow_eq(&Some(&Value::Int(0)), &none));
}

#[rstest]
#[case(Value::Int(1), Value::Int(1), true)]
#[case(Value::Int(1), Value::Int(2), false)]
#[case(Value::from("a"), Value::from("a"), true)]
#[case(Value::Null, Value::Null, true)]
#[case(Value::Int(1), Value::array([1]), false)]
#[case(Value::array([1]), Value::Int(1), false)]
#[case(Value::array(Vec::<Value>::new()), Value::object(Vec::<(String, Value)>::new()), false)]
#[case(Value::array([1, 2]), Value::array([1]), false)]
#[case(Value::Float(f64::NAN), Value::Float(f64::NAN), false)]
fn cases(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
    assert_eq!(shallow_eq(&a, &b), expected);
}
