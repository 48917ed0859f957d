use assert_call::{call, CallRecorder};

use crate::{Binding, Store, Value};

#[test]
fn captures_initial_value() {
    let store = Store::with_initial([("a", 1)]);
    let b = Binding::new(&store, "a", || {});
    assert_eq!(b.cached(), Some(Value::Int(1)));
    assert_eq!(b.get(), Some(Value::Int(1)));
    assert_eq!(b.key(), "a");
}

#[test]
fn change_triggers_render() {
    let mut cr = CallRecorder::new();
    let store = Store::with_initial([("a", 1)]);
    let b = Binding::new(&store, "a", || call!("render"));

    store.set("a", 2);
    cr.verify("render");
    assert_eq!(b.cached(), Some(Value::Int(2)));
}

#[test]
fn same_primitive_is_suppressed() {
    let mut cr = CallRecorder::new();
    let store = Store::with_initial([("a", 1)]);
    let _b = Binding::new(&store, "a", || call!("render"));

    store.set("a", 1);
    cr.verify(());
}

#[test]
fn shallow_equal_object_is_suppressed() {
    let mut cr = CallRecorder::new();
    let store = Store::with_initial([("o", Value::object([("a", 1)]))]);
    let b = Binding::new(&store, "o", || call!("render"));
    let cached = b.cached().unwrap();

    store.set("o", Value::object([("a", 1)]));
    cr.verify(());
    assert!(b.cached().unwrap().is_identical(&cached));

    store.set("o", Value::object([("a", 2)]));
    cr.verify("render");
    assert_eq!(b.cached(), Some(Value::object([("a", 2)])));
}

#[test]
fn nested_change_is_not_hidden_by_content() {
    let mut cr = CallRecorder::new();
    let store = Store::with_initial([("l", Value::array([Value::array([1])]))]);
    let _b = Binding::new(&store, "l", || call!("render"));

    store.set("l", Value::array([Value::array([1])]));
    cr.verify("render");
}

#[test]
fn absent_to_absent_is_suppressed() {
    let mut cr = CallRecorder::new();
    let store = Store::new();
    let b = Binding::new(&store, "missing", || call!("render"));
    assert_eq!(b.cached(), None);

    store.reset("missing");
    cr.verify(());

    store.set("missing", Value::Null);
    cr.verify("render");
}

#[test]
fn get_reads_live_value() {
    let store = Store::with_initial([("o", Value::object([("a", 1)]))]);
    let b = Binding::new(&store, "o", || {});
    let fresh = Value::object([("a", 1)]);
    store.set("o", fresh.clone());

    assert!(b.get().unwrap().is_identical(&fresh));
    assert!(!b.cached().unwrap().is_identical(&fresh));
}

#[test]
fn drop_removes_listener() {
    let mut cr = CallRecorder::new();
    let store = Store::new();
    let b = Binding::new(&store, "a", || call!("render"));
    assert_eq!(store.listener_count("a"), 1);

    drop(b);
    assert_eq!(store.listener_count("a"), 0);
    store.set("a", 1);
    cr.verify(());
}

#[test]
fn rebind_moves_listener() {
    let mut cr = CallRecorder::new();
    let store = Store::with_initial([("a", 1), ("b", 10)]);
    let mut b = Binding::new(&store, "a", || call!("render"));

    assert!(!b.rebind("a"));
    assert_eq!(store.listener_count("a"), 1);

    assert!(b.rebind("b"));
    assert_eq!(store.listener_count("a"), 0);
    assert_eq!(store.listener_count("b"), 1);
    assert_eq!(b.cached(), Some(Value::Int(10)));

    store.set("a", 2);
    cr.verify(());

    store.set("b", 10);
    cr.verify(());

    store.set("b", 11);
    cr.verify("render");
}

#[test]
fn on_change_may_write_to_store() {
    let mut cr = CallRecorder::new();
    let store = Store::new();
    let st = store.clone();
    let _b = Binding::new(&store, "a", move || {
        call!("render");
        st.set("renders", 1);
    });
    let _r = Binding::new(&store, "renders", || call!("renders changed"));

    store.set("a", 1);
    cr.verify(["render", "renders changed"]);
}
