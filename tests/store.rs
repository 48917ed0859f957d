
use self::test_utils::*;
use statebind::*;

const TODOS: Field<Vec<String>> = Field::new("todos");
const FILTER: Field<String> = Field::new("filter");

#[test]
fn every_write_is_delivered_once() {
    let store = Store::new();
    let r = record(&store, "n");

    store.set("n", 1);
    store.set("n", 1);
    store.set("other", 5);
    store.set("n", 2);

    assert_eq!(
        r.finish(),
        vec![Some(Value::Int(1)), Some(Value::Int(1)), Some(Value::Int(2))]
    );
}

#[test]
fn counter_scenario() {
    let store = Store::with_initial([("count", 0)]);
    let r = record(&store, "count");

    store.inc("count").unwrap();
    assert_eq!(store.get("count"), Some(Value::Int(1)));
    store.dec("count").unwrap();
    store.dec("count").unwrap();
    assert_eq!(store.get("count"), Some(Value::Int(-1)));
    store.reset("count");
    assert_eq!(store.get("count"), Some(Value::Int(0)));

    assert_eq!(
        r.finish(),
        vec![
            Some(Value::Int(1)),
            Some(Value::Int(0)),
            Some(Value::Int(-1)),
            Some(Value::Int(0)),
        ]
    );
}

#[test]
fn independent_stores() {
    let a = Store::with_initial([("n", 1)]);
    let b = Store::with_initial([("n", 1)]);
    let r = record(&b, "n");

    a.inc("n").unwrap();
    assert_eq!(a.get("n"), Some(Value::Int(2)));
    assert_eq!(b.get("n"), Some(Value::Int(1)));
    assert!(r.finish().is_empty());
}

#[test]
fn todo_list() {
    let store: Store = serde_json::from_str(r#"{"todos": [], "filter": "all"}"#).unwrap();
    let mut list = Component::new();
    let mut header = Component::new();

    let render_list = |c: &mut Component| c.render(|cx| store.use_field(cx, &TODOS));
    let render_header = |c: &mut Component| c.render(|cx| store.use_field(cx, &FILTER));

    assert_eq!(render_list(&mut list), Ok(Some(vec![])));
    assert_eq!(render_header(&mut header), Ok(Some("all".to_string())));

    store.push("todos", "water plants").unwrap();
    store.push("todos", "buy milk").unwrap();
    assert!(list.is_dirty());
    assert!(!header.is_dirty());

    assert_eq!(
        render_list(&mut list),
        Ok(Some(vec!["water plants".to_string(), "buy milk".to_string()]))
    );

    store.remove_where("todos", |t| t.as_str() == Some("water plants"));
    store.set_field(&FILTER, "done".to_string());
    assert!(list.is_dirty());
    assert!(header.is_dirty());
    assert_eq!(
        render_list(&mut list),
        Ok(Some(vec!["buy milk".to_string()]))
    );

    store.remove_at("todos", 7);
    assert!(!list.is_dirty());
    assert_eq!(store.get_field(&TODOS), Ok(Some(vec!["buy milk".to_string()])));

    store.reset_all();
    assert_eq!(render_list(&mut list), Ok(Some(vec![])));
    assert_eq!(render_header(&mut header), Ok(Some("all".to_string())));

    drop(list);
    drop(header);
    assert_eq!(store.listener_count("todos"), 0);
    assert_eq!(store.listener_count("filter"), 0);
}

#[test]
fn snapshot_round_trip() {
    let store = Store::with_initial([("a", Value::array([1, 2])), ("b", Value::from("x"))]);
    store.set("c", true);

    let json = serde_json::to_string(&store).unwrap();
    let restored: Store = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.snapshot(), store.snapshot());
}
