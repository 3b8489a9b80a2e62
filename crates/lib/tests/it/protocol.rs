//! Counting, iteration and indexed access.

use livetree::{Container, CountMode, Error, Item, Key, Node, Value};
use serde_json::json;

use crate::helpers::{assert_json, expect_node, node_from_json};

#[test]
fn test_len_and_count() {
    let root = node_from_json(r#"{"a": 1, "b": {"c": 2, "d": {"e": 3}}}"#);

    assert_eq!(root.len(), 2);
    assert!(!root.is_empty());
    assert_eq!(root.count(CountMode::Normal), 2);
    // a, b, c, d, e
    assert_eq!(root.count(CountMode::Recursive), 5);

    let b = expect_node(root.get("b").unwrap());
    assert_eq!(b.count(CountMode::Recursive), 3);
}

#[test]
fn test_count_empty() {
    let root = Node::new(Container::new());
    assert!(root.is_empty());
    assert_eq!(root.count(CountMode::Recursive), 0);
}

#[test]
fn test_keys_in_insertion_order() {
    let root = Node::new(Container::new());
    root.set("z", 1);
    root.set("a", 2);
    root.set("0", 3);

    assert_eq!(
        root.keys(),
        vec![Key::from("z"), Key::from("a"), Key::Index(0)]
    );
}

#[test]
fn test_iter_yields_live_views() {
    let root = node_from_json(r#"{"scalar": 1, "nested": {"k": "v"}}"#);

    let items: Vec<(Key, Item)> = root.iter().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].1, 1);

    let nested = items[1].1.as_node().unwrap();
    assert_eq!(nested.path(), "nested");
    nested.set("k", "changed");

    assert_eq!(root.get("nested.k").unwrap(), "changed");
}

#[test]
fn test_iter_child_paths() {
    let root = node_from_json(r#"{"outer": {"inner": {}}}"#);
    let outer = expect_node(root.get("outer").unwrap());

    let paths: Vec<String> = outer
        .iter()
        .filter_map(|(_, item)| item.into_node())
        .map(|node| node.path().to_string())
        .collect();

    assert_eq!(paths, vec!["outer.inner"]);
}

#[test]
fn test_for_loop_over_node() {
    let root = node_from_json(r#"[10, 20, 30]"#);

    let mut total = 0;
    for (key, item) in &root {
        assert!(key.is_index());
        total += item.into_value().as_int().unwrap();
    }
    assert_eq!(total, 60);
}

#[test]
fn test_iteration_tolerates_mutation() {
    let root = node_from_json(r#"{"a": 1, "b": 2}"#);

    for (key, _) in &root {
        root.unset_index(&key);
    }

    assert!(root.is_empty());
}

#[test]
fn test_index_read() {
    let root = node_from_json(r#"{"list": ["x", {"y": 1}]}"#);
    let list = expect_node(root.get("list").unwrap());

    assert_eq!(list.index(Some(Key::Index(0))).unwrap(), "x");

    let second = expect_node(list.index(Some(Key::Index(1))).unwrap());
    assert_eq!(second.path(), "list.1");

    let err = list.index(Some(Key::Index(5))).unwrap_err();
    assert!(err.is_missing_path());
}

#[test]
fn test_index_append_returns_live_view() {
    let root = node_from_json(r#"{"rows": [{"id": 1}]}"#);
    let rows = expect_node(root.get("rows").unwrap());

    let row = expect_node(rows.index(None).unwrap());
    row.set("id", 2);

    assert_eq!(row.path(), "rows.1");
    assert_json(&root, json!({"rows": [{"id": 1}, {"id": 2}]}));
}

#[test]
fn test_index_append_on_empty() {
    let root = Node::new(Container::new());

    let first = expect_node(root.index(None).unwrap());
    first.set("name", "a");

    assert_eq!(root.keys(), vec![Key::Index(0)]);
    assert_eq!(root.get("0.name").unwrap(), "a");
}

#[test]
fn test_set_index() {
    let root = Node::new(Container::new());

    assert_eq!(root.set_index(None, "a").unwrap(), Key::Index(0));
    assert_eq!(root.set_index(None, "b").unwrap(), Key::Index(1));
    assert_eq!(
        root.set_index(Some(Key::from("name")), "c").unwrap(),
        Key::from("name")
    );
    assert_eq!(root.set_index(Some(Key::Index(0)), "A").unwrap(), Key::Index(0));

    assert_json(&root, json!({"0": "A", "1": "b", "name": "c"}));
}

#[test]
fn test_set_index_does_not_parse_paths() {
    let root = Node::new(Container::new());
    root.set_index(Some(Key::from("a.b")), 1).unwrap();

    assert!(root.key_exists("a.b"));
    assert!(!root.is_path("a"));
}

#[test]
fn test_unset_and_has_index() {
    let root = node_from_json(r#"{"a": 1, "n": null}"#);

    assert!(root.has_index(&Key::from("a")));
    assert!(!root.has_index(&Key::from("n")));
    assert!(!root.has_index(&Key::from("missing")));

    root.unset_index(&Key::from("a"));
    root.unset_index(&Key::from("missing"));

    assert!(!root.has_index(&Key::from("a")));
    assert_eq!(root.len(), 1);
}

#[test]
fn test_entries_are_plain_values() {
    let root = node_from_json(r#"{"a": 1, "b": [true]}"#);

    let entries = root.entries();

    assert_eq!(entries[0], (Key::from("a"), Value::Int(1)));
    assert!(entries[1].1.is_container());
}

#[test]
fn test_append_after_largest_index_fails() {
    let root = node_from_json(r#"{"list": {"0": "keep", "18446744073709551615": "max"}}"#);
    let list = expect_node(root.get("list").unwrap());

    let err = list.set_index(None, "new").unwrap_err();
    assert!(matches!(err, Error::IndexExhausted { .. }));
    assert_eq!(err.path(), Some("list"));

    assert!(list.index(None).is_err());

    // Nothing was overwritten or added
    assert_eq!(list.len(), 2);
    assert_eq!(root.get("list.0").unwrap(), "keep");
    assert_eq!(root.get("list.18446744073709551615").unwrap(), "max");
}
