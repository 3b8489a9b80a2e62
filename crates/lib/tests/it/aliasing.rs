//! Views sharing storage, and copies that do not.

use livetree::{Container, Key, Node};
use serde_json::json;

use crate::helpers::{assert_json, expect_node, node_from_json, root_with_storage};

#[test]
fn test_root_aliases_caller_storage() {
    let (root, storage) = root_with_storage(r#"{"a": 1}"#);

    root.set("b", 2);
    assert_eq!(storage.get(&Key::from("b")).unwrap(), 2);

    storage.insert("c", 3);
    assert_eq!(root.get("c").unwrap(), 3);
}

#[test]
fn test_child_writes_visible_through_root() {
    let root = node_from_json(r#"{"user": {"profile": {"name": "Alice"}}}"#);

    let profile = expect_node(root.get("user.profile").unwrap());
    profile.set("name", "Bob");
    profile.set("age", 30);

    assert_eq!(root.get("user.profile.name").unwrap(), "Bob");
    assert_eq!(root.get("user.profile.age").unwrap(), 30);
}

#[test]
fn test_root_writes_visible_through_child() {
    let root = node_from_json(r#"{"user": {"name": "Alice"}}"#);
    let user = expect_node(root.get("user").unwrap());

    root.set("user.name", "Carol");
    root.del("user.missing");
    root.set("user.email", "carol@example.com");

    assert_eq!(user.get("name").unwrap(), "Carol");
    assert!(user.key_exists("email"));
}

#[test]
fn test_deletes_visible_across_views() {
    let root = node_from_json(r#"{"a": {"b": {"c": 1, "d": 2}}}"#);
    let b = expect_node(root.get("a.b").unwrap());

    b.del("c");
    assert!(!root.is_path("a.b.c"));

    root.del("a.b.d");
    assert!(b.is_empty());
}

#[test]
fn test_repeated_navigation_yields_views_of_same_storage() {
    let root = node_from_json(r#"{"a": {"b": 1}}"#);

    let first = expect_node(root.get("a").unwrap());
    let second = expect_node(root.get("a").unwrap());

    assert!(first.to_container().ptr_eq(&second.to_container()));
    assert_eq!(first, second);

    first.set("b", 2);
    assert_eq!(second.get("b").unwrap(), 2);
}

#[test]
fn test_grandchild_writes_visible_everywhere() {
    let root = node_from_json(r#"{"a": {"b": {"c": {}}}}"#);
    let a = expect_node(root.get("a").unwrap());
    let c = expect_node(a.get("b.c").unwrap());

    assert_eq!(c.path(), "a.b.c");
    c.set("deep", true);

    assert_eq!(root.get("a.b.c.deep").unwrap(), true);
    assert_eq!(a.get("b.c.deep").unwrap(), true);
}

#[test]
fn test_vivified_branch_is_shared() {
    let root = Node::new(Container::new());

    let branch = expect_node(root.get_or("config", Container::new()));
    branch.set("port", 8080);

    assert_json(&root, json!({"config": {"port": 8080}}));
}

#[test]
fn test_stored_container_is_a_copy() {
    let root = Node::new(Container::new());
    let external: Container = [("x", 1)].into_iter().collect();

    root.set("box", external.clone());
    external.insert("x", 2);

    assert_eq!(root.get("box.x").unwrap(), 1);
}

#[test]
fn test_copy_severs_aliasing() {
    let root = node_from_json(r#"{"a": {"b": 1}}"#);

    let copy = root.copy();
    assert!(copy.is_root());
    assert_eq!(copy.path(), "");

    copy.set("a.b", 2);
    root.set("a.c", 3);

    assert_json(&root, json!({"a": {"b": 1, "c": 3}}));
    assert_json(&copy, json!({"a": {"b": 2}}));
}

#[test]
fn test_detach_child_severs_aliasing() {
    let root = node_from_json(r#"{"a": {"b": 1}}"#);
    let child = expect_node(root.get("a").unwrap());

    let detached = child.detach();
    assert!(detached.is_root());
    assert!(detached.parent().is_none());

    detached.set("b", 99);
    assert_eq!(root.get("a.b").unwrap(), 1);
    assert_eq!(child.get("b").unwrap(), 1);
}

#[test]
fn test_detach_root_keeps_storage() {
    let (root, storage) = root_with_storage(r#"{"a": 1}"#);

    let detached = root.detach();
    detached.set("a", 2);

    assert_eq!(storage.get(&Key::from("a")).unwrap(), 2);
}

#[test]
fn test_entries_snapshot_does_not_alias() {
    let root = node_from_json(r#"{"a": {"b": 1}}"#);

    let entries = root.entries();
    let (_, value) = &entries[0];
    value.as_container().unwrap().insert("b", 2);

    assert_eq!(root.get("a.b").unwrap(), 1);
}

#[test]
fn test_to_container_of_child_aliases() {
    let root = node_from_json(r#"{"a": {}}"#);
    let child = expect_node(root.get("a").unwrap());

    child.to_container().insert("k", "v");
    assert_eq!(root.get("a.k").unwrap(), "v");
}
