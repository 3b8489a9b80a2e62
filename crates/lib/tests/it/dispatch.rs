//! Stored callables and registry extensions.

use std::rc::Rc;

use livetree::{Callable, Container, Error, ExtensionRegistry, Item, Key, Node, Value};

use crate::helpers::{expect_node, node_from_json};

fn counter() -> Callable {
    Callable::new(|storage: &Container, args: &[Value]| {
        let step = args.first().and_then(Value::as_int).unwrap_or(1);
        let current = storage
            .get(&Key::from("count"))
            .and_then(|value| value.as_int())
            .unwrap_or(0);
        storage.insert("count", current + step);
        Ok(Value::Int(current + step))
    })
}

// ===== STORED CALLABLES =====

#[test]
fn test_invoke_stored_receives_live_storage() {
    let root = Node::new(Container::new());
    root.set("bump", counter());

    assert_eq!(root.invoke_stored("bump", &[]).unwrap(), 1);
    assert_eq!(root.invoke_stored("bump", &[Value::from(5)]).unwrap(), 6);
    assert_eq!(root.get("count").unwrap(), 6);
}

#[test]
fn test_invoke_stored_on_child() {
    let root = node_from_json(r#"{"stats": {}}"#);
    let stats = expect_node(root.get("stats").unwrap());
    stats.set("bump", counter());

    stats.invoke_stored("bump", &[]).unwrap();

    assert_eq!(root.get("stats.count").unwrap(), 1);
}

#[test]
fn test_invoke_stored_absent_name() {
    let root = Node::new(Container::new());
    let err = root.invoke_stored("nothing", &[]).unwrap_err();
    assert!(err.is_unknown_operation());
    assert_eq!(err.operation(), Some("nothing"));
}

#[test]
fn test_invoke_stored_non_callable() {
    let root = node_from_json(r#"{"value": 42}"#);
    let err = root.invoke_stored("value", &[]).unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { .. }));
}

#[test]
fn test_invoke_stored_does_not_parse_paths() {
    let root = Node::new(Container::new());
    root.set("nested.bump", counter());

    let err = root.invoke_stored("nested.bump", &[]).unwrap_err();
    assert!(err.is_unknown_operation());
}

#[test]
fn test_invoke_stored_failure_is_normalized() {
    let root = Node::new(Container::new());
    root.set(
        "fail",
        Callable::new(|_: &Container, _: &[Value]| Err("boom".into())),
    );

    let err = root.invoke_stored("fail", &[]).unwrap_err();
    assert!(err.is_operation_failed());
    assert!(!err.is_unknown_operation());
    assert_eq!(err.operation(), Some("fail"));
}

// ===== EXTENSIONS =====

#[test]
fn test_unknown_extension() {
    let root = Node::new(Container::new());

    let err = root.invoke("definitelyUnknown", &[]).unwrap_err();

    assert!(err.is_unknown_operation());
    assert!(!err.is_missing_path());
    assert!(!err.is_operation_failed());
}

#[test]
fn test_custom_extension_receives_node() {
    let mut registry = ExtensionRegistry::new();
    registry.register("describe", |node: &Node, args: &[Value]| {
        Ok(Item::Value(Value::from(format!(
            "{}:{}:{}",
            node.path(),
            node.len(),
            args.len()
        ))))
    });
    let root = Node::with_registry(
        Container::from_json_str(r#"{"a": {"x": 1, "y": 2}}"#).unwrap(),
        Rc::new(registry),
    );

    let a = expect_node(root.get("a").unwrap());
    assert_eq!(a.invoke("describe", &[Value::Null]).unwrap(), "a:2:1");
}

#[test]
fn test_extension_errors_pass_through() {
    let mut registry = ExtensionRegistry::new();
    registry.register("strict", |node: &Node, _: &[Value]| {
        node.get("required").map(|_| Item::Value(Value::Null))
    });
    let root = Node::with_registry(Container::new(), Rc::new(registry));

    let err = root.invoke("strict", &[]).unwrap_err();
    assert!(err.is_missing_path());
}

#[test]
fn test_registry_shared_with_children() {
    let mut registry = ExtensionRegistry::new();
    registry.register("ping", |_: &Node, _: &[Value]| Ok(Item::Value("pong".into())));
    let registry = Rc::new(registry);

    let root = Node::with_registry(
        Container::from_json_str(r#"{"a": {"b": {}}}"#).unwrap(),
        Rc::clone(&registry),
    );
    let b = expect_node(root.get("a.b").unwrap());

    assert!(Rc::ptr_eq(b.registry(), &registry));
    assert_eq!(b.invoke("ping", &[]).unwrap(), "pong");
}

#[test]
fn test_empty_registry_has_no_builtins() {
    let root = Node::with_registry(Container::new(), Rc::new(ExtensionRegistry::new()));
    assert!(root.invoke("push", &[]).unwrap_err().is_unknown_operation());
}

#[test]
fn test_default_registry_has_builtins() {
    let registry = ExtensionRegistry::default();
    assert_eq!(
        registry.names(),
        vec!["merge", "push", "reverse", "shift", "unshift", "values"]
    );
}

#[test]
fn test_register_replace_and_unregister() {
    let mut registry = ExtensionRegistry::new();
    assert!(!registry.register("op", |_: &Node, _: &[Value]| Ok(Item::Value(Value::Int(1)))));
    assert!(registry.register("op", |_: &Node, _: &[Value]| Ok(Item::Value(Value::Int(2)))));

    let root = Node::with_registry(Container::new(), Rc::new(registry.clone()));
    assert_eq!(root.invoke("op", &[]).unwrap(), 2);

    assert!(registry.unregister("op"));
    assert!(!registry.contains("op"));
    assert!(!registry.unregister("op"));
}

#[test]
fn test_separate_registries_are_independent() {
    let mut custom = ExtensionRegistry::new();
    custom.register("only_here", |_: &Node, _: &[Value]| Ok(Item::Value(Value::Null)));

    let with_custom = Node::with_registry(Container::new(), Rc::new(custom));
    let plain = Node::new(Container::new());

    assert!(with_custom.invoke("only_here", &[]).is_ok());
    assert!(plain.invoke("only_here", &[]).unwrap_err().is_unknown_operation());
}
