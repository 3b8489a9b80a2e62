//! Built-in array operations.
//!
//! Index keys behave like array positions: operations that reorder or
//! splice entries renumber them from `0`, while name keys keep their names.

use crate::{
    Error, Result,
    container::Container,
    node::{Item, Node},
    path::Key,
    value::Value,
};

use super::ExtensionRegistry;

pub(super) fn register_all(registry: &mut ExtensionRegistry) {
    registry.register("merge", merge);
    registry.register("reverse", reverse);
    registry.register("values", values);
    registry.register("shift", shift);
    registry.register("unshift", unshift);
    registry.register("push", push);
}

/// Merges container arguments into the node.
///
/// Later name keys overwrite earlier ones; index entries are appended.
fn merge(node: &Node, args: &[Value]) -> Result<Item> {
    let sources = args
        .iter()
        .map(|arg| {
            arg.as_container().cloned().ok_or_else(|| Error::OperationFailed {
                name: "merge".to_string(),
            })
        })
        .collect::<Result<Vec<Container>>>()?;

    let storage = node.to_container();
    storage.renumber();
    for source in sources {
        for (key, value) in source.entries() {
            match key {
                Key::Index(_) => {
                    storage.append(value).map_err(|_| Error::OperationFailed {
                        name: "merge".to_string(),
                    })?;
                }
                named => {
                    storage.insert(named, value);
                }
            }
        }
    }
    Ok(Item::Node(node.clone()))
}

fn reverse(node: &Node, _args: &[Value]) -> Result<Item> {
    let storage = node.to_container();
    let mut entries = storage.entries();
    entries.reverse();
    storage.replace_entries(entries);
    storage.renumber();
    Ok(Item::Node(node.clone()))
}

fn values(node: &Node, _args: &[Value]) -> Result<Item> {
    let storage = node.to_container();
    let values = storage.values();
    storage.replace_entries(
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (Key::from(i), value)),
    );
    Ok(Item::Node(node.clone()))
}

/// Removes and returns the first value, or null if the node is empty.
fn shift(node: &Node, _args: &[Value]) -> Result<Item> {
    let storage = node.to_container();
    let Some(first) = storage.first_key() else {
        return Ok(Item::Value(Value::Null));
    };
    let value = storage.remove(&first).unwrap_or(Value::Null);
    storage.renumber();
    Ok(Item::Value(value))
}

/// Prepends the arguments in order and returns the new entry count.
fn unshift(node: &Node, args: &[Value]) -> Result<Item> {
    let storage = node.to_container();
    let existing = storage.entries();

    let mut next = 0u64;
    let mut entries = Vec::with_capacity(args.len() + existing.len());
    for value in args {
        entries.push((Key::Index(next), value.deep_copy()));
        next += 1;
    }
    for (key, value) in existing {
        match key {
            Key::Index(_) => {
                entries.push((Key::Index(next), value));
                next += 1;
            }
            named => entries.push((named, value)),
        }
    }
    storage.replace_entries(entries);
    Ok(Item::Value(Value::from(storage.len())))
}

/// Appends the arguments and returns the new entry count.
///
/// Fails without writing anything if the largest index is already taken.
fn push(node: &Node, args: &[Value]) -> Result<Item> {
    let storage = node.to_container();
    let largest = storage.keys().iter().filter_map(Key::as_index).max();
    if largest.is_some_and(|max| max.checked_add(args.len() as u64).is_none()) {
        return Err(Error::OperationFailed {
            name: "push".to_string(),
        });
    }
    for value in args {
        storage.append(value.clone()).map_err(|_| Error::OperationFailed {
            name: "push".to_string(),
        })?;
    }
    Ok(Item::Value(Value::from(storage.len())))
}
