//! Live, path-addressable views over container storage.
//!
//! A [`Node`] pairs a [`Container`] handle with the path it was reached by.
//! Navigation that lands on a nested container returns a new child node
//! aliasing that container, so writes through any view are visible through
//! every other view of the same location.
//!
//! # Variants
//!
//! - **Root**: built over a caller-supplied container. Its path is empty.
//! - **Child**: produced by navigation. Its parent link always points at the
//!   root of the navigation chain, so the chain stays flat no matter how deep
//!   the child sits.
//!
//! # Usage
//!
//! ```
//! use livetree::{Container, Node};
//!
//! let root = Node::new(Container::new());
//! root.set("user.profile.name", "Alice");
//!
//! let profile = root.get("user.profile").unwrap().into_node().unwrap();
//! profile.set("age", 30);
//!
//! assert_eq!(root.get("user.profile.age").unwrap(), 30);
//! assert_eq!(profile.path(), "user.profile");
//! ```

use std::{fmt, rc::Rc};

use serde::{Serialize, Serializer};

use crate::{
    Error, Result,
    config::Config,
    container::{Container, CountMode},
    extension::ExtensionRegistry,
    path::{Key, PathCodec},
    value::Value,
};


/// Result of navigating to a path.
///
/// Container values are returned as live [`Node`] views; anything else is
/// returned as a plain [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Node(Node),
    Value(Value),
}

impl Item {
    /// Returns true if this is a live view
    pub fn is_node(&self) -> bool {
        matches!(self, Item::Node(_))
    }

    /// Returns the view, if this is one
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Item::Node(node) => Some(node),
            Item::Value(_) => None,
        }
    }

    /// Converts into the view, if this is one
    pub fn into_node(self) -> Option<Node> {
        match self {
            Item::Node(node) => Some(node),
            Item::Value(_) => None,
        }
    }

    /// Returns the plain value, if this is one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Item::Value(value) => Some(value),
            Item::Node(_) => None,
        }
    }

    /// Converts into a value. A view becomes a handle to its live storage.
    pub fn into_value(self) -> Value {
        match self {
            Item::Node(node) => Value::Container(node.storage),
            Item::Value(value) => value,
        }
    }
}

impl PartialEq<Value> for Item {
    fn eq(&self, other: &Value) -> bool {
        match self {
            Item::Value(value) => value == other,
            Item::Node(node) => matches!(other, Value::Container(c) if *c == node.storage),
        }
    }
}

macro_rules! item_eq_scalar {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Item {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Item::Value(value) if value == other)
                }
            }
        )*
    };
}

item_eq_scalar!(i64, i32, f64, bool, &str, String);

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Item::Node(node) => node.serialize(serializer),
            Item::Value(value) => value.serialize(serializer),
        }
    }
}

#[derive(Clone)]
enum NodeKind {
    Root,
    Child { parent: Rc<Node> },
}

/// A live view over a location in container storage.
///
/// All operations act directly on the shared storage. Cloning a `Node` is
/// cheap and yields another view of the same location.
#[derive(Clone)]
pub struct Node {
    storage: Container,
    path: String,
    kind: NodeKind,
    config: Config,
    registry: Rc<ExtensionRegistry>,
}

impl Node {
    /// Creates a root view over `storage` with the default config and the
    /// built-in extensions.
    ///
    /// The container is not copied: the caller's handle and the node share
    /// the same data.
    pub fn new(storage: Container) -> Self {
        Self::with_config(
            storage,
            Config::default(),
            Rc::new(ExtensionRegistry::default()),
        )
    }

    /// Creates a root view resolving extensions through `registry`.
    pub fn with_registry(storage: Container, registry: Rc<ExtensionRegistry>) -> Self {
        Self::with_config(storage, Config::default(), registry)
    }

    /// Creates a root view with explicit config and registry.
    pub fn with_config(
        storage: Container,
        config: Config,
        registry: Rc<ExtensionRegistry>,
    ) -> Self {
        Self {
            storage,
            path: String::new(),
            kind: NodeKind::Root,
            config,
            registry,
        }
    }

    /// Parses a JSON document and wraps it in a root view.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(Container::from_json_str(json)?))
    }

    /// Path from the root to this view; empty for a root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this view was built directly over caller storage
    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    /// Returns the parent link, `None` for a root
    pub fn parent(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Root => None,
            NodeKind::Child { parent } => Some(parent),
        }
    }

    /// Returns the config shared along this navigation chain
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the extension registry shared along this navigation chain
    pub fn registry(&self) -> &Rc<ExtensionRegistry> {
        &self.registry
    }

    fn codec(&self) -> PathCodec {
        self.config.codec()
    }

    /// The node new descendants link to as their parent.
    ///
    /// A root anchors descendants to itself; a child hands out its own
    /// parent link, keeping every chain one level deep.
    pub fn child_anchor(&self) -> Rc<Node> {
        match &self.kind {
            NodeKind::Root => Rc::new(self.clone()),
            NodeKind::Child { parent } => Rc::clone(parent),
        }
    }

    fn child(&self, storage: Container, traversed: &str) -> Node {
        Node {
            storage,
            path: self.codec().join(&self.path, traversed),
            kind: NodeKind::Child {
                parent: self.child_anchor(),
            },
            config: self.config,
            registry: Rc::clone(&self.registry),
        }
    }

    fn wrap(&self, value: Value, traversed: &str) -> Item {
        match value {
            Value::Container(storage) => Item::Node(self.child(storage, traversed)),
            other => Item::Value(other),
        }
    }

    /// Follows `keys` from this node's storage. `None` if any step is vacant.
    fn walk(&self, keys: &[Key]) -> Option<Value> {
        let (last, intermediate) = keys.split_last()?;
        let mut current = self.storage.clone();
        for key in intermediate {
            current = current.get_container(key)?;
        }
        current.get(last).filter(|value| !value.is_null())
    }

    /// Reads the value at `path`.
    ///
    /// Nested containers come back as live child views; other values are
    /// returned directly. A null entry counts as missing.
    ///
    /// # Errors
    /// Returns [`Error::MissingPath`] if any segment of `path` is missing.
    pub fn get(&self, path: &str) -> Result<Item> {
        let keys = self.codec().parse(path);
        match self.walk(&keys) {
            Some(value) => Ok(self.wrap(value, path)),
            None => Err(Error::MissingPath {
                path: path.to_string(),
            }),
        }
    }

    /// Reads the value at `path`, writing `default` there first if the path
    /// is missing.
    ///
    /// A null `default` counts as no default: nothing is written and
    /// `Value::Null` is returned for a missing path.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Item {
        let keys = self.codec().parse(path);
        if let Some(value) = self.walk(&keys) {
            return self.wrap(value, path);
        }
        match default.into() {
            Value::Null => Item::Value(Value::Null),
            default => self.set(path, default),
        }
    }

    /// Reads the value at `path` without any side effects.
    ///
    /// Same as [`Node::get`]; paired with [`Node::get_only_or`].
    pub fn get_only(&self, path: &str) -> Result<Item> {
        self.get(path)
    }

    /// Reads the value at `path`, falling back to `default` if the path is
    /// missing. Storage is never modified, so a null `default` simply comes
    /// back as `Value::Null`.
    pub fn get_only_or(&self, path: &str, default: impl Into<Value>) -> Item {
        match self.get(path) {
            Ok(item) => item,
            Err(_) => Item::Value(default.into()),
        }
    }

    /// Reads and converts the value at `path`.
    ///
    /// Returns `None` if the path is missing or the value has another type.
    pub fn get_as<T>(&self, path: &str) -> Option<T>
    where
        T: for<'a> TryFrom<&'a Value, Error = Error>,
    {
        let value = self.get(path).ok()?.into_value();
        T::try_from(&value).ok()
    }

    /// Writes `value` at `path`, creating intermediate containers as needed.
    ///
    /// Any intermediate entry that is missing or not a container is replaced
    /// by a new empty container; the previous value is discarded. A container
    /// `value` is stored as a copy and the returned view aliases that copy.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Item {
        let value = value.into();
        let keys = self.codec().parse(path);
        let Some((last, intermediate)) = keys.split_last() else {
            return Item::Value(value);
        };

        let mut current = self.storage.clone();
        for key in intermediate {
            current = match current.get_container(key) {
                Some(child) => child,
                None => {
                    match current.get(key).filter(|v| !v.is_null()) {
                        Some(old) => tracing::debug!(
                            key = %key,
                            path,
                            discarded = old.type_name(),
                            "Replacing non-container value on write path"
                        ),
                        None => tracing::trace!(key = %key, path, "Creating intermediate container"),
                    }
                    current.vivify(key)
                }
            };
        }

        current.insert(last.clone(), value);
        let stored = current.get(last).unwrap_or(Value::Null);
        self.wrap(stored, path)
    }

    /// Removes the entry at `path`.
    ///
    /// Does nothing if any intermediate segment is missing or is not a
    /// container, or if the final key is absent. Returns `self` for chaining.
    pub fn del(&self, path: &str) -> &Self {
        let keys = self.codec().parse(path);
        let Some((last, intermediate)) = keys.split_last() else {
            return self;
        };

        let mut current = self.storage.clone();
        for key in intermediate {
            match current.get_container(key) {
                Some(child) => current = child,
                None => return self,
            }
        }
        current.remove(last);
        self
    }

    /// Returns true if [`Node::get`] would succeed for `path`.
    ///
    /// Never writes: no default is involved.
    pub fn is_path(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Returns true if this node's own storage has a non-null entry at `key`.
    ///
    /// No path parsing: `"a.b"` is looked up as a single key.
    pub fn key_exists(&self, key: impl Into<Key>) -> bool {
        self.storage.is_set(&key.into())
    }

    /// Returns the key of the last entry in insertion order.
    ///
    /// # Errors
    /// Returns [`Error::EmptyContainer`] if the storage has no entries.
    pub fn last_key(&self) -> Result<Key> {
        self.storage.last_key().ok_or_else(|| Error::EmptyContainer {
            path: self.path.clone(),
        })
    }

    /// Returns the live storage handle.
    ///
    /// Writes through the handle bypass path handling entirely.
    pub fn to_container(&self) -> Container {
        self.storage.clone()
    }

    /// Returns a new root over an independent copy of this node's storage.
    ///
    /// The copy keeps the config and registry but has an empty path and no
    /// parent.
    pub fn copy(&self) -> Node {
        tracing::trace!(path = %self.path, "Copying node storage");
        Node::with_config(
            self.storage.deep_copy(),
            self.config,
            Rc::clone(&self.registry),
        )
    }

    /// Returns a view that shares storage with no other view.
    ///
    /// A root is already independent and is returned as-is; a child is
    /// replaced by [`Node::copy`].
    pub fn detach(&self) -> Node {
        match self.kind {
            NodeKind::Root => self.clone(),
            NodeKind::Child { .. } => self.copy(),
        }
    }

    /// Invokes the callable stored under `name` in this node's storage.
    ///
    /// The callable receives the live storage followed by `args`.
    ///
    /// # Errors
    /// - [`Error::UnknownOperation`] if `name` is absent or not callable
    /// - [`Error::OperationFailed`] if the callable returns an error
    pub fn invoke_stored(&self, name: &str, args: &[Value]) -> Result<Value> {
        let callable = match self.storage.get(&Key::from(name)) {
            Some(Value::Callable(callable)) => callable,
            _ => {
                return Err(Error::UnknownOperation {
                    name: name.to_string(),
                });
            }
        };

        callable.call(&self.storage, args).map_err(|_| {
            tracing::debug!(operation = name, path = %self.path, "Stored callable failed");
            Error::OperationFailed {
                name: name.to_string(),
            }
        })
    }

    /// Runs the registered extension `name` against this node.
    ///
    /// # Errors
    /// Returns [`Error::UnknownOperation`] if the registry has no such
    /// operation, or the operation's own error.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Item> {
        self.registry.execute(name, self, args)
    }

    /// Number of direct entries
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the storage has no entries
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Counts entries according to `mode`
    pub fn count(&self, mode: CountMode) -> usize {
        self.storage.count(mode)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<Key> {
        self.storage.keys()
    }

    /// Snapshot of the entries; nested containers are copied.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.storage
            .entries()
            .into_iter()
            .map(|(key, value)| (key, value.deep_copy()))
            .collect()
    }

    /// Iterates the entries, yielding nested containers as live views.
    pub fn iter(&self) -> std::vec::IntoIter<(Key, Item)> {
        self.storage
            .entries()
            .into_iter()
            .map(|(key, value)| {
                let item = self.wrap(value, &key.to_string());
                (key, item)
            })
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Indexed read.
    ///
    /// With `None`, appends a new empty container under the next free index
    /// and returns a live view of it.
    ///
    /// # Errors
    /// - [`Error::MissingPath`] if `key` has no entry
    /// - [`Error::IndexExhausted`] if an append finds `u64::MAX` already in use
    pub fn index(&self, key: Option<Key>) -> Result<Item> {
        let key = match key {
            Some(key) => key,
            None => self.append(Container::new())?,
        };
        match self.storage.get(&key) {
            Some(value) => Ok(self.wrap(value, &key.to_string())),
            None => Err(Error::MissingPath {
                path: key.to_string(),
            }),
        }
    }

    /// Indexed write. With `None`, appends under the next free index.
    ///
    /// Returns the key that was written.
    ///
    /// # Errors
    /// Returns [`Error::IndexExhausted`] if an append finds `u64::MAX` already
    /// in use.
    pub fn set_index(&self, key: Option<Key>, value: impl Into<Value>) -> Result<Key> {
        match key {
            Some(key) => {
                self.storage.insert(key.clone(), value);
                Ok(key)
            }
            None => self.append(value),
        }
    }

    fn append(&self, value: impl Into<Value>) -> Result<Key> {
        self.storage.append(value).map_err(|_| Error::IndexExhausted {
            path: self.path.clone(),
        })
    }

    /// Indexed delete
    pub fn unset_index(&self, key: &Key) {
        self.storage.remove(key);
    }

    /// Indexed membership; a null entry counts as unset
    pub fn has_index(&self, key: &Key) -> bool {
        self.storage.is_set(key)
    }

    /// Converts the storage to JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.storage.to_json_value()
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (Key, Item);
    type IntoIter = std::vec::IntoIter<(Key, Item)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Views are equal when they have the same path and structurally equal storage.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.storage == other.storage
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("root", &self.is_root())
            .field("storage", &self.storage)
            .finish()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.storage.serialize(serializer)
    }
}
