//! Named operations dispatched against a node.
//!
//! An [`ExtensionRegistry`] maps operation names to functions that receive
//! the requesting [`Node`] and positional arguments. A node resolves names
//! through the registry it was constructed with; there is no process-wide
//! instance.
//!
//! ```
//! use std::rc::Rc;
//! use livetree::{Container, ExtensionRegistry, Item, Node, Value};
//!
//! let mut registry = ExtensionRegistry::with_builtins();
//! registry.register("size", |node: &Node, _args: &[Value]| Ok(Item::Value(node.len().into())));
//!
//! let node = Node::with_registry(Container::new(), Rc::new(registry));
//! node.set("a", 1);
//! assert_eq!(node.invoke("size", &[]).unwrap(), 1);
//! ```

use std::{collections::HashMap, fmt, rc::Rc};

use crate::{Error, Result, node::{Item, Node}, value::Value};

mod builtins;

/// Signature of a registered extension.
pub type ExtensionFn = dyn Fn(&Node, &[Value]) -> Result<Item>;

/// Lookup from operation name to extension function.
#[derive(Clone)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Rc<ExtensionFn>>,
}

impl ExtensionRegistry {
    /// Creates a registry with no operations.
    pub fn new() -> Self {
        Self {
            extensions: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in array operations:
    /// `merge`, `reverse`, `values`, `shift`, `unshift` and `push`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }

    /// Registers `f` under `name`, returning true if it replaced an existing entry.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> bool
    where
        F: Fn(&Node, &[Value]) -> Result<Item> + 'static,
    {
        self.extensions.insert(name.into(), Rc::new(f)).is_some()
    }

    /// Removes the operation registered under `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.extensions.remove(name).is_some()
    }

    /// Returns true if an operation is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Returns the registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the operation `name` against `node`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownOperation`] if nothing is registered under
    /// `name`; otherwise whatever the operation itself returns.
    pub fn execute(&self, name: &str, node: &Node, args: &[Value]) -> Result<Item> {
        let Some(extension) = self.extensions.get(name) else {
            return Err(Error::UnknownOperation {
                name: name.to_string(),
            });
        };
        tracing::trace!(operation = name, path = node.path(), "Dispatching extension");
        extension(node, args)
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("names", &self.names())
            .finish()
    }
}
