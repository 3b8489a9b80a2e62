//! Shared, ordered storage for nested data.
//!
//! A [`Container`] is a handle to an insertion-ordered map from [`Key`] to
//! [`Value`]. Cloning the handle does not copy the data: every clone observes
//! the same mutations. [`Container::deep_copy`] is the only way to get
//! independent storage.
//!
//! Values written through [`Container::insert`] and [`Container::append`]
//! are stored as deep copies when they hold containers, matching assignment
//! semantics for nested data and keeping the storage graph acyclic.

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{Error, Result, path::Key, value::Value};

pub(crate) type Table = IndexMap<Key, Value>;

/// How [`Container::count`] treats nested containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountMode {
    /// Count direct entries only
    #[default]
    Normal,
    /// Count direct entries plus every entry of every nested container
    Recursive,
}

/// A shared handle to ordered key-value storage.
///
/// # Examples
///
/// ```
/// # use livetree::Container;
/// let storage = Container::new();
/// let alias = storage.clone();
///
/// alias.insert("name", "Alice");
/// assert_eq!(storage.get(&"name".into()).unwrap(), "Alice");
/// assert!(storage.ptr_eq(&alias));
///
/// let snapshot = storage.deep_copy();
/// storage.insert("name", "Bob");
/// assert_eq!(snapshot.get(&"name".into()).unwrap(), "Alice");
/// ```
#[derive(Clone, Default)]
pub struct Container {
    inner: Rc<RefCell<Table>>,
}

impl Container {
    /// Creates a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of direct entries
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns true if the container has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Counts entries, optionally descending into nested containers.
    pub fn count(&self, mode: CountMode) -> usize {
        let table = self.inner.borrow();
        match mode {
            CountMode::Normal => table.len(),
            CountMode::Recursive => table
                .values()
                .map(|value| match value {
                    Value::Container(child) => 1 + child.count(CountMode::Recursive),
                    _ => 1,
                })
                .sum(),
        }
    }

    /// Returns true if `key` has an entry, including a null one
    pub fn contains_key(&self, key: &Key) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// Returns true if `key` has a non-null entry.
    ///
    /// This is the membership rule used by path navigation.
    pub fn is_set(&self, key: &Key) -> bool {
        matches!(self.inner.borrow().get(key), Some(value) if !value.is_null())
    }

    /// Returns the value at `key`.
    ///
    /// Container values come back as handles aliasing the stored container.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns the nested container at `key`, if that entry is a container
    pub fn get_container(&self, key: &Key) -> Option<Container> {
        match self.inner.borrow().get(key) {
            Some(Value::Container(child)) => Some(child.clone()),
            _ => None,
        }
    }

    /// Stores `value` at `key`, returning the previous value.
    ///
    /// An existing key keeps its position; a new key goes last.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let value = value.into().deep_copy();
        self.inner.borrow_mut().insert(key.into(), value)
    }

    /// Stores `value` under the next free index and returns that index.
    ///
    /// The next index is one past the largest existing index key, or `0`.
    ///
    /// # Errors
    /// Returns [`Error::IndexExhausted`] if `u64::MAX` is already an index key.
    /// Nothing is written in that case.
    pub fn append(&self, value: impl Into<Value>) -> Result<Key> {
        let mut table = self.inner.borrow_mut();
        let Some(index) = next_index(&table) else {
            return Err(Error::IndexExhausted {
                path: u64::MAX.to_string(),
            });
        };
        let key = Key::Index(index);
        table.insert(key.clone(), value.into().deep_copy());
        Ok(key)
    }

    /// Returns the container at `key`, first replacing a missing or
    /// non-container entry with a new empty container.
    pub(crate) fn vivify(&self, key: &Key) -> Container {
        let mut table = self.inner.borrow_mut();
        if let Some(Value::Container(child)) = table.get(key) {
            return child.clone();
        }
        let child = Container::new();
        table.insert(key.clone(), Value::Container(child.clone()));
        child
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&self, key: &Key) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(key)
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Returns the first key in insertion order
    pub fn first_key(&self) -> Option<Key> {
        self.inner.borrow().first().map(|(key, _)| key.clone())
    }

    /// Returns the last key in insertion order
    pub fn last_key(&self) -> Option<Key> {
        self.inner.borrow().last().map(|(key, _)| key.clone())
    }

    /// Returns the keys in insertion order
    pub fn keys(&self) -> Vec<Key> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// Returns the values in insertion order (container values alias storage)
    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().values().cloned().collect()
    }

    /// Returns the entries in insertion order (container values alias storage)
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.inner
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns true if both handles refer to the same storage
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns an independent recursive copy of this container.
    pub fn deep_copy(&self) -> Container {
        let table = self.inner.borrow();
        let copied: Table = table
            .iter()
            .map(|(key, value)| (key.clone(), value.deep_copy()))
            .collect();
        Container {
            inner: Rc::new(RefCell::new(copied)),
        }
    }

    /// Renumbers index keys to `0..n` in their current order.
    ///
    /// Name keys keep their names and positions.
    pub fn renumber(&self) {
        let mut table = self.inner.borrow_mut();
        let mut next = 0u64;
        let renumbered: Table = table
            .drain(..)
            .map(|(key, value)| match key {
                Key::Index(_) => {
                    let key = Key::Index(next);
                    next += 1;
                    (key, value)
                }
                named => (named, value),
            })
            .collect();
        *table = renumbered;
    }

    /// Replaces all entries without copying the given values.
    ///
    /// Used by in-place transforms that reorder existing entries; nested
    /// containers keep their identity so live views over them stay valid.
    pub(crate) fn replace_entries(&self, entries: impl IntoIterator<Item = (Key, Value)>) {
        let table: Table = entries.into_iter().collect();
        *self.inner.borrow_mut() = table;
    }

    /// Runs `f` with shared access to the underlying table.
    pub(crate) fn with_table<R>(&self, f: impl FnOnce(&Table) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Returns true if the entries are exactly the indices `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.with_table(|table| {
            table
                .keys()
                .enumerate()
                .all(|(i, key)| *key == Key::Index(i as u64))
        })
    }

    /// Builds a container from a JSON value.
    ///
    /// Objects keep their field order; field names that spell canonical
    /// indices become index keys. Arrays become index keys `0..n`.
    ///
    /// # Errors
    /// Returns [`Error::NotAContainer`] if `json` is not an object or array.
    pub fn from_json_value(json: serde_json::Value) -> Result<Container> {
        match Value::from(json) {
            Value::Container(container) => Ok(container),
            other => Err(Error::NotAContainer {
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Parses a JSON document into a container.
    pub fn from_json_str(json: &str) -> Result<Container> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Container::from_json_value(value)
    }

    /// Converts the container to a JSON value.
    ///
    /// # Errors
    /// Returns [`Error::Serialize`] if the container holds a callable.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serializes the container to a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn next_index(table: &Table) -> Option<u64> {
    match table.keys().filter_map(Key::as_index).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.borrow().iter()).finish()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.inner.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Structural equality, ignoring entry order.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner.borrow() == *other.inner.borrow()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Container {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let container = Container::new();
        for (key, value) in iter {
            container.insert(key, value);
        }
        container
    }
}

impl FromIterator<Value> for Container {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let container = Container::new();
        for (index, value) in (0u64..).zip(iter) {
            container.insert(index, value);
        }
        container
    }
}

impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let table = self.inner.borrow();
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(table.len()))?;
            for value in table.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(table.len()))?;
            for (key, value) in table.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Container::from_json_value(json).map_err(D::Error::custom)
    }
}
