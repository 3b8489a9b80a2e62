//! Path parsing and joining for nested container access.
//!
//! A path is a flat, delimiter-separated sequence of keys such as
//! `"user.profile.name"` or `"items.0.title"`. There is no escaping: a key
//! that contains the delimiter cannot be addressed through a path string.
//!
//! # Core Types
//!
//! - [`Key`] - A single container key, either a name or a non-negative index
//! - [`PathCodec`] - Splits path strings into keys and joins keys back
//!
//! # Usage
//!
//! ```rust
//! use livetree::path::{Key, PathCodec};
//!
//! let codec = PathCodec::default();
//! let keys = codec.parse("items.0.title");
//! assert_eq!(keys, vec![Key::from("items"), Key::Index(0), Key::from("title")]);
//! assert_eq!(codec.combine(&keys), "items.0.title");
//! ```

use std::{fmt, str::FromStr};

/// Delimiter used when no [`Config`](crate::Config) overrides it.
pub const DEFAULT_DELIMITER: char = '.';

/// A key inside a container.
///
/// Segments that spell a canonical non-negative decimal integer (`"0"`,
/// `"42"`, but not `"007"` or `"-1"`) are indices; everything else is a
/// name. Conversions from strings apply the same rule, so `Key::from("3")`
/// and `Key::Index(3)` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Array-style integer key
    Index(u64),
    /// Map-style string key
    Name(String),
}

impl Key {
    /// Classifies a raw path segment as an index or a name.
    pub fn from_segment(segment: &str) -> Self {
        match parse_canonical_index(segment) {
            Some(index) => Key::Index(index),
            None => Key::Name(segment.to_string()),
        }
    }

    /// Returns the index if this is an index key
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Returns the name if this is a name key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Returns true if this is an index key
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }
}

fn parse_canonical_index(segment: &str) -> Option<u64> {
    let bytes = segment.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'1'..=b'9', rest @ ..] if rest.iter().all(u8::is_ascii_digit) => segment.parse().ok(),
        _ => None,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::from_segment(s))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::from_segment(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_canonical_index(&s) {
            Some(index) => Key::Index(index),
            None => Key::Name(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from_segment(s)
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Key::Index(index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Key::Index(u64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as u64)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Splits path strings into keys and joins keys into path strings.
///
/// Empty segments are kept as empty-name keys: `"a..b"` addresses the key
/// `""` inside `a`, and `""` addresses the single key `""`. Nothing is
/// trimmed or normalized, which keeps `combine(parse(p)) == p` for every `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCodec {
    delimiter: char,
}

impl PathCodec {
    /// Creates a codec splitting on `delimiter`.
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Returns the delimiter this codec splits on.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Splits `path` into its ordered keys.
    pub fn parse(&self, path: &str) -> Vec<Key> {
        path.split(self.delimiter).map(Key::from_segment).collect()
    }

    /// Joins keys with the delimiter.
    pub fn combine<K: AsRef<Key>>(&self, keys: &[K]) -> String {
        let mut out = String::new();
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&key.as_ref().to_string());
        }
        out
    }

    /// Appends `tail` to `base`, omitting the delimiter when `base` is empty.
    pub fn join(&self, base: &str, tail: &str) -> String {
        if base.is_empty() {
            tail.to_string()
        } else {
            format!("{base}{}{tail}", self.delimiter)
        }
    }
}

impl Default for PathCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl AsRef<Key> for Key {
    fn as_ref(&self) -> &Key {
        self
    }
}

/// Parses `path` with the default delimiter.
pub fn parse_path(path: &str) -> Vec<Key> {
    PathCodec::default().parse(path)
}

/// Joins `keys` with the default delimiter.
pub fn combine_path<K: AsRef<Key>>(keys: &[K]) -> String {
    PathCodec::default().combine(keys)
}
