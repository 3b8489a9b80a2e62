//!
//! livetree: live, path-addressable views over nested key-value containers.
//!
//! ## Core Concepts
//!
//! * **Containers (`container::Container`)**: Shared, insertion-ordered maps from keys to values. Cloning a container aliases it.
//! * **Paths (`path::PathCodec`)**: Flat, delimiter-separated key sequences such as `"user.profile.name"`.
//! * **Nodes (`node::Node`)**: Views over a location in a container. Reads, writes and deletes go straight to the shared storage, and
//!   navigating to a nested container yields another live node.
//! * **Extensions (`extension::ExtensionRegistry`)**: Named operations dispatched against a node, resolved through a registry
//!   injected at construction.
//!
//! ## Example
//!
//! ```
//! use livetree::{Container, Node};
//!
//! let storage = Container::new();
//! let root = Node::new(storage.clone());
//!
//! root.set("config.server.port", 8080);
//! assert_eq!(root.get_or("config.server.host", "localhost"), "localhost");
//!
//! let server = root.get("config.server").unwrap().into_node().unwrap();
//! server.del("port");
//!
//! assert!(!root.is_path("config.server.port"));
//! assert_eq!(storage.len(), 1);
//! ```
//!
//! Nodes are single-threaded (`!Send`): every view over one root shares
//! mutable storage without locking.

pub mod config;
pub mod container;
pub mod errors;
pub mod extension;
pub mod node;
pub mod path;
pub mod value;

pub use config::Config;
pub use container::{Container, CountMode};
pub use errors::{Error, Result};
pub use extension::{ExtensionFn, ExtensionRegistry};
pub use node::{Item, Node};
pub use path::{Key, PathCodec};
pub use value::{Callable, CallableError, Value};
