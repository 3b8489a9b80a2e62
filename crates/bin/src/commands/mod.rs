//! Command implementations.

use livetree::{Item, Node};

use crate::{cli::Commands, output::OutputFormat};

mod read;
mod write;

/// Run `command` against the loaded document
pub fn run(
    root: &Node,
    command: &Commands,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Get(args) => read::get(root, args, format),
        Commands::GetOnly(args) => read::get_only(root, args, format),
        Commands::Keys(args) => read::keys(root, args, format),
        Commands::Count(args) => read::count(root, args, format),
        Commands::Set(args) => write::set(root, args, format),
        Commands::Del(args) => write::del(root, args, format),
        Commands::Invoke(args) => write::invoke(root, args, format),
    }
}

/// Resolve an optional path to a container view; `None` selects the root.
fn target(root: &Node, path: Option<&str>) -> Result<Node, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(root.clone());
    };
    match root.get(path)? {
        Item::Node(node) => Ok(node),
        Item::Value(value) => {
            Err(format!("{path} holds a {}, not a container", value.type_name()).into())
        }
    }
}
