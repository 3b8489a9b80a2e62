//! Commands that modify the document and print it back.

use livetree::{Item, Node, Value};

use super::target;
use crate::{
    cli::{InvokeArgs, PathArgs, SetArgs},
    output::{OutputFormat, parse_value, print_item},
};

fn print_document(root: &Node, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    print_item(&Item::Node(root.clone()), format)
}

/// Run the set command
pub fn set(
    root: &Node,
    args: &SetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    root.set(&args.path, parse_value(&args.value));
    tracing::debug!(path = %args.path, "Value written");
    print_document(root, format)
}

/// Run the del command
pub fn del(
    root: &Node,
    args: &PathArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !root.is_path(&args.path) {
        tracing::info!(path = %args.path, "Path not present, nothing to delete");
    }
    root.del(&args.path);
    print_document(root, format)
}

/// Run the invoke command
pub fn invoke(
    root: &Node,
    args: &InvokeArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = target(root, args.at.as_deref())?;
    let values: Vec<Value> = args.args.iter().map(|raw| parse_value(raw)).collect();
    let result = node.invoke(&args.name, &values)?;

    match format {
        OutputFormat::Human => {
            print_item(&result, format)?;
            print_document(root, format)
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "result": serde_json::to_value(&result)?,
                "document": root.to_json()?,
            });
            println!("{}", serde_json::to_string(&value)?);
            Ok(())
        }
    }
}
