//! Read-only commands.

use livetree::{CountMode, Node};

use super::target;
use crate::{
    cli::{CountArgs, GetArgs, TargetArgs},
    output::{OutputFormat, parse_value, print_item, print_table},
};

/// Run the get command
pub fn get(
    root: &Node,
    args: &GetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = match &args.default {
        Some(default) => root.get_or(&args.path, parse_value(default)),
        None => root.get(&args.path)?,
    };
    print_item(&item, format)
}

/// Run the get-only command
pub fn get_only(
    root: &Node,
    args: &GetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = match &args.default {
        Some(default) => root.get_only_or(&args.path, parse_value(default)),
        None => root.get_only(&args.path)?,
    };
    print_item(&item, format)
}

/// Run the keys command
pub fn keys(
    root: &Node,
    args: &TargetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = target(root, args.path.as_deref())?;

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = node
                .entries()
                .into_iter()
                .map(|(key, value)| vec![key.to_string(), value.type_name().to_string()])
                .collect();
            print_table(&["KEY", "TYPE"], &rows);
        }
        OutputFormat::Json => {
            let keys: Vec<String> = node.keys().iter().map(ToString::to_string).collect();
            println!("{}", serde_json::to_string(&keys)?);
        }
    }
    Ok(())
}

/// Run the count command
pub fn count(
    root: &Node,
    args: &CountArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = target(root, args.path.as_deref())?;
    let mode = if args.recursive {
        CountMode::Recursive
    } else {
        CountMode::Normal
    };
    let count = node.count(mode);

    match format {
        OutputFormat::Human => println!("{count}"),
        OutputFormat::Json => println!("{}", serde_json::json!({ "count": count })),
    }
    Ok(())
}
