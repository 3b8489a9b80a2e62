use std::{io::Read, path::Path, rc::Rc};

use clap::Parser;
use livetree::{Config, Container, ExtensionRegistry, Node};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("livetree=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let document = read_document(cli.input.as_deref())?;
    let storage = Container::from_json_str(&document)?;
    tracing::debug!(entries = storage.len(), "Loaded document");

    let root = Node::with_config(
        storage,
        Config::with_delimiter(cli.delimiter),
        Rc::new(ExtensionRegistry::default()),
    );

    commands::run(&root, &cli.command, cli.format)
}

/// Read the JSON document from `input`, or from stdin when no file is given.
fn read_document(input: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading document");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            let mut document = String::new();
            std::io::stdin().read_to_string(&mut document)?;
            Ok(document)
        }
    }
}
