//! CLI argument definitions for the livetree binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Query and edit nested JSON documents by path
#[derive(Parser, Debug)]
#[command(name = "livetree")]
#[command(about = "livetree: path-addressable views over nested JSON documents")]
#[command(version)]
pub struct Cli {
    /// JSON document to operate on. Reads stdin when omitted.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Character separating keys in paths
    #[arg(
        short,
        long,
        default_value_t = '.',
        env = "LIVETREE_DELIMITER",
        global = true
    )]
    pub delimiter: char,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a path, writing the default there first if it is missing
    Get(GetArgs),
    /// Read a path without modifying the document
    GetOnly(GetArgs),
    /// Write a value at a path, creating intermediate containers
    Set(SetArgs),
    /// Delete a path
    Del(PathArgs),
    /// List the keys of a container
    Keys(TargetArgs),
    /// Count the entries of a container
    Count(CountArgs),
    /// Run a registered extension against a container
    Invoke(InvokeArgs),
}

/// Arguments for the get and get-only commands
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Path to read
    pub path: String,

    /// Value used when the path is missing
    #[arg(long)]
    pub default: Option<String>,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Path to write
    pub path: String,

    /// Value to store. Anything that is not valid JSON is stored as a string.
    pub value: String,
}

/// Arguments for commands that take a single path
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Path to operate on
    pub path: String,
}

/// Arguments for commands that act on a container, the root by default
#[derive(clap::Args, Debug)]
pub struct TargetArgs {
    /// Path of the container
    pub path: Option<String>,
}

/// Arguments for the count command
#[derive(clap::Args, Debug)]
pub struct CountArgs {
    /// Path of the container
    pub path: Option<String>,

    /// Include entries of nested containers
    #[arg(short, long)]
    pub recursive: bool,
}

/// Arguments for the invoke command
#[derive(clap::Args, Debug)]
pub struct InvokeArgs {
    /// Extension name
    pub name: String,

    /// Arguments passed to the extension, each parsed as JSON
    pub args: Vec<String>,

    /// Path of the container to run against
    #[arg(long)]
    pub at: Option<String>,
}
