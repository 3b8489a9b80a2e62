//! Output formatting helpers for human-readable and JSON output.

use livetree::{Item, Value};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Print a navigation result.
///
/// Human output prints scalars bare and containers as indented JSON.
pub fn print_item(item: &Item, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match (format, item) {
        (OutputFormat::Human, Item::Value(value)) if !value.is_container() => {
            println!("{value}");
        }
        (OutputFormat::Human, _) => println!("{}", serde_json::to_string_pretty(item)?),
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string(item)?),
    }
    Ok(())
}

/// Parse a command-line argument as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    }
}
