// crates/caremesh-cli/src/output.rs
//
// Rendering helpers shared by the CLI commands.

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

/// Render rows as a rounded-style table.
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
