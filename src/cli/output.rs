//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use rust_decimal::Decimal;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// `$95` / `$95.50`, or `-` when unknown.
pub fn price(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |p| format!("${}", p.normalize()))
}
