//! Terminal styling utilities for consistent CLI output

use crate::render::StatusBadge;
use colored::{ColoredString, Colorize};

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a hint message to stderr (dimmed)
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

pub fn header(msg: &str) {
    println!("{}", msg.cyan().bold());
}

pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Scan status colored the same way the dashboard badges it
pub fn scan_status(status: &str) -> ColoredString {
    match StatusBadge::classify(status) {
        StatusBadge::Success => status.green(),
        StatusBadge::Warning => status.yellow(),
        StatusBadge::Info => status.blue(),
        StatusBadge::Danger => status.red().bold(),
    }
}

/// Format a label-value pair for metrics display
pub fn metric(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}
