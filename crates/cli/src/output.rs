//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use apptoolkit_catalog::model::{AppInfo, AppListItem};
use apptoolkit_core::Error;
use owo_colors::OwoColorize;
use std::collections::BTreeSet;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a core error with its context and suggestion
    pub fn error_report(err: &Error) {
        eprintln!("{} {}", "✗".red(), err.message);
        if let Some(ref context) = err.context {
            eprintln!("  {} {}", "context:".dimmed(), context);
        }
        if let Some(ref suggestion) = err.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Plain-text row for one app
#[must_use]
pub fn app_row(app: &AppInfo, favorite: bool) -> String {
    let marker = if favorite { "★" } else { " " };
    let mut row = format!("{marker} {}  ({})", app.name, app.package_name);
    if let Some(ref category) = app.category {
        row.push_str(&format!("  [{}]", category.label));
    }
    row
}

/// Print a list of items, marking favorites
pub fn print_list_items(items: &[AppListItem], favorites: &BTreeSet<String>) {
    for item in items {
        match item {
            AppListItem::App(app) => {
                let row = app_row(app, favorites.contains(&app.package_name));
                if favorites.contains(&app.package_name) {
                    println!("{}", row.yellow());
                } else {
                    println!("{row}");
                }
            }
            AppListItem::Ad => println!("{}", "  ── sponsored ──".dimmed()),
        }
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
