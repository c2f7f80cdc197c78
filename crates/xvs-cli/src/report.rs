use colored::Colorize;
use xvs_types::{Change, ChangeAction, ChangeRecord, Value};

use crate::runner::BatchSummary;

/// One-line rendering of a value: JSON when possible, flow YAML otherwise.
pub fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| {
        serde_yaml::to_string(value)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_else(|_| "<unprintable>".into())
    })
}

/// Uncoloured change line, e.g. `[+] region: "eu"`.
pub fn change_line(change: &Change) -> String {
    format!(
        "[{}] {}: {}",
        change.action.marker(),
        change.key,
        render_value(&change.value)
    )
}

/// Print the changes for one job template to stdout.
pub fn print_changes(id: &str, name: Option<&str>, changes: &ChangeRecord, show_unchanged: bool) {
    match name {
        Some(name) => println!("Job template {} ({})", id.bold(), name),
        None => println!("Job template {}", id.bold()),
    }
    if !changes.has_changes() {
        println!("  {}", "no changes".dimmed());
    }
    for change in changes {
        let line = change_line(change);
        match change.action {
            ChangeAction::Added => println!("  {}", line.green()),
            ChangeAction::Updated => println!("  {}", line.yellow()),
            ChangeAction::Removed => println!("  {}", line.red()),
            ChangeAction::Unchanged if show_unchanged => println!("  {}", line.dimmed()),
            ChangeAction::Unchanged => {}
        }
    }
}

/// Uncoloured batch summary.
pub fn summary_line(summary: &BatchSummary, confirm: bool) -> String {
    if confirm {
        format!(
            "{} job template(s) processed, {} patched ({} added, {} updated, {} removed)",
            summary.processed, summary.patched, summary.added, summary.updated, summary.removed
        )
    } else {
        format!(
            "dry run: {} job template(s) processed, {} left unchanged, pass --confirm true to apply",
            summary.processed, summary.skipped
        )
    }
}

pub fn print_summary(summary: &BatchSummary, confirm: bool) {
    let line = summary_line(summary, confirm);
    if confirm {
        println!("{} {line}", "✓".green().bold());
    } else {
        println!("{} {line}", "!".yellow().bold());
    }
}
