//! Shared utilities for commands

use anyhow::Result;
use std::io::{self, Write};

use crate::fuzzy;
use crate::store::{CompanyGroup, Database};

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Ask a y/N question on stdin; anything but "y"/"Y" declines
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N) ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Resolve a free-text company query to its best-matching group
///
/// Fails when nothing matches so commands can just `?` it.
pub fn resolve_company(db: &Database, query: &str) -> Result<CompanyGroup> {
    let groups = db.company_groups()?;
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();

    match fuzzy::best_match(query, &names) {
        Some(m) => Ok(groups[m.index].clone()),
        None => anyhow::bail!("No company matches '{}'", query),
    }
}
