//! Stats command - Progress and database statistics

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::utils;
use crate::store::Database;

/// Snapshot of the store's contents
#[derive(Debug, Default)]
pub struct Stats {
    /// Total connection records
    pub people: u64,

    /// Records already visited
    pub visited: u64,

    /// Distinct company groups with members
    pub companies: u64,

    /// Distinct normalized positions
    pub positions: u64,

    /// Most common positions as (name, holder count)
    pub top_positions: Vec<(String, u64)>,

    /// Database file size in bytes (0 for in-memory)
    pub db_size: u64,
}

/// Gather statistics from the store
pub fn stats(db: &Database, db_path: &Path) -> Result<Stats> {
    let (visited, people) = db.visited_stats()?;
    let companies = db.company_groups()?.len() as u64;
    let positions = db.position_count()?;
    let top_positions = db.top_positions(5)?;
    let db_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    Ok(Stats {
        people,
        visited,
        companies,
        positions,
        top_positions,
        db_size,
    })
}

/// Format stats for display
pub fn format_stats(stats: &Stats) -> String {
    let mut lines = vec![];

    let percent = if stats.people > 0 {
        (stats.visited as f64 / stats.people as f64) * 100.0
    } else {
        0.0
    };

    lines.push(format!(
        "Visited: {}/{} connections ({:.0}%)",
        stats.visited, stats.people, percent
    ));
    lines.push(format!("Companies: {}", stats.companies));
    lines.push(format!("Positions: {}", stats.positions));

    if !stats.top_positions.is_empty() {
        lines.push(String::new());
        lines.push("Top positions:".to_string());
        for (name, holders) in &stats.top_positions {
            lines.push(format!("  {} ({})", name, holders));
        }
    }

    lines.push(String::new());
    lines.push(format!("Database: {}", utils::format_size(stats.db_size)));

    lines.join("\n")
}
