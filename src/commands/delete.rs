//! Delete command - Remove connections from the store

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use crate::store::Database;

/// Execute the delete command
pub fn execute(db: &mut Database, ids: &[i64], yes: bool) -> Result<()> {
    let people = db.people_by_ids(ids)?;
    if people.is_empty() {
        println!("No matching connections.");
        return Ok(());
    }

    println!("About to delete {} connection(s):", people.len());
    for person in &people {
        println!("  {} ({})", person.display_name(), person.company.dimmed());
    }

    if !yes && !utils::confirm(&format!("\nDelete {} connection(s)?", people.len()))? {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = db.delete_people(ids)?;
    println!("{} {} connection(s)", "Deleted:".green(), deleted);
    Ok(())
}
