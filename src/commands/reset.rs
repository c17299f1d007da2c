//! Reset command - Clear the entire database

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use crate::store::Database;

/// Execute the reset command
///
/// Declining the confirmation changes nothing. The clear itself is one
/// transaction, so a failure leaves the store as it was.
pub fn execute(db: &mut Database, yes: bool) -> Result<()> {
    let (_, total) = db.visited_stats()?;

    println!(
        "{}",
        "This will permanently delete ALL data: people, companies, positions and settings."
            .red()
            .bold()
    );
    println!("Currently stored: {} connection(s)", total);

    if !yes && !utils::confirm("Reset the database?")? {
        println!("Aborted.");
        return Ok(());
    }

    db.reset()?;
    println!("{} The database is now empty.", "Done.".green());
    Ok(())
}
