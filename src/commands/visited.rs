//! Visit/unvisit commands - Toggle the visited flag

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::store::Database;

/// Mark or unmark people as visited
pub fn execute(db: &mut Database, ids: &[i64], visited: bool) -> Result<()> {
    let changed = if visited {
        db.mark_visited(ids)?
    } else {
        db.unmark_visited(ids)?
    };

    let verb = if visited { "visited" } else { "unvisited" };
    println!("Marked {} connection(s) as {}", changed.to_string().green(), verb);

    if changed < ids.len() {
        eprintln!(
            "{} {} id(s) did not match any connection",
            "Warning:".yellow(),
            ids.len() - changed
        );
    }
    Ok(())
}
