//! Note command - The persistent connection note
//!
//! One free-text note, stored in settings and shown whenever profiles are
//! opened. LinkedIn caps connection messages at 300 characters, so going
//! past that is flagged.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::store::Database;

const NOTE_KEY: &str = "connection_note";

/// Soft length limit matching LinkedIn's connection message cap
pub const NOTE_LIMIT: usize = 300;

/// Show the current note with its character count
pub fn show(db: &Database) -> Result<()> {
    match db.setting(NOTE_KEY)? {
        Some(note) if !note.is_empty() => {
            println!("{}", note);
            print_counter(note.chars().count());
        }
        _ => println!("No connection note set."),
    }
    Ok(())
}

/// Replace the note
pub fn set(db: &Database, text: &str) -> Result<()> {
    db.set_setting(NOTE_KEY, text)?;
    print_counter(text.chars().count());
    Ok(())
}

/// Remove the note
pub fn clear(db: &Database) -> Result<()> {
    db.delete_setting(NOTE_KEY)?;
    println!("Connection note cleared.");
    Ok(())
}

fn print_counter(len: usize) {
    if len > NOTE_LIMIT {
        println!(
            "{}",
            format!("{}/{} characters (over the limit)", len, NOTE_LIMIT).red()
        );
    } else {
        println!("{}", format!("{}/{} characters", len, NOTE_LIMIT).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        set(&db, "Hi, great to connect!").unwrap();
        assert_eq!(
            db.setting(NOTE_KEY).unwrap().as_deref(),
            Some("Hi, great to connect!")
        );

        clear(&db).unwrap();
        assert!(db.setting(NOTE_KEY).unwrap().is_none());
    }
}
