//! Settings command - Persisted application settings

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::store::{Database, DEFAULT_EMPLOYEE_THRESHOLD};

/// Keys the set subcommand accepts
const KNOWN_KEYS: [&str; 2] = ["employee_threshold", "connection_note"];

/// Show all stored settings
pub fn list(db: &Database) -> Result<String> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Key"), Cell::new("Value")]);

    let stored = db.settings()?;
    for (key, value) in &stored {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} setting(s) stored (employee_threshold defaults to {})",
        stored.len(),
        DEFAULT_EMPLOYEE_THRESHOLD
    ));
    Ok(output)
}

/// Show one setting value
pub fn get(db: &Database, key: &str) -> Result<()> {
    match db.setting(key)? {
        Some(value) => println!("{}", value),
        None => println!("(not set)"),
    }
    Ok(())
}

/// Store a setting after validating known keys
pub fn set(db: &Database, key: &str, value: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown setting '{}' (known: {})",
            key,
            KNOWN_KEYS.join(", ")
        );
    }

    if key == "employee_threshold" {
        let parsed: u32 = value
            .parse()
            .map_err(|_| anyhow::anyhow!("employee_threshold must be a number"))?;
        if !(1..=100).contains(&parsed) {
            anyhow::bail!("employee_threshold must be between 1 and 100");
        }
    }

    db.set_setting(key, value)?;
    println!("{} = {}", key, value);
    Ok(())
}

/// Remove a setting, falling back to its default
pub fn unset(db: &Database, key: &str) -> Result<()> {
    db.delete_setting(key)?;
    println!("{} unset", key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_validates_threshold() {
        let db = Database::open_in_memory().unwrap();
        assert!(set(&db, "employee_threshold", "10").is_ok());
        assert!(set(&db, "employee_threshold", "0").is_err());
        assert!(set(&db, "employee_threshold", "101").is_err());
        assert!(set(&db, "employee_threshold", "many").is_err());
        assert_eq!(db.employee_threshold().unwrap(), 10);
    }

    #[test]
    fn test_set_rejects_unknown_keys() {
        let db = Database::open_in_memory().unwrap();
        assert!(set(&db, "theme", "dark").is_err());
    }

    #[test]
    fn test_list_output() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("employee_threshold", "5").unwrap();
        let output = list(&db).unwrap();
        assert!(output.contains("employee_threshold"));
        assert!(output.contains("1 setting(s) stored"));
    }
}
