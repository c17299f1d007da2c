//! Export command - Dump connection records to CSV or JSON

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::store::{Database, PeopleFilter, Person};

/// Output format for the export command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Execute the export command
pub fn execute(db: &Database, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let people = db.people(&PeopleFilter::default())?;
    let rendered = render(&people, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            println!("Exported {} connection(s) to {}", people.len(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render(people: &[Person], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for person in people {
                writer.serialize(person)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
            Ok(String::from_utf8(bytes).context("Exported CSV was not UTF-8")?)
        }
        ExportFormat::Json => {
            let mut json = serde_json::to_string_pretty(people)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewConnection;

    fn seeded() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.import_rows(&[NewConnection {
            first_name: "Mickey".to_string(),
            last_name: "Mouse".to_string(),
            url: Some("https://www.linkedin.com/in/mickey".to_string()),
            email: None,
            company: "Disney".to_string(),
            position: Some("Mascot".to_string()),
            connected_on: Some("02 Jan 2024".to_string()),
        }])
        .unwrap();
        db
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_str("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("xml"), None);
    }

    #[test]
    fn test_render_csv() {
        let db = seeded();
        let people = db.people(&PeopleFilter::default()).unwrap();
        let csv = render(&people, ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("id,first_name,last_name"));
        assert!(csv.contains("Mickey,Mouse"));
    }

    #[test]
    fn test_render_json() {
        let db = seeded();
        let people = db.people(&PeopleFilter::default()).unwrap();
        let json = render(&people, ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["company"], "Disney");
        assert_eq!(parsed[0]["visited"], false);
    }
}
