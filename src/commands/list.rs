//! List command - Show imported connections

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use super::utils;
use crate::store::{Database, PeopleFilter, Person};

/// Options for the list command
pub struct ListOptions {
    /// Company queries to filter by (fuzzy-resolved)
    pub companies: Vec<String>,
    /// Only people not yet visited
    pub unvisited: bool,
    /// Sort by: name, company, connected (default: name)
    pub sort: String,
    /// Reverse sort order
    pub reverse: bool,
    /// Limit number of results
    pub limit: Option<usize>,
}

/// Execute the list command and return formatted output
pub fn execute(db: &Database, options: ListOptions) -> Result<String> {
    let company_ids = if options.companies.is_empty() {
        None
    } else {
        let mut ids = Vec::new();
        for query in &options.companies {
            ids.push(utils::resolve_company(db, query)?.id);
        }
        Some(ids)
    };

    let mut people = db.people(&PeopleFilter {
        company_ids,
        unvisited_only: options.unvisited,
    })?;

    // Default ordering (by name) comes from the query itself
    match options.sort.as_str() {
        "company" => {
            people.sort_by(|a, b| a.company.to_lowercase().cmp(&b.company.to_lowercase()));
        }
        "connected" => {
            // Most recent first; undated rows sink to the end
            people.sort_by(|a, b| {
                let date_a = parse_connected_on(a.connected_on.as_deref());
                let date_b = parse_connected_on(b.connected_on.as_deref());
                date_b.cmp(&date_a)
            });
        }
        _ => {}
    }

    if options.reverse {
        people.reverse();
    }

    let total_count = people.len();
    if let Some(n) = options.limit {
        people.truncate(n);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("✓"),
        Cell::new("First"),
        Cell::new("Last"),
        Cell::new("Position"),
        Cell::new("Email"),
        Cell::new("Company"),
        Cell::new("Connected"),
    ]);

    for person in &people {
        table.add_row(person_row(person));
    }

    let mut output = table.to_string();
    if people.len() < total_count {
        output.push_str(&format!(
            "\n\nShowing {} of {} connections",
            people.len(),
            total_count
        ));
    } else {
        output.push_str(&format!("\n\n{} connections", total_count));
    }

    Ok(output)
}

fn person_row(person: &Person) -> Vec<Cell> {
    vec![
        Cell::new(person.id),
        Cell::new(if person.visited { "✓" } else { "" }),
        Cell::new(&person.first_name),
        Cell::new(&person.last_name),
        Cell::new(person.position.as_deref().unwrap_or("")),
        Cell::new(person.email.as_deref().unwrap_or("")),
        Cell::new(&person.company),
        Cell::new(person.connected_on.as_deref().unwrap_or("")),
    ]
}

/// Parse a LinkedIn "Connected On" value ("02 Jan 2024")
fn parse_connected_on(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), "%d %b %Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewConnection;

    fn row(first: &str, last: &str, company: &str, connected: Option<&str>) -> NewConnection {
        NewConnection {
            first_name: first.to_string(),
            last_name: last.to_string(),
            url: None,
            email: None,
            company: company.to_string(),
            position: None,
            connected_on: connected.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_connected_on() {
        assert_eq!(
            parse_connected_on(Some("02 Jan 2024")),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert!(parse_connected_on(Some("not a date")).is_none());
        assert!(parse_connected_on(None).is_none());
    }

    #[test]
    fn test_list_output_counts() {
        let mut db = Database::open_in_memory().unwrap();
        db.import_rows(&[
            row("Mickey", "Mouse", "Disney", Some("02 Jan 2024")),
            row("Wile", "Coyote", "Acme", Some("15 Feb 2024")),
        ])
        .unwrap();

        let output = execute(
            &db,
            ListOptions {
                companies: vec![],
                unvisited: false,
                sort: "name".to_string(),
                reverse: false,
                limit: None,
            },
        )
        .unwrap();
        assert!(output.contains("2 connections"));
        assert!(output.contains("Mickey"));
    }

    #[test]
    fn test_list_limit_footer() {
        let mut db = Database::open_in_memory().unwrap();
        db.import_rows(&[
            row("Mickey", "Mouse", "Disney", None),
            row("Wile", "Coyote", "Acme", None),
        ])
        .unwrap();

        let output = execute(
            &db,
            ListOptions {
                companies: vec![],
                unvisited: false,
                sort: "name".to_string(),
                reverse: false,
                limit: Some(1),
            },
        )
        .unwrap();
        assert!(output.contains("Showing 1 of 2 connections"));
    }

    #[test]
    fn test_list_company_filter() {
        let mut db = Database::open_in_memory().unwrap();
        db.import_rows(&[
            row("Mickey", "Mouse", "Disney", None),
            row("Wile", "Coyote", "Acme", None),
        ])
        .unwrap();

        let output = execute(
            &db,
            ListOptions {
                companies: vec!["disney".to_string()],
                unvisited: false,
                sort: "name".to_string(),
                reverse: false,
                limit: None,
            },
        )
        .unwrap();
        assert!(output.contains("Mickey"));
        assert!(!output.contains("Coyote"));
    }
}
