//! Companies command - Show company groups with member counts
//!
//! Every company with members is listed; the employee threshold only
//! decides which groups get the "large" marker. `--large` narrows the
//! listing to those groups.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::fuzzy;
use crate::store::{CompanyGroup, Database};

/// Options for the companies command
pub struct CompaniesOptions {
    /// Fuzzy query; matches are ranked best-first
    pub search: Option<String>,
    /// Only groups at or above the threshold
    pub large: bool,
    /// Override the stored employee threshold
    pub min: Option<u32>,
}

/// Execute the companies command and return formatted output
pub fn execute(db: &Database, options: CompaniesOptions) -> Result<String> {
    let threshold = match options.min {
        Some(n) => n,
        None => db.employee_threshold()?,
    };

    let mut groups = db.company_groups()?;

    if let Some(query) = &options.search {
        groups = rank_groups(query, groups);
    }

    if options.large {
        groups.retain(|g| g.members >= threshold as u64);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Company"),
        Cell::new("People"),
        Cell::new("Size"),
    ]);

    for group in &groups {
        let marker = if group.members >= threshold as u64 {
            "large"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(group.id),
            Cell::new(&group.name),
            Cell::new(group.members),
            Cell::new(marker),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} companies (threshold: {})",
        groups.len(),
        threshold
    ));
    Ok(output)
}

/// Reorder groups by fuzzy score against the query, dropping non-matches
fn rank_groups(query: &str, groups: Vec<CompanyGroup>) -> Vec<CompanyGroup> {
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    fuzzy::rank(query, &names)
        .into_iter()
        .map(|m| groups[m.index].clone())
        .collect()
}
