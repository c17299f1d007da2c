//! LinkedIn CSV ingestion
//!
//! LinkedIn connection exports are almost-but-not-quite clean CSV: the real
//! header row is preceded by a "Notes:" preamble of varying length, columns
//! come and go between export versions, and plenty of rows are missing
//! fields. The importer scans for the header, tolerates unknown columns,
//! and hands sanitized rows to the store for transactional insertion.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::profile::canonical_profile_url;
use crate::store::{Database, NewConnection};

/// Columns a row must be able to supply (extra columns are ignored)
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "First Name",
    "Last Name",
    "URL",
    "Email Address",
    "Company",
    "Position",
    "Connected On",
];

/// Failure modes of reading a single export file
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: no header row with the expected connection columns", path.display())]
    MissingHeader { path: PathBuf },
}

/// Rows parsed out of one file, before deduplication
#[derive(Debug)]
pub struct ParsedFile {
    pub rows: Vec<NewConnection>,
    /// Rows dropped because both name fields were empty
    pub skipped_no_name: usize,
}

/// Combined result of importing one file into the store
#[derive(Debug)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped_no_name: usize,
    pub duplicates: Vec<String>,
}

/// Read and sanitize a LinkedIn connections export
pub fn read_connections(path: &Path) -> Result<ParsedFile, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // No has_headers: the header position is unknown until we find it.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ImportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }

    let (header_index, columns) = find_header(&records).ok_or_else(|| {
        ImportError::MissingHeader {
            path: path.to_path_buf(),
        }
    })?;

    let mut rows = Vec::new();
    let mut skipped_no_name = 0;

    for record in records.iter().skip(header_index + 1) {
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let field = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let first_name = field("First Name");
        let last_name = field("Last Name");
        if first_name.is_empty() && last_name.is_empty() {
            skipped_no_name += 1;
            continue;
        }

        let url = canonical_profile_url(&field("URL"));
        let email = non_empty(field("Email Address"));
        let position = non_empty(field("Position"));
        let connected_on = non_empty(field("Connected On"));

        rows.push(NewConnection {
            first_name,
            last_name,
            url,
            email,
            company: field("Company"),
            position,
            connected_on,
        });
    }

    log::debug!(
        "{}: parsed {} rows, skipped {} without a name",
        path.display(),
        rows.len(),
        skipped_no_name
    );

    Ok(ParsedFile {
        rows,
        skipped_no_name,
    })
}

/// Read one export file and insert its rows in a single transaction
pub fn import_file(db: &mut Database, path: &Path) -> anyhow::Result<ImportReport> {
    let parsed = read_connections(path)?;
    let outcome = db.import_rows(&parsed.rows)?;
    Ok(ImportReport {
        imported: outcome.imported,
        skipped_no_name: parsed.skipped_no_name,
        duplicates: outcome.duplicates,
    })
}

/// Locate the header row: the first record whose cells cover all required
/// columns. Returns its index and a column-name -> field-index map.
fn find_header(records: &[csv::StringRecord]) -> Option<(usize, HashMap<String, usize>)> {
    for (index, record) in records.iter().enumerate() {
        let cells: Vec<String> = record
            .iter()
            .map(|c| c.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        if REQUIRED_COLUMNS
            .iter()
            .all(|required| cells.iter().any(|c| c == required))
        {
            let columns = cells
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, i))
                .collect();
            return Some((index, columns));
        }
    }
    None
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy;
    use crate::store::PeopleFilter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = include_str!("../testdata/sample_connections.csv");

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_with_preamble() {
        let file = write_csv(
            "Notes:\n\
             \"When exporting your connection data, you may be missing...\"\n\
             \n\
             First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey,mickey@disney.example,Disney,Mascot,02 Jan 2024\n",
        );

        let parsed = read_connections(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped_no_name, 0);

        let row = &parsed.rows[0];
        assert_eq!(row.first_name, "Mickey");
        assert_eq!(row.company, "Disney");
        assert_eq!(
            row.url.as_deref(),
            Some("https://www.linkedin.com/in/mickey")
        );
        assert_eq!(row.connected_on.as_deref(), Some("02 Jan 2024"));
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let file = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On,Weird Extra\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey,,Disney,Mascot,02 Jan 2024,surprise\n",
        );
        let parsed = read_connections(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.rows[0].email.is_none());
    }

    #[test]
    fn test_rows_without_name_skipped() {
        let file = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             ,,https://www.linkedin.com/in/ghost,,Nowhere,,01 Jan 2024\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey,,Disney,Mascot,02 Jan 2024\n",
        );
        let parsed = read_connections(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped_no_name, 1);
    }

    #[test]
    fn test_short_rows_tolerated() {
        let file = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Minnie,Mouse\n",
        );
        let parsed = read_connections(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert!(parsed.rows[0].url.is_none());
        assert_eq!(parsed.rows[0].company, "");
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let file = write_csv("just,some,random\ncsv,data,here\n");
        let err = read_connections(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::MissingHeader { .. }));
    }

    #[test]
    fn test_import_idempotent() {
        let file = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey,,Disney,Mascot,02 Jan 2024\n",
        );
        let mut db = Database::open_in_memory().unwrap();

        let first = import_file(&mut db, file.path()).unwrap();
        assert_eq!(first.imported, 1);

        let second = import_file(&mut db, file.path()).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicates, vec!["Mickey Mouse".to_string()]);
        assert_eq!(db.people(&PeopleFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_overlapping_files_no_duplicates() {
        let a = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey,,Disney,Mascot,02 Jan 2024\n\
             Donald,Duck,https://www.linkedin.com/in/donald,,Disney,Sailor,03 Jan 2024\n",
        );
        // Second export: same Mickey (tracking params on the URL), new Goofy
        let b = write_csv(
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Mickey,Mouse,https://www.linkedin.com/in/mickey?trk=export,,Disney,Mascot,02 Jan 2024\n\
             Goofy,Goof,https://www.linkedin.com/in/goofy,,Disney,Stuntman,04 Jan 2024\n",
        );

        let mut db = Database::open_in_memory().unwrap();
        import_file(&mut db, a.path()).unwrap();
        let report = import_file(&mut db, b.path()).unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicates, vec!["Mickey Mouse".to_string()]);
        assert_eq!(db.people(&PeopleFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_sample_csv_groups_and_search() {
        let file = write_csv(SAMPLE);
        let mut db = Database::open_in_memory().unwrap();
        let report = import_file(&mut db, file.path()).unwrap();
        assert_eq!(report.imported, 6);

        // 6 rows, 6 distinct companies: 6 groups of size 1
        let groups = db.company_groups().unwrap();
        assert_eq!(groups.len(), 6);
        assert!(groups.iter().all(|g| g.members == 1));

        // Searching "Disney" resolves exactly the Mickey Mouse record
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        let best = fuzzy::best_match("Disney", &names).unwrap();
        let disney = &groups[best.index];
        assert_eq!(disney.name, "Disney");

        let people = db
            .people(&PeopleFilter {
                company_ids: Some(vec![disney.id]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].display_name(), "Mickey Mouse");
    }
}
