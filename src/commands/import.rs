//! Import command - Ingest LinkedIn connection export files

use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::importer;
use crate::store::Database;

/// Execute the import command over one or more CSV files
///
/// Each file is imported in its own transaction: a malformed file is
/// reported and leaves the store untouched, and the remaining files are
/// still processed.
pub fn execute(db: &mut Database, files: &[PathBuf]) -> Result<()> {
    let mut total_imported = 0;
    let mut total_duplicates = 0;
    let mut total_skipped = 0;
    let mut failed = 0;

    for path in files {
        match importer::import_file(db, path) {
            Ok(report) => {
                println!(
                    "{}: imported {}, {} duplicate(s), {} without a name",
                    path.display(),
                    report.imported.to_string().green(),
                    report.duplicates.len(),
                    report.skipped_no_name
                );
                if !report.duplicates.is_empty() {
                    println!("  Omitted as already present:");
                    for name in &report.duplicates {
                        println!("    {}", name.dimmed());
                    }
                }
                total_imported += report.imported;
                total_duplicates += report.duplicates.len();
                total_skipped += report.skipped_no_name;
            }
            Err(e) => {
                eprintln!("{} {}: {:#}", "Failed:".red(), path.display(), e);
                failed += 1;
            }
        }
    }

    if files.len() > 1 {
        println!(
            "\nTotal: imported {}, {} duplicate(s), {} without a name",
            total_imported, total_duplicates, total_skipped
        );
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) failed to import", failed);
    }
    Ok(())
}
