//! connections-helper: CLI for organizing exported LinkedIn connections
//!
//! Imports LinkedIn connection export CSVs into a local SQLite database,
//! groups and filters people by company, tracks which profiles were already
//! visited, and launches profile pages in the default browser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod fuzzy;
mod importer;
mod profile;
mod store;

use store::Database;

#[derive(Parser)]
#[command(name = "connections-helper")]
#[command(about = "CLI helper for organizing exported LinkedIn connections", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one or more LinkedIn connection export CSVs
    Import {
        /// CSV files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List connections
    List {
        /// Filter by company (fuzzy-matched, repeatable)
        #[arg(long, short)]
        company: Vec<String>,

        /// Only people not visited yet
        #[arg(long, short)]
        unvisited: bool,

        /// Sort by: name, company, connected (default: name)
        #[arg(long, short, default_value = "name")]
        sort: String,

        /// Reverse sort order
        #[arg(long, short)]
        reverse: bool,

        /// Limit number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show company groups with member counts
    Companies {
        /// Fuzzy search query; matches are ranked best-first
        #[arg(long, short)]
        search: Option<String>,

        /// Only groups at or above the employee threshold
        #[arg(long)]
        large: bool,

        /// Override the stored employee threshold
        #[arg(long)]
        min: Option<u32>,
    },

    /// Open profile pages in the default browser and mark them visited
    Open {
        /// Connection ids to open
        ids: Vec<i64>,

        /// Open a company's people (fuzzy-matched)
        #[arg(long, short)]
        company: Option<String>,

        /// With --company, only people not visited yet
        #[arg(long, short)]
        unvisited: bool,

        /// Do not mark the selection visited
        #[arg(long)]
        no_visit: bool,
    },

    /// Mark connections as visited
    Visit {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Undo the visited flag
    Unvisit {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Delete connections
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or edit the persistent connection note
    Note {
        #[command(subcommand)]
        action: Option<NoteAction>,
    },

    /// Inspect or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Export all connections to CSV or JSON
    Export {
        /// Output format: csv or json (default: csv)
        #[arg(long, short, default_value = "csv")]
        format: String,

        /// Output file (prints to stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show visited progress and database statistics
    Stats,

    /// Delete ALL data after confirmation
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Replace the note text
    Set { text: String },

    /// Clear the note
    Clear,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// List stored settings
    List,

    /// Show one setting
    Get { key: String },

    /// Store a setting
    Set { key: String, value: String },

    /// Remove a setting
    Unset { key: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let db_path = config::database_path().context("Failed to determine database path")?;
    let mut db = Database::open(&db_path)?;

    match cli.command {
        Commands::Import { files } => {
            commands::import::execute(&mut db, &files)?;
        }

        Commands::List {
            company,
            unvisited,
            sort,
            reverse,
            limit,
        } => {
            let options = commands::list::ListOptions {
                companies: company,
                unvisited,
                sort,
                reverse,
                limit,
            };
            let output = commands::list::execute(&db, options)?;
            println!("{}", output);
        }

        Commands::Companies { search, large, min } => {
            let options = commands::companies::CompaniesOptions { search, large, min };
            let output = commands::companies::execute(&db, options)?;
            println!("{}", output);
        }

        Commands::Open {
            ids,
            company,
            unvisited,
            no_visit,
        } => {
            if ids.is_empty() && company.is_none() {
                anyhow::bail!("Provide connection ids or --company");
            }
            let options = commands::open::OpenOptions {
                ids,
                company,
                unvisited,
                no_visit,
            };
            commands::open::execute(&mut db, options)?;
        }

        Commands::Visit { ids } => {
            commands::visited::execute(&mut db, &ids, true)?;
        }

        Commands::Unvisit { ids } => {
            commands::visited::execute(&mut db, &ids, false)?;
        }

        Commands::Delete { ids, yes } => {
            commands::delete::execute(&mut db, &ids, yes)?;
        }

        Commands::Note { action } => match action {
            None => commands::note::show(&db)?,
            Some(NoteAction::Set { text }) => commands::note::set(&db, &text)?,
            Some(NoteAction::Clear) => commands::note::clear(&db)?,
        },

        Commands::Settings { action } => match action {
            SettingsAction::List => {
                let output = commands::settings::list(&db)?;
                println!("{}", output);
            }
            SettingsAction::Get { key } => commands::settings::get(&db, &key)?,
            SettingsAction::Set { key, value } => commands::settings::set(&db, &key, &value)?,
            SettingsAction::Unset { key } => commands::settings::unset(&db, &key)?,
        },

        Commands::Export { format, output } => {
            let format = commands::export::ExportFormat::from_str(&format)
                .context("Invalid format. Use 'csv' or 'json'")?;
            commands::export::execute(&db, format, output.as_deref())?;
        }

        Commands::Stats => {
            let stats = commands::stats::stats(&db, &db_path)?;
            println!("{}", commands::stats::format_stats(&stats));
        }

        Commands::Reset { yes } => {
            commands::reset::execute(&mut db, yes)?;
        }
    }

    Ok(())
}
