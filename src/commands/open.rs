//! Open command - Launch profile pages in the default browser
//!
//! Mirrors the workflow of working through a company: the saved connection
//! note is shown first (for manual pasting), each selected profile URL is
//! opened in the default browser, and the selection is auto-marked visited.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use crate::store::{Database, PeopleFilter, Person};

/// Options for the open command
pub struct OpenOptions {
    /// Explicit connection ids to open
    pub ids: Vec<i64>,
    /// Fuzzy company query; opens that company's people
    pub company: Option<String>,
    /// With --company, restrict to people not yet visited
    pub unvisited: bool,
    /// Do not auto-mark the selection visited
    pub no_visit: bool,
}

/// Execute the open command
pub fn execute(db: &mut Database, options: OpenOptions) -> Result<()> {
    let people = select_people(db, &options)?;
    if people.is_empty() {
        println!("Nothing to open.");
        return Ok(());
    }

    if let Some(note) = db.setting("connection_note")? {
        if !note.is_empty() {
            println!("{}", "Connection note (paste it yourself):".bold());
            println!("{}\n", note);
        }
    }

    let mut opened = 0;
    let mut without_url = 0;
    for person in &people {
        match &person.url {
            Some(url) => {
                if let Err(e) = open::that(url) {
                    eprintln!(
                        "{} could not open {} ({}): {}",
                        "Warning:".yellow(),
                        person.display_name(),
                        url,
                        e
                    );
                    continue;
                }
                log::debug!("opened {}", url);
                opened += 1;
            }
            None => {
                eprintln!(
                    "{} {} has no profile URL",
                    "Warning:".yellow(),
                    person.display_name()
                );
                without_url += 1;
            }
        }
    }

    let mut marked = 0;
    if !options.no_visit {
        let ids: Vec<i64> = people.iter().map(|p| p.id).collect();
        marked = db.mark_visited(&ids)?;
    }

    println!(
        "Opened {} profile(s), marked {} visited",
        opened.to_string().green(),
        marked
    );
    if without_url > 0 {
        println!("{} connection(s) had no URL", without_url);
    }
    Ok(())
}

/// Resolve the selection: explicit ids plus an optional company's people
fn select_people(db: &Database, options: &OpenOptions) -> Result<Vec<Person>> {
    let mut people = db.people_by_ids(&options.ids)?;

    if let Some(query) = &options.company {
        let company = utils::resolve_company(db, query)?;
        let company_people = db.people(&PeopleFilter {
            company_ids: Some(vec![company.id]),
            unvisited_only: options.unvisited,
        })?;
        for person in company_people {
            if !people.iter().any(|p| p.id == person.id) {
                people.push(person);
            }
        }
    }

    Ok(people)
}
