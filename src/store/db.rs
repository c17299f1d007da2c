//! SQLite persistence for connection records
//!
//! One file-backed database holds everything: people, their companies and
//! positions (normalized into side tables), and process-wide settings.
//! The schema is created on open; there are no migrations to speak of.
//!
//! Company groups are derived by query, never stored. The uniqueness
//! invariant (one record per profile URL, name+company as fallback) is
//! enforced both by the duplicate check on import and by a partial unique
//! index on `people.url`.

use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;

use crate::store::normalize::{norm_company, norm_position, split_positions, OTHER_COMPANY};

/// Fallback when the `employee_threshold` setting is absent or unparseable
pub const DEFAULT_EMPLOYEE_THRESHOLD: u32 = 3;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS companies(
    id INTEGER PRIMARY KEY,
    name_original TEXT NOT NULL,
    name_norm TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS positions(
    id INTEGER PRIMARY KEY,
    name_original TEXT NOT NULL,
    name_norm TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS people(
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    url TEXT,
    email TEXT,
    company_id INTEGER NOT NULL,
    position_raw TEXT,
    connected_on TEXT,
    visited INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY(company_id) REFERENCES companies(id)
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_people_url
    ON people(url) WHERE url IS NOT NULL;
CREATE TABLE IF NOT EXISTS person_positions(
    person_id INTEGER NOT NULL,
    position_id INTEGER NOT NULL,
    PRIMARY KEY(person_id, position_id)
);
CREATE TABLE IF NOT EXISTS settings(
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// A person as stored, joined with their company name
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub url: Option<String>,
    pub email: Option<String>,
    pub company: String,
    pub position: Option<String>,
    pub connected_on: Option<String>,
    pub visited: bool,
}

impl Person {
    /// Display name, "(no name)" when both parts are empty
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "(no name)".to_string()
        } else {
            name.to_string()
        }
    }
}

/// A derived company group with its member count
#[derive(Debug, Clone, Serialize)]
pub struct CompanyGroup {
    pub id: i64,
    pub name: String,
    pub members: u64,
}

/// A row ready for insertion, as produced by the CSV importer
#[derive(Debug, Clone)]
pub struct NewConnection {
    pub first_name: String,
    pub last_name: String,
    /// Canonicalized profile URL, None when absent or unparseable
    pub url: Option<String>,
    pub email: Option<String>,
    pub company: String,
    pub position: Option<String>,
    pub connected_on: Option<String>,
}

/// Result of inserting a batch of parsed rows
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Number of new records inserted
    pub imported: usize,
    /// Display names of rows skipped as already present
    pub duplicates: Vec<String>,
}

/// Filter for people queries
#[derive(Debug, Default)]
pub struct PeopleFilter {
    /// Restrict to these company ids (None = all companies)
    pub company_ids: Option<Vec<i64>>,
    /// Only people not yet visited
    pub unvisited_only: bool,
}

/// Encapsulates all database operations for the application
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
        log::debug!("opened database at {}", path.display());
        Self::init(conn)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        conn.execute_batch(SCHEMA).context("Failed to create schema")?;
        Ok(Self { conn })
    }

    // Settings

    /// Retrieve a setting value by key
    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Failed to read setting: {}", key))
    }

    /// Insert or update a setting value
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("Failed to write setting: {}", key))?;
        Ok(())
    }

    /// Remove a setting; absent keys are a no-op
    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", [key])
            .with_context(|| format!("Failed to delete setting: {}", key))?;
        Ok(())
    }

    /// All stored settings as (key, value) pairs, ordered by key
    pub fn settings(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The minimum member count for a company group to be flagged "large"
    pub fn employee_threshold(&self) -> Result<u32> {
        Ok(self
            .setting("employee_threshold")?
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EMPLOYEE_THRESHOLD))
    }

    // Import

    /// Insert a batch of parsed rows in one transaction
    ///
    /// Rows whose uniqueness key (canonical URL, or name+company when the
    /// URL is absent) is already present are skipped and reported by
    /// display name. A failure rolls the whole batch back.
    pub fn import_rows(&mut self, rows: &[NewConnection]) -> Result<ImportOutcome> {
        let tx = self.conn.transaction().context("Failed to begin import")?;
        let mut outcome = ImportOutcome::default();

        for row in rows {
            let company_id = get_or_create_company(&tx, &row.company)?;

            if person_exists(
                &tx,
                &row.first_name,
                &row.last_name,
                company_id,
                row.url.as_deref(),
            )? {
                let name = format!("{} {}", row.first_name, row.last_name);
                let name = name.trim();
                outcome.duplicates.push(if name.is_empty() {
                    "(no name)".to_string()
                } else {
                    name.to_string()
                });
                continue;
            }

            tx.execute(
                "INSERT INTO people(first_name, last_name, url, email, company_id,
                                    position_raw, connected_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row.first_name,
                    row.last_name,
                    row.url,
                    row.email,
                    company_id,
                    row.position,
                    row.connected_on
                ],
            )?;
            let person_id = tx.last_insert_rowid();

            if let Some(position) = &row.position {
                link_positions(&tx, person_id, position)?;
            }

            outcome.imported += 1;
        }

        tx.commit().context("Failed to commit import")?;
        log::debug!(
            "imported {} rows, {} duplicates",
            outcome.imported,
            outcome.duplicates.len()
        );
        Ok(outcome)
    }

    // Visited tracking

    /// Mark people as visited; returns the number of rows changed
    pub fn mark_visited(&mut self, ids: &[i64]) -> Result<usize> {
        self.set_visited(ids, true)
    }

    /// Undo the visited flag; returns the number of rows changed
    pub fn unmark_visited(&mut self, ids: &[i64]) -> Result<usize> {
        self.set_visited(ids, false)
    }

    fn set_visited(&mut self, ids: &[i64], visited: bool) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        for id in ids {
            changed += tx.execute(
                "UPDATE people SET visited = ?1 WHERE id = ?2",
                params![visited as i64, id],
            )?;
        }
        tx.commit()?;
        Ok(changed)
    }

    /// Delete people and their position links; returns the number removed
    pub fn delete_people(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        for id in ids {
            tx.execute("DELETE FROM person_positions WHERE person_id = ?1", [id])?;
            deleted += tx.execute("DELETE FROM people WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    /// Clear every table in one transaction
    pub fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction().context("Failed to begin reset")?;
        tx.execute_batch(
            "DELETE FROM person_positions;
             DELETE FROM people;
             DELETE FROM positions;
             DELETE FROM companies;
             DELETE FROM settings;",
        )?;
        tx.commit().context("Failed to commit reset")?;
        log::debug!("database reset");
        Ok(())
    }

    // Queries

    /// People matching the filter, ordered by last then first name
    pub fn people(&self, filter: &PeopleFilter) -> Result<Vec<Person>> {
        let mut sql = String::from(
            "SELECT p.id, p.first_name, p.last_name, p.url, p.email,
                    c.name_original, p.position_raw, p.connected_on, p.visited
             FROM people p
             JOIN companies c ON p.company_id = c.id",
        );

        let mut clauses = Vec::new();
        let mut params: Vec<i64> = Vec::new();

        if let Some(ids) = &filter.company_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = std::iter::repeat("?")
                .take(ids.len())
                .collect::<Vec<_>>()
                .join(",");
            clauses.push(format!("p.company_id IN ({})", placeholders));
            params.extend(ids.iter().copied());
        }
        if filter.unvisited_only {
            clauses.push("p.visited = 0".to_string());
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY p.last_name COLLATE NOCASE, p.first_name COLLATE NOCASE");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), person_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Fetch specific people by id; unknown ids are silently absent
    pub fn people_by_ids(&self, ids: &[i64]) -> Result<Vec<Person>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = std::iter::repeat("?")
            .take(ids.len())
            .collect::<Vec<_>>()
            .join(",");
        let sql = format!(
            "SELECT p.id, p.first_name, p.last_name, p.url, p.email,
                    c.name_original, p.position_raw, p.connected_on, p.visited
             FROM people p
             JOIN companies c ON p.company_id = c.id
             WHERE p.id IN ({})
             ORDER BY p.last_name COLLATE NOCASE, p.first_name COLLATE NOCASE",
            placeholders
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(ids.iter()), person_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Every company that currently has members, with counts, ordered by name
    pub fn company_groups(&self) -> Result<Vec<CompanyGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name_original, COUNT(p.id) AS members
             FROM companies c
             JOIN people p ON p.company_id = c.id
             GROUP BY c.id
             ORDER BY c.name_original COLLATE NOCASE",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CompanyGroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    members: row.get::<_, i64>(2)? as u64,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// (visited, total) counts over all people
    pub fn visited_stats(&self) -> Result<(u64, u64)> {
        let visited: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM people WHERE visited = 1", [], |r| {
                    r.get(0)
                })?;
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?;
        Ok((visited as u64, total as u64))
    }

    /// Number of distinct normalized positions
    pub fn position_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM positions", [], |r| r.get(0))?;
        Ok(count as u64)
    }

    /// Most common positions as (name, holder count), largest first
    pub fn top_positions(&self, limit: usize) -> Result<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT pos.name_original, COUNT(pp.person_id) AS holders
             FROM positions pos
             JOIN person_positions pp ON pp.position_id = pos.id
             GROUP BY pos.id
             ORDER BY holders DESC, pos.name_original COLLATE NOCASE
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok((row.get(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        url: row.get(3)?,
        email: row.get(4)?,
        company: row.get(5)?,
        position: row.get(6)?,
        connected_on: row.get(7)?,
        visited: row.get::<_, i64>(8)? != 0,
    })
}

/// Return an existing or new company id for the given display name
fn get_or_create_company(conn: &Connection, name: &str) -> Result<i64> {
    let norm = norm_company(name);
    if let Some(id) = conn
        .query_row("SELECT id FROM companies WHERE name_norm = ?1", [&norm], |r| {
            r.get(0)
        })
        .optional()?
    {
        return Ok(id);
    }

    // First import of a group decides its display name; the sentinel group
    // always displays as the sentinel.
    let display = if norm == OTHER_COMPANY {
        OTHER_COMPANY
    } else {
        name.trim()
    };
    conn.execute(
        "INSERT INTO companies(name_original, name_norm) VALUES(?1, ?2)",
        params![display, norm],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Return an existing or new position id
fn get_or_create_position(conn: &Connection, name: &str) -> Result<i64> {
    let norm = norm_position(name);
    if let Some(id) = conn
        .query_row("SELECT id FROM positions WHERE name_norm = ?1", [&norm], |r| {
            r.get(0)
        })
        .optional()?
    {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO positions(name_original, name_norm) VALUES(?1, ?2)",
        params![name.trim(), norm],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Duplicate check: URL first, name+company as fallback
fn person_exists(
    conn: &Connection,
    first: &str,
    last: &str,
    company_id: i64,
    url: Option<&str>,
) -> Result<bool> {
    if let Some(url) = url {
        let hit = conn
            .query_row("SELECT id FROM people WHERE url = ?1", [url], |r| {
                r.get::<_, i64>(0)
            })
            .optional()?;
        if hit.is_some() {
            return Ok(true);
        }
    }

    let hit = conn
        .query_row(
            "SELECT id FROM people
             WHERE first_name = ?1 AND last_name = ?2 AND company_id = ?3",
            params![first, last, company_id],
            |r| r.get::<_, i64>(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

/// Split a raw position string and link each part to the person
fn link_positions(conn: &Connection, person_id: i64, raw: &str) -> Result<()> {
    for part in split_positions(raw) {
        let position_id = get_or_create_position(conn, &part)?;
        conn.execute(
            "INSERT OR IGNORE INTO person_positions(person_id, position_id) VALUES(?1, ?2)",
            params![person_id, position_id],
        )?;
    }
    Ok(())
}
