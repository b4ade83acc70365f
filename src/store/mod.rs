//! Per-user persistence: request history and suggestion counters.
//!
//! One SQLite database holds both relations behind a single
//! `Mutex<Connection>`. Every check-then-write runs as one conditional
//! statement (or an update-then-insert pair) under that lock, so two
//! concurrent calls can neither double-insert a history row nor lose a
//! counter bump.

mod schema;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, params};

use crate::error::{Result, ScoutError};
use crate::types::SuggestionCount;

/// SQLite-backed store for request history and suggestion statistics.
///
/// Thread-safe via an internal `Mutex<Connection>`. All writes are
/// serialized; reads also take the mutex for simplicity, with WAL mode
/// on the SQLite side.
#[derive(Debug)]
pub struct SuggestionStore {
    conn: Mutex<Connection>,
}

impl SuggestionStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::apply_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a fresh in-memory database. Nothing survives the store, which
    /// suits tests and ephemeral deployments.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::apply_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Record a search request, at most once per exact text per user.
    ///
    /// The existence check and the insert are one statement, so repeated
    /// or concurrent calls with the same text leave a single row.
    pub fn record_request(&self, user: &str, request: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO history (user, request) \
             SELECT ?1, ?2 \
             WHERE NOT EXISTS (SELECT 1 FROM history WHERE user = ?1 AND request = ?2)",
            params![user, request],
        )?;
        Ok(())
    }

    /// All request texts for a user, oldest first.
    pub fn requests(&self, user: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT request FROM history WHERE user = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![user], |row| row.get(0))?;

        let mut requests = Vec::new();
        for r in rows {
            requests.push(r?);
        }
        Ok(requests)
    }

    /// Count a film suggestion: bump the `(user, film)` counter, or start
    /// it at 1 when no row exists yet.
    pub fn record_suggestion(&self, user: &str, film: &str) -> Result<()> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE stats SET showing = showing + 1 WHERE user = ?1 AND film = ?2",
            params![user, film],
        )?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO stats (user, film, showing) VALUES (?1, ?2, 1)",
                params![user, film],
            )?;
        }
        Ok(())
    }

    /// All `(film, count)` pairs for a user, unordered. Presentation owns
    /// any ranking.
    pub fn suggestions(&self, user: &str) -> Result<Vec<SuggestionCount>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT film, showing FROM stats WHERE user = ?1")?;
        let rows = stmt.query_map(params![user], |row| {
            Ok(SuggestionCount {
                film: row.get(0)?,
                showings: row.get(1)?,
            })
        })?;

        let mut suggestions = Vec::new();
        for r in rows {
            suggestions.push(r?);
        }
        Ok(suggestions)
    }

    /// Acquire the connection mutex.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ScoutError::Lock(e.to_string()))
    }
}
