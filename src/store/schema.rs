//! SQLite DDL for the suggestion store.
//!
//! All `CREATE TABLE` / `CREATE INDEX` statements live here so they are
//! reviewable and testable in isolation.

use rusqlite::Connection;

/// Complete DDL for the suggestion database.
///
/// Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.
pub(crate) const SCHEMA_SQL: &str = r#"
-- Enable WAL mode for concurrent reads during writes.
PRAGMA journal_mode = WAL;

-- Per-user search request history, insertion-ordered via rowid.
CREATE TABLE IF NOT EXISTS history (
    user    TEXT NOT NULL,
    request TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_history_user ON history(user);

-- Per-user suggestion counters, one row per (user, film).
CREATE TABLE IF NOT EXISTS stats (
    user    TEXT NOT NULL,
    film    TEXT NOT NULL,
    showing INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_stats_user_film ON stats(user, film);
"#;

/// Apply the full schema to an open connection.
///
/// Safe to call multiple times since all statements use `IF NOT EXISTS`.
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
