//! SQLite DDL for the school database.
//!
//! Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.

use rusqlite::Connection;

/// Status value marking a row as waiting on a teacher
pub(crate) const PENDING_STATUS: &str = "pending";

pub(crate) const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS bullying_reports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    student     TEXT NOT NULL,
    summary     TEXT NOT NULL DEFAULT '',
    status      TEXT NOT NULL DEFAULT 'pending',   -- pending | resolved
    reported_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS literacy_logs (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    student      TEXT NOT NULL,
    title        TEXT NOT NULL DEFAULT '',
    status       TEXT NOT NULL DEFAULT 'pending',  -- pending | graded
    grade        TEXT,
    submitted_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_bullying_status ON bullying_reports(status);
CREATE INDEX IF NOT EXISTS idx_literacy_status ON literacy_logs(status);
"#;

/// Apply the full schema to an open connection.
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
