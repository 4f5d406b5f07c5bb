//! SQLite-backed pending item repository.
//!
//! Reads bullying reports and literacy logs from a single database file.
//! Queries run on the blocking pool so the async runtime is never stalled.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use crate::application::ports::{PendingItemRepository, RepositoryError};

use super::schema::{apply_schema, PENDING_STATUS};

/// SQLite repository for pending items
pub struct SqliteRepository {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    /// Open an existing database. Fails if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RepositoryError::NotFound(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RepositoryError::Open(e.to_string()))?;

        Ok(Self::from_connection(path.to_path_buf(), conn))
    }

    /// Create the database (and parent directories) if needed and apply the schema.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RepositoryError::Open(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| RepositoryError::Open(e.to_string()))?;
        apply_schema(&conn).map_err(|e| RepositoryError::Open(e.to_string()))?;

        Ok(Self::from_connection(path.to_path_buf(), conn))
    }

    /// In-memory database with the schema applied
    pub fn in_memory() -> Result<Self, RepositoryError> {
        let conn = Connection::open_in_memory().map_err(|e| RepositoryError::Open(e.to_string()))?;
        apply_schema(&conn).map_err(|e| RepositoryError::Open(e.to_string()))?;
        Ok(Self::from_connection(PathBuf::from(":memory:"), conn))
    }

    fn from_connection(path: PathBuf, conn: Connection) -> Self {
        Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a bullying report; returns its row id
    pub fn insert_bullying_report(
        &self,
        student: &str,
        summary: &str,
        status: &str,
    ) -> Result<i64, RepositoryError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO bullying_reports (student, summary, status) VALUES (?1, ?2, ?3)",
            params![student, summary, status],
        )
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(conn.last_insert_rowid())
    }

    /// Record a literacy log; returns its row id
    pub fn insert_literacy_log(
        &self,
        student: &str,
        title: &str,
        grade: Option<&str>,
    ) -> Result<i64, RepositoryError> {
        let status = if grade.is_some() { "graded" } else { PENDING_STATUS };
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO literacy_logs (student, title, status, grade) VALUES (?1, ?2, ?3, ?4)",
            params![student, title, status, grade],
        )
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(conn.last_insert_rowid())
    }

    /// Run a pending-count query on the blocking pool
    async fn count_pending(&self, sql: &'static str) -> Result<u32, RepositoryError> {
        let conn = Arc::clone(&self.conn);

        let count = tokio::task::spawn_blocking(move || -> Result<i64, RepositoryError> {
            let conn = lock(&conn)?;
            conn.query_row(sql, params![PENDING_STATUS], |row| row.get(0))
                .map_err(|e| RepositoryError::Query(e.to_string()))
        })
        .await
        .map_err(|e| RepositoryError::Unavailable(format!("Task join error: {}", e)))??;

        u32::try_from(count).map_err(|_| RepositoryError::Query(format!("count out of range: {}", count)))
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<std::sync::MutexGuard<'_, Connection>, RepositoryError> {
    conn.lock()
        .map_err(|e| RepositoryError::Unavailable(format!("lock poisoned: {}", e)))
}

#[async_trait]
impl PendingItemRepository for SqliteRepository {
    async fn pending_bullying_count(&self) -> Result<u32, RepositoryError> {
        let count = self
            .count_pending("SELECT COUNT(*) FROM bullying_reports WHERE status = ?1")
            .await?;
        debug!(count, "pending bullying reports");
        Ok(count)
    }

    async fn pending_literacy_count(&self) -> Result<u32, RepositoryError> {
        let count = self
            .count_pending("SELECT COUNT(*) FROM literacy_logs WHERE status = ?1")
            .await?;
        debug!(count, "pending literacy logs");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_database_has_nothing_pending() {
        let repo = SqliteRepository::in_memory().unwrap();
        assert_eq!(repo.pending_bullying_count().await.unwrap(), 0);
        assert_eq!(repo.pending_literacy_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn counts_only_pending_rows() {
        let repo = SqliteRepository::in_memory().unwrap();
        repo.insert_bullying_report("Ada", "name calling", "pending").unwrap();
        repo.insert_bullying_report("Ben", "pushing", "pending").unwrap();
        repo.insert_bullying_report("Cy", "resolved last week", "resolved").unwrap();
        repo.insert_literacy_log("Ada", "Charlotte's Web", None).unwrap();
        repo.insert_literacy_log("Ben", "Matilda", Some("B+")).unwrap();

        assert_eq!(repo.pending_bullying_count().await.unwrap(), 2);
        assert_eq!(repo.pending_literacy_count().await.unwrap(), 1);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteRepository::open(dir.path().join("missing.db"));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_then_open_sees_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("school.db");

        let created = SqliteRepository::create(&path).unwrap();
        created.insert_literacy_log("Dee", "Holes", None).unwrap();
        drop(created);

        let opened = SqliteRepository::open(&path).unwrap();
        assert_eq!(opened.path(), path.as_path());
        assert_eq!(opened.pending_literacy_count().await.unwrap(), 1);
    }

    #[test]
    fn create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("school.db");
        SqliteRepository::create(&path).unwrap();
        SqliteRepository::create(&path).unwrap();
    }
}
