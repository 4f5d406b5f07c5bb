//! Pending item repository port interface

use async_trait::async_trait;
use thiserror::Error;

/// Repository errors
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Database not found at {0}. Run 'teacher-tasks db init' to create it.")]
    NotFound(String),

    #[error("Failed to open database: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Port for the store that owns bullying reports and literacy logs.
///
/// Both queries are point-in-time reads; nothing is cached between calls.
#[async_trait]
pub trait PendingItemRepository: Send + Sync {
    /// Count bullying reports that are still pending.
    async fn pending_bullying_count(&self) -> Result<u32, RepositoryError>;

    /// Count literacy logs that have not been graded.
    async fn pending_literacy_count(&self) -> Result<u32, RepositoryError>;
}

/// Blanket implementation for boxed repository types
#[async_trait]
impl PendingItemRepository for Box<dyn PendingItemRepository> {
    async fn pending_bullying_count(&self) -> Result<u32, RepositoryError> {
        self.as_ref().pending_bullying_count().await
    }

    async fn pending_literacy_count(&self) -> Result<u32, RepositoryError> {
        self.as_ref().pending_literacy_count().await
    }
}
