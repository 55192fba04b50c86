//! Store Errors
//!
//! Infrastructure failures. Never used for guard violations.

/// Errors that can occur in the helper store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Optimistic concurrency conflict
    #[error("Concurrency conflict for helper {email}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        email: String,
        expected: i64,
        actual: i64,
    },

    /// Record disappeared between read and write
    #[error("Helper record not found: {0}")]
    NotFound(String),

    #[error("Helper record already exists: {0}")]
    AlreadyExists(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Maximum retries exceeded
    #[error("Maximum retries exceeded for atomic transition")]
    MaxRetriesExceeded,

    /// Stored row cannot be turned back into a record
    #[error("Invalid helper record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    /// Check if this error is a concurrency conflict
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, StoreError::ConcurrencyConflict { .. })
    }
}
