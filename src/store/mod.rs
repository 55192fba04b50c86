//! Helper Store module
//!
//! Persistence port for helper validation records, with an in-memory adapter
//! and a PostgreSQL adapter. Writes are conditioned on the version that was read.

mod error;
mod memory;
mod postgres;
mod seed;

use async_trait::async_trait;

use crate::aggregate::HelperValidation;

pub use error::StoreError;
pub use memory::MemoryHelperStore;
pub use postgres::PgHelperStore;
pub use seed::{load_seed_file, parse_seed, HelperSeed, SeedError};

/// Storage abstraction so handlers can run against any backend
#[async_trait]
pub trait HelperStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<HelperValidation>, StoreError>;

    async fn find_all(&self) -> Result<Vec<HelperValidation>, StoreError>;

    /// Records whose state makes them ready for admin attention
    async fn find_pending_review(&self) -> Result<Vec<HelperValidation>, StoreError> {
        let mut records = self.find_all().await?;
        records.retain(HelperValidation::is_pending_review);
        Ok(records)
    }

    /// Create a record; used by the onboarding flow
    async fn insert(&self, record: HelperValidation) -> Result<HelperValidation, StoreError>;

    /// Commit `record` if the stored version still equals `expected_version`
    ///
    /// Returns the committed record carrying its new version.
    async fn update(
        &self,
        record: HelperValidation,
        expected_version: i64,
    ) -> Result<HelperValidation, StoreError>;
}
