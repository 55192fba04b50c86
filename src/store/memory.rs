//! In-memory helper store
//!
//! Backs local development and tests. The write lock is held across the version
//! check and the write, so conditional updates are atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::aggregate::HelperValidation;

use super::{HelperStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryHelperStore {
    records: RwLock<HashMap<String, HelperValidation>>,
}

impl MemoryHelperStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_records(records: impl IntoIterator<Item = HelperValidation>) -> Self {
        let records = records
            .into_iter()
            .map(|record| {
                let version = record.version().max(1);
                (record.email().to_string(), record.with_version(version))
            })
            .collect();

        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl HelperStore for MemoryHelperStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<HelperValidation>, StoreError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<HelperValidation>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn insert(&self, record: HelperValidation) -> Result<HelperValidation, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(record.email()) {
            return Err(StoreError::AlreadyExists(record.email().to_string()));
        }

        let record = record.with_version(1);
        records.insert(record.email().to_string(), record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        record: HelperValidation,
        expected_version: i64,
    ) -> Result<HelperValidation, StoreError> {
        let mut records = self.records.write().await;
        let current = records
            .get(record.email())
            .ok_or_else(|| StoreError::NotFound(record.email().to_string()))?;

        if current.version() != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                email: record.email().to_string(),
                expected: expected_version,
                actual: current.version(),
            });
        }

        let committed = record.with_version(expected_version + 1);
        records.insert(committed.email().to_string(), committed.clone());
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ReviewStatus;

    fn helper(email: &str) -> HelperValidation {
        HelperValidation::new(email, "Jane", "Doe")
            .with_email_confirmed(true)
            .with_submissions(true, true)
    }

    #[tokio::test]
    async fn test_insert_assigns_first_version() {
        let store = MemoryHelperStore::new();

        let stored = store.insert(helper("jane@x.com")).await.unwrap();

        assert_eq!(stored.version(), 1);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
        assert!(matches!(
            store.insert(helper("jane@x.com")).await,
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_stale_version() {
        let store = MemoryHelperStore::new();
        let stored = store.insert(helper("jane@x.com")).await.unwrap();

        let first = stored.clone().with_status(ReviewStatus::UnderReview);
        let committed = store.update(first, stored.version()).await.unwrap();
        assert_eq!(committed.version(), 2);

        let stale = stored.clone().with_status(ReviewStatus::Validated);
        let err = store.update(stale, stored.version()).await.unwrap_err();
        assert!(err.is_concurrency_conflict());

        let current = store.find_by_email("jane@x.com").await.unwrap().unwrap();
        assert!(current.under_review());
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryHelperStore::new();

        let err = store.update(helper("ghost@x.com"), 1).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(email) if email == "ghost@x.com"));
    }

    #[tokio::test]
    async fn test_find_pending_review_filters_full_predicate() {
        let store = MemoryHelperStore::with_records([
            helper("a@x.com"),
            helper("b@x.com").with_status(ReviewStatus::UnderReview),
            helper("c@x.com").with_status(ReviewStatus::Rejected { reason: None }),
        ]);

        let pending = store.find_pending_review().await.unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].email(), "a@x.com");
    }
}
