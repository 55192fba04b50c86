//! Read-side queries
//!
//! Pure reads; no guards, no writes.

use std::sync::Arc;

use crate::aggregate::HelperValidation;
use crate::domain::DomainError;
use crate::error::AppError;
use crate::store::HelperStore;

/// Lists helpers ready for admin attention
///
/// Uses the full pending-review predicate, so rejected helpers and helpers
/// already under review never show up. No ordering is guaranteed.
pub struct PendingReviewQuery {
    store: Arc<dyn HelperStore>,
}

impl PendingReviewQuery {
    pub fn new(store: Arc<dyn HelperStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<HelperValidation>, AppError> {
        let pending = self.store.find_pending_review().await?;
        tracing::debug!("{} helpers pending review", pending.len());
        Ok(pending)
    }
}

/// Looks up a single helper's review state
pub struct HelperStatusQuery {
    store: Arc<dyn HelperStore>,
}

impl HelperStatusQuery {
    pub fn new(store: Arc<dyn HelperStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, email: &str) -> Result<HelperValidation, AppError> {
        let helper = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::helper_not_found(email))?;
        Ok(helper)
    }
}
