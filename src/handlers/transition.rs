//! Atomic read-guard-write
//!
//! Every transition reads the record, evaluates guards on that snapshot and
//! writes back conditioned on the version it read. A version conflict means
//! another writer committed first; the guards are then re-evaluated against
//! the winner's state.

use std::sync::Arc;
use std::time::Duration;

use crate::aggregate::{HelperValidation, ReviewTransition};
use crate::domain::DomainError;
use crate::error::AppError;
use crate::store::{HelperStore, StoreError};

/// Outcome of a transition that passed its guards
#[derive(Debug, Clone)]
pub(crate) struct Committed {
    pub helper: HelperValidation,
    /// Empty when the guards allowed the call but nothing changed
    pub transitions: Vec<ReviewTransition>,
}

#[derive(Clone)]
pub(crate) struct TransitionExecutor {
    store: Arc<dyn HelperStore>,
    max_retries: u32,
}

impl TransitionExecutor {
    pub fn new(store: Arc<dyn HelperStore>, max_retries: u32) -> Self {
        Self {
            store,
            max_retries: max_retries.max(1),
        }
    }

    pub async fn execute<F>(&self, email: &str, decide: F) -> Result<Committed, AppError>
    where
        F: Fn(&HelperValidation) -> Result<Vec<ReviewTransition>, DomainError> + Send + Sync,
    {
        for attempt in 0..self.max_retries {
            let current = self
                .store
                .find_by_email(email)
                .await?
                .ok_or_else(|| DomainError::helper_not_found(email))?;

            let transitions = decide(&current)?;
            if transitions.is_empty() {
                return Ok(Committed {
                    helper: current,
                    transitions,
                });
            }

            let expected_version = current.version();
            let next = transitions
                .iter()
                .cloned()
                .fold(current, HelperValidation::apply);

            match self.store.update(next, expected_version).await {
                Ok(helper) => {
                    let names: Vec<&str> = transitions.iter().map(ReviewTransition::name).collect();
                    tracing::debug!(
                        "Helper {} committed [{}] at version {}",
                        email,
                        names.join(", "),
                        helper.version()
                    );
                    return Ok(Committed { helper, transitions });
                }
                Err(e) if e.is_concurrency_conflict() && attempt + 1 < self.max_retries => {
                    let delay = Duration::from_millis(50 * (attempt as u64 + 1));
                    tracing::warn!(
                        "Concurrency conflict on helper {}, retrying (attempt {}/{})",
                        email,
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_concurrency_conflict() => break,
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::MaxRetriesExceeded.into())
    }
}
