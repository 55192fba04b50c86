//! Invalidate Validation Handler
//!
//! Clears a prior validation or rejection so the helper re-enters the queue.

use std::sync::Arc;

use crate::aggregate::ReviewTransition;
use crate::error::AppError;
use crate::store::HelperStore;

use super::commands::{InvalidateValidationCommand, InvalidateValidationResult};
use super::transition::TransitionExecutor;

/// Handler for invalidating a stale decision
pub struct InvalidateValidationHandler {
    transitions: TransitionExecutor,
}

impl InvalidateValidationHandler {
    pub fn new(store: Arc<dyn HelperStore>, max_retries: u32) -> Self {
        Self {
            transitions: TransitionExecutor::new(store, max_retries),
        }
    }

    /// Execute the invalidate command
    ///
    /// Idempotent: an undecided helper is returned unchanged without a write.
    pub async fn execute(
        &self,
        command: InvalidateValidationCommand,
    ) -> Result<InvalidateValidationResult, AppError> {
        let committed = self
            .transitions
            .execute(&command.email, |helper| Ok(helper.invalidate()?.into_iter().collect()))
            .await?;

        let invalidated = committed.transitions.contains(&ReviewTransition::Invalidated);
        if invalidated {
            tracing::info!("Prior decision for helper {} invalidated", command.email);
        } else {
            tracing::debug!("Helper {} had no decision to invalidate", command.email);
        }

        Ok(InvalidateValidationResult {
            helper: committed.helper,
            invalidated,
        })
    }
}
