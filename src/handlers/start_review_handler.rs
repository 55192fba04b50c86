//! Start Review Handler
//!
//! Moves a pending helper under admin review. Silent to the helper.

use std::sync::Arc;

use crate::error::AppError;
use crate::store::HelperStore;

use super::commands::{StartReviewCommand, StartReviewResult};
use super::transition::TransitionExecutor;

/// Handler for opening an admin review
pub struct StartReviewHandler {
    transitions: TransitionExecutor,
}

impl StartReviewHandler {
    pub fn new(store: Arc<dyn HelperStore>, max_retries: u32) -> Self {
        Self {
            transitions: TransitionExecutor::new(store, max_retries),
        }
    }

    /// Execute the start review command
    ///
    /// Not idempotent: a second call fails with `AlreadyUnderReview`.
    pub async fn execute(
        &self,
        command: StartReviewCommand,
    ) -> Result<StartReviewResult, AppError> {
        let committed = self
            .transitions
            .execute(&command.email, |helper| Ok(vec![helper.start_review()?]))
            .await?;

        tracing::info!(
            "Review started for helper {} (version {})",
            command.email,
            committed.helper.version()
        );

        Ok(StartReviewResult {
            helper: committed.helper,
        })
    }
}
