//! Validate Helper Handler
//!
//! Approves a helper and notifies them once the decision is committed.

use std::sync::Arc;

use crate::error::AppError;
use crate::outbound::{Notifier, SideEffect};
use crate::store::HelperStore;

use super::commands::{DecisionResult, ValidateHelperCommand};
use super::transition::TransitionExecutor;

/// Handler for helper validation
pub struct ValidateHelperHandler {
    transitions: TransitionExecutor,
    notifier: Arc<dyn Notifier>,
}

impl ValidateHelperHandler {
    pub fn new(store: Arc<dyn HelperStore>, notifier: Arc<dyn Notifier>, max_retries: u32) -> Self {
        Self {
            transitions: TransitionExecutor::new(store, max_retries),
            notifier,
        }
    }

    /// Execute the validate command
    ///
    /// Completes any open review. The notification is attempted exactly once
    /// after commit.
    pub async fn execute(
        &self,
        command: ValidateHelperCommand,
    ) -> Result<DecisionResult, AppError> {
        let committed = self
            .transitions
            .execute(&command.email, |helper| Ok(vec![helper.validate()?]))
            .await?;

        tracing::info!("Helper {} validated", command.email);

        let notification =
            SideEffect::from_result(self.notifier.notify_validated(&command.email).await);
        if let SideEffect::Failed(reason) = &notification {
            tracing::warn!(
                "Validation notification for {} failed: {}",
                command.email,
                reason
            );
        }

        Ok(DecisionResult {
            helper: committed.helper,
            notification,
        })
    }
}
