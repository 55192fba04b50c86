//! Reject Helper Handler
//!
//! Rejects a helper, optionally with a reason, and notifies them after commit.

use std::sync::Arc;

use crate::error::AppError;
use crate::outbound::{Notifier, SideEffect};
use crate::store::HelperStore;

use super::commands::{DecisionResult, RejectHelperCommand};
use super::transition::TransitionExecutor;

/// Handler for helper rejection
pub struct RejectHelperHandler {
    transitions: TransitionExecutor,
    notifier: Arc<dyn Notifier>,
}

impl RejectHelperHandler {
    pub fn new(store: Arc<dyn HelperStore>, notifier: Arc<dyn Notifier>, max_retries: u32) -> Self {
        Self {
            transitions: TransitionExecutor::new(store, max_retries),
            notifier,
        }
    }

    /// Execute the reject command
    pub async fn execute(&self, command: RejectHelperCommand) -> Result<DecisionResult, AppError> {
        let reason = command.reason.as_deref();
        let committed = self
            .transitions
            .execute(&command.email, |helper| Ok(vec![helper.reject(reason)?]))
            .await?;

        // The stored reason is the trimmed one
        let reason = committed.helper.rejection_reason();
        tracing::info!(
            "Helper {} rejected ({})",
            command.email,
            reason.unwrap_or("no reason given")
        );

        let notification =
            SideEffect::from_result(self.notifier.notify_rejected(&command.email, reason).await);
        if let SideEffect::Failed(err) = &notification {
            tracing::warn!("Rejection notification for {} failed: {}", command.email, err);
        }

        Ok(DecisionResult {
            helper: committed.helper,
            notification,
        })
    }
}
