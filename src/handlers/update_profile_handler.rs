//! Update Profile Handler
//!
//! Applies credential and background-check resubmissions. Touching either field
//! invalidates a prior decision in the same versioned write, then publishes
//! `HelperCredentialsUpdated` once the write has committed.

use std::sync::Arc;

use crate::aggregate::ReviewTransition;
use crate::domain::HelperEvent;
use crate::error::AppError;
use crate::outbound::{Clock, EventBus, SideEffect};
use crate::store::HelperStore;

use super::commands::{UpdateProfileCommand, UpdateProfileResult};
use super::transition::TransitionExecutor;

/// Handler for helper profile updates
pub struct UpdateProfileHandler {
    transitions: TransitionExecutor,
    events: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl UpdateProfileHandler {
    pub fn new(
        store: Arc<dyn HelperStore>,
        events: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        max_retries: u32,
    ) -> Self {
        Self {
            transitions: TransitionExecutor::new(store, max_retries),
            events,
            clock,
        }
    }

    /// Execute the update profile command
    pub async fn execute(
        &self,
        command: UpdateProfileCommand,
    ) -> Result<UpdateProfileResult, AppError> {
        let update = command.update;
        let committed = self
            .transitions
            .execute(&command.email, |helper| helper.update_profile(update))
            .await?;

        if committed.transitions.is_empty() {
            return Ok(UpdateProfileResult {
                helper: committed.helper,
                invalidated: false,
                event: SideEffect::Skipped,
            });
        }

        let invalidated = committed.transitions.contains(&ReviewTransition::Invalidated);
        tracing::info!(
            "Submissions updated for helper {}{}",
            command.email,
            if invalidated { ", prior decision invalidated" } else { "" }
        );

        let event = HelperEvent::HelperCredentialsUpdated {
            email: command.email.clone(),
            occurred_at: self.clock.now(),
        };
        let event = SideEffect::from_result(self.events.publish(event).await);
        if let SideEffect::Failed(err) = &event {
            tracing::warn!(
                "HelperCredentialsUpdated for {} not published: {}",
                command.email,
                err
            );
        }

        Ok(UpdateProfileResult {
            helper: committed.helper,
            invalidated,
            event,
        })
    }
}
