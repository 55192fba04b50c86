//! Command Handlers module
//!
//! Each handler runs one guarded transition against the store and performs its
//! side effects after the write commits.

mod commands;
mod invalidate_validation_handler;
mod queries;
mod reject_helper_handler;
mod start_review_handler;
mod transition;
mod update_profile_handler;
mod validate_helper_handler;


use std::sync::Arc;

use crate::outbound::{Clock, EventBus, Notifier};
use crate::store::HelperStore;

pub use commands::*;
pub use invalidate_validation_handler::InvalidateValidationHandler;
pub use queries::{HelperStatusQuery, PendingReviewQuery};
pub use reject_helper_handler::RejectHelperHandler;
pub use start_review_handler::StartReviewHandler;
pub use update_profile_handler::UpdateProfileHandler;
pub use validate_helper_handler::ValidateHelperHandler;

/// Collaborators every handler is built from
#[derive(Clone)]
pub struct ReviewPorts {
    pub store: Arc<dyn HelperStore>,
    pub notifier: Arc<dyn Notifier>,
    pub events: Arc<dyn EventBus>,
    pub clock: Arc<dyn Clock>,
    pub max_retries: u32,
}

/// All review workflow operations, wired to one set of collaborators
pub struct ReviewHandlers {
    pub start_review: StartReviewHandler,
    pub validate: ValidateHelperHandler,
    pub reject: RejectHelperHandler,
    pub invalidate: InvalidateValidationHandler,
    pub update_profile: UpdateProfileHandler,
    pub pending_review: PendingReviewQuery,
    pub status: HelperStatusQuery,
}

impl ReviewHandlers {
    pub fn new(ports: ReviewPorts) -> Self {
        let ReviewPorts {
            store,
            notifier,
            events,
            clock,
            max_retries,
        } = ports;

        Self {
            start_review: StartReviewHandler::new(store.clone(), max_retries),
            validate: ValidateHelperHandler::new(store.clone(), notifier.clone(), max_retries),
            reject: RejectHelperHandler::new(store.clone(), notifier, max_retries),
            invalidate: InvalidateValidationHandler::new(store.clone(), max_retries),
            update_profile: UpdateProfileHandler::new(store.clone(), events, clock, max_retries),
            pending_review: PendingReviewQuery::new(store.clone()),
            status: HelperStatusQuery::new(store),
        }
    }
}
