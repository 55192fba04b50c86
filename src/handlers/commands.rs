//! Command definitions
//!
//! Commands represent intentions to change a helper's review state.

use serde::{Deserialize, Serialize};

use crate::aggregate::HelperValidation;
use crate::domain::ProfileUpdate;
use crate::outbound::SideEffect;

// =========================================================================
// Admin decisions
// =========================================================================

/// Command to open an admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartReviewCommand {
    pub email: String,
}

impl StartReviewCommand {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Command to approve a helper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateHelperCommand {
    pub email: String,
}

impl ValidateHelperCommand {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Command to reject a helper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectHelperCommand {
    pub email: String,
    /// `None` rejects without a reason; `Some("")` is invalid
    pub reason: Option<String>,
}

impl RejectHelperCommand {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

// =========================================================================
// Helper resubmission
// =========================================================================

/// Command to clear a stale validation or rejection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateValidationCommand {
    pub email: String,
}

impl InvalidateValidationCommand {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Command to change a helper's submission flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileCommand {
    pub email: String,
    pub update: ProfileUpdate,
}

impl UpdateProfileCommand {
    pub fn new(email: impl Into<String>, update: ProfileUpdate) -> Self {
        Self {
            email: email.into(),
            update,
        }
    }

    pub fn resubmit_credentials(email: impl Into<String>) -> Self {
        Self::new(email, ProfileUpdate::credentials())
    }

    pub fn resubmit_background_check(email: impl Into<String>) -> Self {
        Self::new(email, ProfileUpdate::background_check())
    }
}

// =========================================================================
// Results
// =========================================================================

/// Result of a successful review start
#[derive(Debug, Clone)]
pub struct StartReviewResult {
    pub helper: HelperValidation,
}

/// Result of a committed admin decision
///
/// `notification` reports the post-commit send; a failure there does not undo
/// the decision.
#[derive(Debug, Clone)]
pub struct DecisionResult {
    pub helper: HelperValidation,
    pub notification: SideEffect,
}

/// Result of an invalidation
#[derive(Debug, Clone)]
pub struct InvalidateValidationResult {
    pub helper: HelperValidation,
    /// False when there was no decision to clear
    pub invalidated: bool,
}

/// Result of a profile update
#[derive(Debug, Clone)]
pub struct UpdateProfileResult {
    pub helper: HelperValidation,
    pub invalidated: bool,
    /// Publication of `HelperCredentialsUpdated`
    pub event: SideEffect,
}
