//! Helper Validation Aggregate
//!
//! Review state of a single helper, keyed by email. Guards live here; storage and
//! side effects are the handlers' concern.

use crate::domain::{AdminDecision, DomainError, ProfileUpdate, Requirement};

/// Review status
///
/// `PendingReview` means "undecided and not being reviewed". Whether the helper
/// actually belongs in the review queue also depends on the prerequisite flags,
/// see [`HelperValidation::is_pending_review`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReviewStatus {
    #[default]
    PendingReview,
    UnderReview,
    Validated,
    Rejected { reason: Option<String> },
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::PendingReview => "pending_review",
            ReviewStatus::UnderReview => "under_review",
            ReviewStatus::Validated => "validated",
            ReviewStatus::Rejected { .. } => "rejected",
        }
    }
}

/// A legal state change produced by a guard and applied with [`HelperValidation::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewTransition {
    ReviewStarted,
    Validated,
    Rejected { reason: Option<String> },
    /// A prior validation or rejection was cleared
    Invalidated,
    SubmissionsUpdated(ProfileUpdate),
}

impl ReviewTransition {
    pub fn name(&self) -> &'static str {
        match self {
            ReviewTransition::ReviewStarted => "review_started",
            ReviewTransition::Validated => "validated",
            ReviewTransition::Rejected { .. } => "rejected",
            ReviewTransition::Invalidated => "invalidated",
            ReviewTransition::SubmissionsUpdated(_) => "submissions_updated",
        }
    }
}

/// Helper Validation Aggregate
///
/// Built from storage or the seed file; state changes only go through the guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperValidation {
    /// Stable identifier (unique)
    email: String,

    firstname: String,

    lastname: String,

    /// Owned by the email confirmation flow
    email_confirmed: bool,

    credentials_submitted: bool,

    background_check_submitted: bool,

    status: ReviewStatus,

    /// Committed write count, used for optimistic locking
    version: i64,
}

impl HelperValidation {
    /// Create a fresh record with nothing confirmed or submitted
    pub fn new(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            email_confirmed: false,
            credentials_submitted: false,
            background_check_submitted: false,
            status: ReviewStatus::PendingReview,
            version: 0,
        }
    }

    pub fn with_email_confirmed(mut self, confirmed: bool) -> Self {
        self.email_confirmed = confirmed;
        self
    }

    pub fn with_submissions(mut self, credentials: bool, background_check: bool) -> Self {
        self.credentials_submitted = credentials;
        self.background_check_submitted = background_check;
        self
    }

    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Guards
    // =========================================================================

    /// Begin an admin review
    pub fn start_review(&self) -> Result<ReviewTransition, DomainError> {
        match self.status {
            ReviewStatus::Validated => Err(DomainError::AlreadyValidated),
            ReviewStatus::Rejected { .. } => Err(DomainError::HelperRejected),
            ReviewStatus::UnderReview => Err(DomainError::AlreadyUnderReview),
            ReviewStatus::PendingReview if !self.is_pending_review() => {
                Err(DomainError::NotPendingReview)
            }
            ReviewStatus::PendingReview => Ok(ReviewTransition::ReviewStarted),
        }
    }

    /// Approve the helper, closing any open review
    pub fn validate(&self) -> Result<ReviewTransition, DomainError> {
        if self.rejected() {
            return Err(DomainError::CannotValidateRejected);
        }
        if !self.email_confirmed {
            return Err(DomainError::unconfirmed_email(AdminDecision::Validate));
        }
        if self.profile_validated() {
            return Err(DomainError::AlreadyValidated);
        }

        let missing = self.missing_requirements();
        if !missing.is_empty() {
            return Err(DomainError::IncompleteRequirements { missing });
        }

        Ok(ReviewTransition::Validated)
    }

    /// Reject the helper
    ///
    /// `None` rejects without a reason; an explicit blank reason is invalid input.
    pub fn reject(&self, reason: Option<&str>) -> Result<ReviewTransition, DomainError> {
        if self.rejected() {
            return Err(DomainError::AlreadyRejected);
        }
        if !self.email_confirmed {
            return Err(DomainError::unconfirmed_email(AdminDecision::Reject));
        }

        let reason = match reason.map(str::trim) {
            Some("") => return Err(DomainError::MissingReason),
            Some(reason) => Some(reason.to_string()),
            None => None,
        };

        // Rejection never overrides a validation.
        if self.profile_validated() {
            return Err(DomainError::AlreadyValidated);
        }

        Ok(ReviewTransition::Rejected { reason })
    }

    /// Clear a stale validation or rejection
    ///
    /// Returns `None` when there is no decision to clear.
    pub fn invalidate(&self) -> Result<Option<ReviewTransition>, DomainError> {
        match self.status {
            ReviewStatus::UnderReview => Err(DomainError::HelperUnderReview),
            ReviewStatus::Validated | ReviewStatus::Rejected { .. } => {
                Ok(Some(ReviewTransition::Invalidated))
            }
            ReviewStatus::PendingReview => Ok(None),
        }
    }

    /// Apply submission flag changes, invalidating first when credentials are touched
    ///
    /// Either every returned transition is legal or none is returned.
    pub fn update_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<Vec<ReviewTransition>, DomainError> {
        if !update.touches_credentials() {
            return Ok(Vec::new());
        }

        let mut transitions = Vec::with_capacity(2);
        if let Some(invalidated) = self.invalidate()? {
            transitions.push(invalidated);
        }
        transitions.push(ReviewTransition::SubmissionsUpdated(update));

        Ok(transitions)
    }

    /// Apply a transition produced by one of the guards
    pub fn apply(mut self, transition: ReviewTransition) -> Self {
        match transition {
            ReviewTransition::ReviewStarted => self.status = ReviewStatus::UnderReview,
            ReviewTransition::Validated => self.status = ReviewStatus::Validated,
            ReviewTransition::Rejected { reason } => {
                self.status = ReviewStatus::Rejected { reason };
            }
            ReviewTransition::Invalidated => self.status = ReviewStatus::PendingReview,
            ReviewTransition::SubmissionsUpdated(update) => {
                if let Some(credentials) = update.credentials_submitted {
                    self.credentials_submitted = credentials;
                }
                if let Some(background_check) = update.background_check_submitted {
                    self.background_check_submitted = background_check;
                }
            }
        }
        self
    }

    // =========================================================================
    // Derived predicates
    // =========================================================================

    /// Ready for admin attention
    pub fn is_pending_review(&self) -> bool {
        self.status == ReviewStatus::PendingReview
            && self.email_confirmed
            && self.credentials_submitted
            && self.background_check_submitted
    }

    pub fn can_apply_to_events(&self) -> bool {
        self.profile_validated() && !self.rejected()
    }

    pub fn missing_requirements(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        if !self.credentials_submitted {
            missing.push(Requirement::Credentials);
        }
        if !self.background_check_submitted {
            missing.push(Requirement::BackgroundCheck);
        }
        missing
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed
    }

    pub fn credentials_submitted(&self) -> bool {
        self.credentials_submitted
    }

    pub fn background_check_submitted(&self) -> bool {
        self.background_check_submitted
    }

    pub fn status(&self) -> &ReviewStatus {
        &self.status
    }

    pub fn profile_validated(&self) -> bool {
        self.status == ReviewStatus::Validated
    }

    pub fn rejected(&self) -> bool {
        matches!(self.status, ReviewStatus::Rejected { .. })
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match &self.status {
            ReviewStatus::Rejected { reason } => reason.as_deref(),
            _ => None,
        }
    }

    pub fn under_review(&self) -> bool {
        self.status == ReviewStatus::UnderReview
    }

    pub fn version(&self) -> i64 {
        self.version
    }
}
