//! Domain Error Types
//!
//! Guard failures of the review workflow. Independent of storage and transport.

use thiserror::Error;

/// Documents a helper must have submitted before a decision can be made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Credentials,
    BackgroundCheck,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Credentials => "credentials",
            Requirement::BackgroundCheck => "background check",
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision an admin attempted on a helper whose email is not confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDecision {
    Validate,
    Reject,
}

impl std::fmt::Display for AdminDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminDecision::Validate => f.write_str("validate"),
            AdminDecision::Reject => f.write_str("reject"),
        }
    }
}

/// Review workflow errors
///
/// Messages are user-facing and stable; callers map them 1:1 to responses.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// No record exists for the given email
    #[error("Helper not found: {0}")]
    HelperNotFound(String),

    #[error("Helper is already validated")]
    AlreadyValidated,

    /// Raised when starting a review on a rejected helper
    #[error("Helper has been rejected")]
    HelperRejected,

    /// Raised when rejecting a helper twice
    #[error("Helper is already rejected")]
    AlreadyRejected,

    #[error("Helper is already under review")]
    AlreadyUnderReview,

    #[error("Helper is not pending review")]
    NotPendingReview,

    #[error("Cannot validate rejected helper")]
    CannotValidateRejected,

    #[error("Cannot {decision} helper with unconfirmed email")]
    UnconfirmedEmail { decision: AdminDecision },

    #[error("Missing requirements: {}", join_requirements(.missing))]
    IncompleteRequirements { missing: Vec<Requirement> },

    #[error("Rejection reason is required")]
    MissingReason,

    #[error("Cannot resubmit documents while under admin review")]
    HelperUnderReview,
}

fn join_requirements(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(Requirement::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    pub fn helper_not_found(email: impl Into<String>) -> Self {
        Self::HelperNotFound(email.into())
    }

    pub fn unconfirmed_email(decision: AdminDecision) -> Self {
        Self::UnconfirmedEmail { decision }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::HelperNotFound(_) => "helper_not_found",
            Self::AlreadyValidated => "already_validated",
            Self::HelperRejected | Self::AlreadyRejected => "already_rejected",
            Self::AlreadyUnderReview => "already_under_review",
            Self::NotPendingReview => "not_pending_review",
            Self::CannotValidateRejected => "cannot_validate_rejected",
            Self::UnconfirmedEmail { .. } => "unconfirmed_email",
            Self::IncompleteRequirements { .. } => "incomplete_requirements",
            Self::MissingReason => "missing_reason",
            Self::HelperUnderReview => "helper_under_review",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HelperNotFound(_))
    }

    /// Check if this is rejected caller input rather than a state conflict
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::MissingReason | Self::IncompleteRequirements { .. }
        )
    }
}
