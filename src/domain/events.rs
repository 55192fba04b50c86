//! Domain Events
//!
//! Facts published to interested collaborators after a committed transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Helper-related events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HelperEvent {
    /// Credential or background-check submission changed
    HelperCredentialsUpdated {
        email: String,
        occurred_at: DateTime<Utc>,
    },
}

impl HelperEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            HelperEvent::HelperCredentialsUpdated { .. } => "HelperCredentialsUpdated",
        }
    }

    /// Get the helper email this event relates to
    pub fn email(&self) -> &str {
        match self {
            HelperEvent::HelperCredentialsUpdated { email, .. } => email,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            HelperEvent::HelperCredentialsUpdated { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Changes to the submission flags of a helper profile
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_submitted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_check_submitted: Option<bool>,
}

impl ProfileUpdate {
    /// Resubmission of the credentials document
    pub fn credentials() -> Self {
        Self {
            credentials_submitted: Some(true),
            background_check_submitted: None,
        }
    }

    /// Resubmission of the background check
    pub fn background_check() -> Self {
        Self {
            credentials_submitted: None,
            background_check_submitted: Some(true),
        }
    }

    /// True when any credential-bearing field is present
    pub fn touches_credentials(&self) -> bool {
        self.credentials_submitted.is_some() || self.background_check_submitted.is_some()
    }
}
