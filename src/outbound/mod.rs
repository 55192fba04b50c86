//! Outbound collaborators
//!
//! Ports the review workflow calls after a transition commits: helper
//! notifications, domain event publication and the clock.

mod clock;
mod event_bus;
mod notifier;

use serde::Serialize;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event_bus::{BroadcastEventBus, EventBus, PublishError};
pub use notifier::{LogNotifier, NotificationError, Notifier};

/// Outcome of a best-effort side effect performed after commit
///
/// A failure never rolls back the committed transition; it is reported so the
/// caller can surface a partial success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "snake_case")]
pub enum SideEffect {
    Delivered,
    Failed(String),
    /// Nothing to send for this call
    Skipped,
}

impl SideEffect {
    pub fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => SideEffect::Delivered,
            Err(e) => SideEffect::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_effect_serialization() {
        let failed = SideEffect::from_result(Err::<(), _>("smtp down"));
        assert_eq!(failed, SideEffect::Failed("smtp down".to_string()));

        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["error"], "smtp down");

        let json = serde_json::to_value(SideEffect::Delivered).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "delivered" }));
    }
}
