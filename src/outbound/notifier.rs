//! Helper notifications

use async_trait::async_trait;

/// Notification dispatch error
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Tells a helper about an admin decision
///
/// Delivery mechanics (email, SMS, retries) belong to the implementation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_validated(&self, email: &str) -> Result<(), NotificationError>;

    async fn notify_rejected(
        &self,
        email: &str,
        reason: Option<&str>,
    ) -> Result<(), NotificationError>;
}

/// Records notifications in the log instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_validated(&self, email: &str) -> Result<(), NotificationError> {
        tracing::info!(email, template = "helper_validated", "Notification sent");
        Ok(())
    }

    async fn notify_rejected(
        &self,
        email: &str,
        reason: Option<&str>,
    ) -> Result<(), NotificationError> {
        match reason {
            Some(reason) => {
                tracing::info!(email, reason, template = "helper_rejected", "Notification sent")
            }
            None => tracing::info!(email, template = "helper_rejected", "Notification sent"),
        }
        Ok(())
    }
}
