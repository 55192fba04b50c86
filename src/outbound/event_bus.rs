//! Domain event publication

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::HelperEvent;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event bus unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: HelperEvent) -> Result<(), PublishError>;
}

/// In-process fan-out over a tokio broadcast channel
///
/// Publishing while nobody is subscribed drops the event and is not an error.
#[derive(Debug, Clone)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<HelperEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HelperEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, event: HelperEvent) -> Result<(), PublishError> {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!("{} delivered to {} subscribers", event_type, receivers);
            }
            Err(_) => {
                tracing::debug!("{} dropped, no subscribers", event_type);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event() -> HelperEvent {
        HelperEvent::HelperCredentialsUpdated {
            email: "jane@x.com".to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = BroadcastEventBus::new(8);
        let mut receiver = bus.subscribe();

        bus.publish(event()).await.unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.email(), "jane@x.com");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus = BroadcastEventBus::default();
        assert!(bus.publish(event()).await.is_ok());
    }
}
