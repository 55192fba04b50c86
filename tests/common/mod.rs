//! Common test utilities
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use helper_review::handlers::{ReviewHandlers, ReviewPorts};
use helper_review::outbound::{BroadcastEventBus, FixedClock, NotificationError, Notifier};
use helper_review::store::{HelperStore, MemoryHelperStore};
use helper_review::HelperValidation;

/// Notification captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Validated(String),
    Rejected(String, Option<String>),
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_validated(&self, email: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push(Notification::Validated(email.to_string()));
        Ok(())
    }

    async fn notify_rejected(
        &self,
        email: &str,
        reason: Option<&str>,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(Notification::Rejected(
            email.to_string(),
            reason.map(str::to_string),
        ));
        Ok(())
    }
}

pub struct TestApp {
    pub store: Arc<MemoryHelperStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: BroadcastEventBus,
    pub handlers: Arc<ReviewHandlers>,
}

impl TestApp {
    pub async fn helper(&self, email: &str) -> HelperValidation {
        self.store
            .find_by_email(email)
            .await
            .expect("store read")
            .expect("helper exists")
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
}

/// Confirmed email, both documents submitted, undecided
pub fn pending_helper(email: &str) -> HelperValidation {
    HelperValidation::new(email, "Jane", "Doe")
        .with_email_confirmed(true)
        .with_submissions(true, true)
}

/// Wire handlers to an in-memory store seeded with `records`
pub fn setup(records: impl IntoIterator<Item = HelperValidation>) -> TestApp {
    let store = Arc::new(MemoryHelperStore::with_records(records));
    let notifier = Arc::new(RecordingNotifier::default());
    let events = BroadcastEventBus::new(64);

    let handlers = ReviewHandlers::new(ReviewPorts {
        store: store.clone(),
        notifier: notifier.clone(),
        events: Arc::new(events.clone()),
        clock: Arc::new(FixedClock(fixed_now())),
        max_retries: 5,
    });

    TestApp {
        store,
        notifier,
        events,
        handlers: Arc::new(handlers),
    }
}
