use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};
use transaction_storage::{PendingQueueStorage, TransactionCandidate};

use crate::classifier;
use crate::types::NotificationEvent;

/// `NotificationListener` classifies incoming notifications and queues the
/// ones that look like transactions
pub struct NotificationListener {
    storage: Arc<PendingQueueStorage>,
}

impl NotificationListener {
    /// Creates a new `NotificationListener`
    #[must_use]
    pub const fn new(storage: Arc<PendingQueueStorage>) -> Self {
        Self { storage }
    }

    /// Handles a single posted notification
    ///
    /// On a match a candidate is appended to the pending queue. Storage failures
    /// are logged and swallowed so the notification callback never fails.
    pub fn on_notification(&self, source: &str, title: &str, main_text: &str, expanded_text: &str) {
        let text = classifier::select_text(main_text, expanded_text);
        let normalized = classifier::normalize(title, text);

        let Some(reason) = classifier::classify(&normalized) else {
            debug!(source, "Notification did not match transaction heuristics");
            return;
        };

        debug!(source, %reason, "Notification matched transaction heuristics");
        counter!("transaction_notifications_matched", "reason" => reason.to_string()).increment(1);

        let candidate = TransactionCandidate::observed_now(title, text);
        if self.storage.append(&candidate) {
            info!(source, "Queued transaction candidate");
            counter!("transaction_candidates_queued").increment(1);
        } else {
            warn!(source, "Dropped transaction candidate after storage failure");
            counter!("transaction_candidates_dropped").increment(1);
        }
    }

    /// Handles a notification event delivered by the platform bridge
    pub fn on_event(&self, event: &NotificationEvent) {
        self.on_notification(&event.source, event.title(), event.text(), event.big_text());
    }
}
