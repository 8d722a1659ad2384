use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::listener::NotificationListener;
use crate::types::NotificationEvent;

/// `NotificationProcessor` runs the listener over queued events, one at a time
pub struct NotificationProcessor {
    listener: Arc<NotificationListener>,
}

impl NotificationProcessor {
    /// Creates a new `NotificationProcessor`
    #[must_use]
    pub const fn new(listener: Arc<NotificationListener>) -> Self {
        Self { listener }
    }

    /// Runs the processor loop until shutdown or until the feed closes
    pub async fn run(
        &self,
        receiver: flume::Receiver<NotificationEvent>,
        shutdown_token: CancellationToken,
    ) {
        info!("Notification processor started");

        loop {
            tokio::select! {
                () = shutdown_token.cancelled() => {
                    info!("Notification processor received shutdown signal");
                    self.drain_buffered(&receiver).await;
                    break;
                }
                result = receiver.recv_async() => {
                    match result {
                        Ok(event) => self.process_event(event).await,
                        Err(flume::RecvError::Disconnected) => {
                            info!("Notification channel closed");
                            break;
                        }
                    }
                }
            }
        }

        info!("Notification processor stopped");
    }

    /// Processes events the feed already read before shutdown
    async fn drain_buffered(&self, receiver: &flume::Receiver<NotificationEvent>) {
        let buffered: Vec<NotificationEvent> = receiver.try_iter().collect();
        if buffered.is_empty() {
            return;
        }

        info!("Processing {} buffered notifications before shutdown", buffered.len());
        for event in buffered {
            self.process_event(event).await;
        }
    }

    /// Classifies and stores one event; storage is blocking file I/O
    async fn process_event(&self, event: NotificationEvent) {
        let listener = Arc::clone(&self.listener);
        if let Err(e) = tokio::task::spawn_blocking(move || listener.on_event(&event)).await {
            error!("Notification handler task failed: {}", e);
        }
    }
}
