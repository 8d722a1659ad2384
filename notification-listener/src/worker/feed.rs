use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::WorkerResult;
use crate::types::NotificationEvent;

/// `NotificationFeed` decodes notification events, one JSON object per line,
/// and forwards them to the processor
pub struct NotificationFeed<R> {
    reader: R,
    event_tx: flume::Sender<NotificationEvent>,
    shutdown_token: CancellationToken,
}

impl<R> NotificationFeed<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Creates a new `NotificationFeed`
    pub const fn new(
        reader: R,
        event_tx: flume::Sender<NotificationEvent>,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            reader,
            event_tx,
            shutdown_token,
        }
    }

    /// Reads events until end of input or shutdown
    ///
    /// Malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the processor has gone away.
    pub async fn run(self) -> WorkerResult<()> {
        let mut lines = self.reader.lines();
        let mut received = 0_u64;

        loop {
            let line = tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Notification feed shutting down after {} events", received);
                    return Ok(());
                }
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                info!("Notification feed reached end of input after {} events", received);
                return Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            let event = match serde_json::from_str::<NotificationEvent>(&line) {
                Ok(event) => event,
                Err(e) => {
                    warn!("Skipping malformed notification event: {}", e);
                    continue;
                }
            };

            received += 1;
            if let Err(e) = self.event_tx.send_async(event).await {
                error!("Failed to hand notification to processor: {}", e);
                return Err(anyhow::anyhow!("Notification channel closed"));
            }
        }
    }
}
