mod config;
mod feed;
mod processor;

use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::listener::NotificationListener;
use crate::types::NotificationEvent;

pub use self::config::ListenerConfig;
pub use self::feed::NotificationFeed;
pub use self::processor::NotificationProcessor;

/// Result type for worker operations
pub type WorkerResult<T> = anyhow::Result<T>;

/// Listener worker that connects the notification feed to the processor
pub struct ListenerWorker {
    config: ListenerConfig,
    listener: Arc<NotificationListener>,
    shutdown_token: CancellationToken,
}

impl ListenerWorker {
    /// Creates a new listener worker
    #[must_use]
    pub fn new(config: ListenerConfig, listener: Arc<NotificationListener>) -> Self {
        Self {
            config,
            listener,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Creates a listener worker stopped by an existing token
    #[must_use]
    pub const fn with_shutdown_token(
        config: ListenerConfig,
        listener: Arc<NotificationListener>,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            listener,
            shutdown_token,
        }
    }

    /// Returns a clone of the shutdown token for external control
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the worker until the input ends or shutdown is requested
    ///
    /// Events already handed to the processor are finished before returning,
    /// whether the input ends or shutdown is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails.
    pub async fn start<R>(self, input: R) -> WorkerResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!(
            "Starting listener worker with channel capacity {}",
            self.config.channel_capacity
        );

        let (event_tx, event_rx) = flume::bounded::<NotificationEvent>(self.config.channel_capacity);

        let processor_handle = {
            let processor = NotificationProcessor::new(Arc::clone(&self.listener));
            let shutdown_token = self.shutdown_token.clone();
            tokio::spawn(async move {
                processor.run(event_rx, shutdown_token).await;
            })
        };

        let feed_result = NotificationFeed::new(input, event_tx, self.shutdown_token.clone())
            .run()
            .await;

        if let Err(e) = &feed_result {
            error!("Notification feed error: {}", e);
        }

        // The feed dropped its sender, so the processor exits once it has
        // drained whatever is still buffered.
        if let Err(e) = processor_handle.await {
            error!("Processor task error: {}", e);
        }

        info!("Listener worker stopped");
        feed_result
    }
}
