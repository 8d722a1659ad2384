use std::sync::Arc;

use anyhow::Context;
use notification_listener::{
    worker::{ListenerConfig, ListenerWorker},
    NotificationListener,
};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use transaction_reader::{
    server,
    settings::{CommandSettingsLauncher, SettingsLauncher},
    types::Environment,
};
use transaction_storage::{FileKeyValueStore, PendingQueueStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    info!("Starting transaction relay ({environment})");

    let store = FileKeyValueStore::open(
        environment.pending_queue_dir(),
        &environment.pending_queue_namespace(),
    )
    .context("Failed to open pending queue store")?;
    info!("Pending queue stored in {}", store.root().display());

    let storage = Arc::new(PendingQueueStorage::new(
        Arc::new(store),
        environment.pending_queue_config(),
    ));

    let launcher: Arc<dyn SettingsLauncher> = Arc::new(
        CommandSettingsLauncher::from_command(environment.notification_settings_command())
            .context("NOTIFICATION_SETTINGS_COMMAND is empty")?,
    );

    let shutdown_token = CancellationToken::new();

    // Notifications arrive as JSON lines on stdin
    let worker = ListenerWorker::with_shutdown_token(
        ListenerConfig::from_env(),
        Arc::new(NotificationListener::new(Arc::clone(&storage))),
        shutdown_token.clone(),
    );
    let worker_handle = tokio::spawn(async move {
        match worker.start(BufReader::new(tokio::io::stdin())).await {
            Ok(()) => info!("Notification feed ended, still serving pending transactions"),
            Err(e) => error!("Listener worker failed: {e:#}"),
        }
    });

    {
        let shutdown_token = shutdown_token.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received");
            shutdown_token.cancel();
        });
    }

    let server_result = server::start(environment, storage, launcher, shutdown_token.clone()).await;

    // Stop the listener too if the server exited on its own
    shutdown_token.cancel();
    if let Err(e) = worker_handle.await {
        error!("Listener worker task error: {e}");
    }

    server_result
}
