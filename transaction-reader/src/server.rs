use std::net::SocketAddr;
use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::Extension;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use transaction_storage::PendingQueueStorage;

use crate::routes;
use crate::{settings::SettingsLauncher, types::Environment};

/// Builds the application router with all dependencies attached
pub fn router(
    environment: Environment,
    storage: Arc<PendingQueueStorage>,
    launcher: Arc<dyn SettingsLauncher>,
) -> axum::Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(storage))
        .layer(Extension(launcher))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given environment and dependencies
///
/// Runs until `shutdown_token` is cancelled, then finishes in-flight requests.
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    storage: Arc<PendingQueueStorage>,
    launcher: Arc<dyn SettingsLauncher>,
    shutdown_token: CancellationToken,
) -> anyhow::Result<()> {
    let addr: SocketAddr = environment.bind_address()?;
    let router = router(environment, storage, launcher);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Transaction reader started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await
        .map_err(anyhow::Error::from)
}
