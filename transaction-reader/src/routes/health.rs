use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;
use transaction_storage::PendingQueueStorage;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// Candidates waiting to be collected, absent if the queue is unreadable
    pending: Option<usize>,
}

/// Health check endpoint
///
/// Returns the current status, version information and pending queue depth.
/// Reading the depth never drains the queue.
pub async fn handler(
    Extension(storage): Extension<Arc<PendingQueueStorage>>,
) -> impl IntoApiResponse {
    let pending = match tokio::task::spawn_blocking(move || storage.pending_count()).await {
        Ok(Ok(count)) => Some(count),
        Ok(Err(e)) => {
            tracing::warn!("Failed to count pending transactions: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("Pending count task failed: {e}");
            None
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
        pending,
    })
}
