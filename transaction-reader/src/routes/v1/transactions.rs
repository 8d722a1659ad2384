use std::sync::Arc;

use axum::{Extension, Json};
use metrics::counter;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use transaction_storage::{PendingQueueStorage, TransactionCandidate};

use crate::types::AppError;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PendingTransactionsResponse {
    /// Candidates in the order they were observed
    pub transactions: Vec<TransactionCandidate>,
}

/// Returns every pending transaction candidate and clears the queue
///
/// The drain is destructive: a candidate is returned by exactly one call. An
/// empty queue yields an empty list.
///
/// # Errors
///
/// Returns `read_failed` (retryable) if the queue cannot be read or cleared.
/// The queue is left untouched in that case.
#[instrument(skip(storage))]
pub async fn get_pending_transactions(
    Extension(storage): Extension<Arc<PendingQueueStorage>>,
) -> Result<Json<PendingTransactionsResponse>, AppError> {
    let transactions = tokio::task::spawn_blocking(move || storage.drain_all()).await??;

    counter!("pending_transactions_drained").increment(transactions.len() as u64);
    tracing::info!("Returning {} pending transactions", transactions.len());

    Ok(Json(PendingTransactionsResponse { transactions }))
}
