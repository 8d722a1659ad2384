mod docs;
pub mod health;
pub mod v1;

use std::time::Duration;

use aide::axum::{routing::get, ApiRouter};
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

/// Deadline for routes that leave the pending queue untouched
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for non-destructive routes
///
/// Never applied to the drain: dropping the handler does not stop the blocking
/// drain, so a timed-out caller would lose the batch.
pub(crate) fn timeout_layer() -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT)
}

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    let service_routes = ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .layer(timeout_layer());

    ApiRouter::new()
        .merge(service_routes)
        .nest("/v1", v1::handler())
}
