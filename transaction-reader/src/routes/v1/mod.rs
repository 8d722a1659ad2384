pub mod settings;
pub mod transactions;

use aide::axum::{routing::post, ApiRouter};

use super::timeout_layer;

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    let settings_routes = ApiRouter::new()
        .api_route(
            "/notification-access-settings",
            post(settings::open_notification_access_settings),
        )
        .layer(timeout_layer());

    // No timeout: the drain must run to completion and reach the caller
    ApiRouter::new()
        .api_route(
            "/pending-transactions",
            post(transactions::get_pending_transactions),
        )
        .merge(settings_routes)
}
