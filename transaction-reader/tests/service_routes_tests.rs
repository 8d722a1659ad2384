mod common;

use common::*;

use http::StatusCode;
use pretty_assertions::assert_eq;
use std::time::Duration;
use transaction_reader::routes::REQUEST_TIMEOUT;
use transaction_storage::TransactionCandidate;

#[tokio::test]
async fn test_health_reports_pending_count_without_draining() {
    let ctx = TestContext::new();
    assert!(ctx.storage.append(&TransactionCandidate::new("Bank", "€1", 1)));

    let response = ctx.send_get_request("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["pending"], 1);

    assert_eq!(ctx.storage.pending_count().unwrap(), 1);
}

#[tokio::test]
async fn test_health_with_unreadable_queue_is_still_ok() {
    let ctx = TestContext::unreadable();

    let response = ctx.send_get_request("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["pending"].is_null());
}

#[tokio::test]
async fn test_slow_health_times_out_without_touching_queue() {
    let seed = vec![TransactionCandidate::new("Bank", "Charge 9.99", 9)];
    let ctx = TestContext::slow(&seed, REQUEST_TIMEOUT + Duration::from_secs(1));

    let response = ctx.send_get_request("/health").await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(ctx.storage.pending_count().unwrap(), 1);
}

#[tokio::test]
async fn test_open_settings_returns_accepted() {
    let ctx = TestContext::new();

    let response = ctx
        .send_post_request("/v1/notification-access-settings")
        .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(ctx.launcher_calls(), 1);
}

#[tokio::test]
async fn test_open_settings_failure_is_reported() {
    let ctx = TestContext::with_failing_launcher();

    let response = ctx
        .send_post_request("/v1/notification-access-settings")
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = parse_response_body(response).await;
    assert_eq!(body["allowRetry"], true);
    assert_eq!(body["error"]["code"], "settings_unavailable");
    assert_eq!(ctx.launcher_calls(), 1);
}

#[tokio::test]
async fn test_openapi_lists_routes_in_development() {
    let ctx = TestContext::new();

    let response = ctx.send_get_request("/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["paths"]["/v1/pending-transactions"]["post"].is_object());
    assert!(body["paths"]["/health"]["get"].is_object());
}
