//! Per-route, per-client request budgets.

use http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TestHarness, UNKNOWN_ID, from_client, item_path, items_path, request};

#[tokio::test]
async fn test_sixth_request_in_a_minute_is_429() {
    let harness = TestHarness::builder().rate_limit(5).build();

    for _ in 0..5 {
        let (status, _) = harness.call(Method::GET, &items_path()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = tower::ServiceExt::oneshot(
        harness.router.clone(),
        request(Method::GET, &items_path(), None),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(http::header::RETRY_AFTER));

    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"detail": "Rate limit exceeded. Try again later."}));
}

#[tokio::test]
async fn test_routes_have_separate_budgets() {
    let harness = TestHarness::builder().rate_limit(1).build();

    let (status, _) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = harness.call(Method::GET, &item_path(UNKNOWN_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clients_have_separate_budgets() {
    let harness = TestHarness::builder().rate_limit(1).build();

    let first = |client: &str| from_client(request(Method::GET, &items_path(), None), client);

    let (status, _) = harness.send(first("203.0.113.1")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = harness.send(first("203.0.113.1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = harness.send(first("203.0.113.2")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_applies_before_id_validation() {
    let harness = TestHarness::builder().rate_limit(1).build();

    let (status, _) = harness.call(Method::GET, &item_path("bad")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = harness.call(Method::GET, &item_path("bad")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}
