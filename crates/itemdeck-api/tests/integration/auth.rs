//! The optional bearer-token guard.

use http::{Method, StatusCode};
use itemdeck_auth::{AccessPolicy, JwtAuth};
use serde_json::json;

use crate::common::{SECRET, TestHarness, items_path, request, with_bearer};

fn token() -> String {
    JwtAuth::new(SECRET)
        .issue_token(json!({"sub": "u1", "name": "Ada"}))
        .unwrap()
}

fn create_body() -> Option<serde_json::Value> {
    Some(json!({"name": "Lamp", "description": "A desk lamp"}))
}

#[tokio::test]
async fn test_guard_off_by_default() {
    let harness = TestHarness::builder().build();
    let (status, _) = harness
        .send(request(Method::POST, &items_path(), create_body()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_writes_need_token_reads_do_not() {
    let harness = TestHarness::builder()
        .auth(AccessPolicy::PROTECT_WRITES)
        .build();

    let (status, body) = harness
        .send(request(Method::POST, &items_path(), create_body()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Not authenticated"}));

    let (status, _) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .send(with_bearer(
            request(Method::POST, &items_path(), create_body()),
            &token(),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_protect_all_guards_reads() {
    let harness = TestHarness::builder().auth(AccessPolicy::PROTECT_ALL).build();

    let (status, _) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = harness
        .send(with_bearer(request(Method::GET, &items_path(), None), &token()))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_foreign_and_expired_tokens_rejected() {
    let harness = TestHarness::builder().auth(AccessPolicy::PROTECT_ALL).build();

    let foreign = JwtAuth::new("someone-else").issue_token(json!({})).unwrap();
    let (status, body) = harness
        .send(with_bearer(request(Method::GET, &items_path(), None), &foreign))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");

    let expired = JwtAuth::new(SECRET)
        .issue_token_at(json!({}), chrono::Utc::now() - chrono::TimeDelta::days(3))
        .unwrap();
    let (status, body) = harness
        .send(with_bearer(request(Method::GET, &items_path(), None), &expired))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token has expired");
}
