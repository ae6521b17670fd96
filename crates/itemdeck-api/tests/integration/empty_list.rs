//! The configurable empty-list policy.

use http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TestHarness, items_path};

#[tokio::test]
async fn test_empty_list_is_404_when_policy_enabled() {
    let harness = TestHarness::builder()
        .file_backed()
        .empty_list_not_found()
        .build();

    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "No items found."}));
}

#[tokio::test]
async fn test_non_empty_list_unaffected_by_policy() {
    let harness = TestHarness::builder()
        .file_backed()
        .empty_list_not_found()
        .build();
    harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
