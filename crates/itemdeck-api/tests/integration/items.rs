//! CRUD round trips through the router.

use std::collections::HashSet;

use http::{Method, StatusCode};
use itemdeck_core::is_valid_identifier;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{TestHarness, UNKNOWN_ID, item_path, items_path, request};

#[tokio::test]
async fn test_create_returns_201_with_fields_and_id() {
    let harness = TestHarness::file_backed();

    let (status, body) = harness
        .call_json(
            Method::POST,
            &items_path(),
            json!({"name": "Lamp", "description": "A desk lamp"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Lamp");
    assert_eq!(body["description"], "A desk lamp");
    let id = body["id"].as_str().unwrap();
    assert!(is_valid_identifier(id), "generated id {id} must pass validation");
}

#[tokio::test]
async fn test_created_item_is_fetchable_and_listed() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness.call(Method::GET, &item_path(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "name": "Lamp", "description": "A desk lamp"})
    );

    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], id);
}

#[tokio::test]
async fn test_items_persist_to_file() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let raw = std::fs::read_to_string(harness.data_path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["items"][0]["id"], id);
}

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let harness = TestHarness::file_backed();
    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_id_is_400_even_if_stored() {
    let harness = TestHarness::builder()
        .file_with_contents(r#"{"items": [{"id": "1", "name": "Old", "description": "Legacy"}]}"#)
        .build();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = harness.call(method, &item_path("1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Invalid item_id format."}));
    }

    let (status, _) = harness
        .call_json(
            Method::PUT,
            &item_path("1"),
            json!({"name": "n", "description": "d"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness
        .call_json(Method::PATCH, &item_path("1"), json!({"name": "n"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_id_check_precedes_body_check() {
    let harness = TestHarness::file_backed();
    let (status, _) = harness
        .call_json(Method::PUT, &item_path("xyz"), json!({"bogus": true}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_id_is_404_with_route_detail() {
    let harness = TestHarness::file_backed();

    let (status, body) = harness.call(Method::GET, &item_path(UNKNOWN_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found.");

    let (status, body) = harness
        .call_json(
            Method::PUT,
            &item_path(UNKNOWN_ID),
            json!({"name": "n", "description": "d"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found or not updated.");

    let (status, body) = harness
        .call_json(Method::PATCH, &item_path(UNKNOWN_ID), json!({"name": "n"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found or not patched.");

    let (status, body) = harness.call(Method::DELETE, &item_path(UNKNOWN_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found or not deleted.");
}

#[tokio::test]
async fn test_uppercase_hex_id_is_accepted_format() {
    let harness = TestHarness::file_backed();
    let (status, _) = harness
        .call(Method::GET, &item_path("AAAAAAAAAAAAAAAAAAAAAAAA"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_replaces_then_get_reflects_update() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness
        .call_json(
            Method::PUT,
            &item_path(&id),
            json!({"name": "Floor lamp", "description": "Taller"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Floor lamp");

    let (_, body) = harness.call(Method::GET, &item_path(&id)).await;
    assert_eq!(
        body,
        json!({"id": id, "name": "Floor lamp", "description": "Taller"})
    );
}

#[tokio::test]
async fn test_put_requires_full_body() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness
        .call_json(Method::PUT, &item_path(&id), json!({"name": "Only name"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_patch_keeps_unspecified_fields() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness
        .call_json(
            Method::PATCH,
            &item_path(&id),
            json!({"description": "Now with LED"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lamp");
    assert_eq!(body["description"], "Now with LED");

    let (_, body) = harness.call(Method::GET, &item_path(&id)).await;
    assert_eq!(body["name"], "Lamp");
    assert_eq!(body["description"], "Now with LED");
}

#[tokio::test]
async fn test_patch_with_empty_body_changes_nothing() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness
        .call_json(Method::PATCH, &item_path(&id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "name": "Lamp", "description": "A desk lamp"})
    );
}

#[tokio::test]
async fn test_delete_returns_item_then_get_is_404() {
    let harness = TestHarness::file_backed();
    let id = harness.create("Lamp", "A desk lamp").await;

    let (status, body) = harness.call(Method::DELETE, &item_path(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _) = harness.call(Method::GET, &item_path(&id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness.call(Method::DELETE, &item_path(&id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let harness = TestHarness::file_backed();

    let (status, body) = harness
        .call_json(Method::POST, &items_path(), json!({"name": "No description"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let request = http::Request::builder()
        .method(Method::POST)
        .uri(items_path())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = harness.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (status, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let harness = TestHarness::file_backed();

    let mut handles = Vec::new();
    for i in 0..10 {
        let router = harness.router.clone();
        handles.push(tokio::spawn(async move {
            let request = request(
                Method::POST,
                &items_path(),
                Some(json!({"name": format!("item-{i}"), "description": "concurrent"})),
            );
            let response = router.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            body["id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 10);

    let (_, body) = harness.call(Method::GET, &items_path()).await;
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_patch_keeps_extra_keys_on_every_record() {
    let harness = TestHarness::builder()
        .file_with_contents(
            r#"{"items": [
                {"_id": {"$oid": "507f1f77bcf86cd799439011"}, "name": "Lamp", "description": "d", "owner": "ada"},
                {"id": "507f1f77bcf86cd799439012", "name": "Chair", "description": "oak", "price": 10}
            ]}"#,
        )
        .build();

    let (status, body) = harness
        .call_json(
            Method::PATCH,
            &item_path("507f1f77bcf86cd799439012"),
            json!({"name": "Stool"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": "507f1f77bcf86cd799439012", "name": "Stool", "description": "oak", "price": 10})
    );

    let (_, body) = harness
        .call(Method::GET, &item_path("507f1f77bcf86cd799439011"))
        .await;
    assert_eq!(body["owner"], "ada");
}
