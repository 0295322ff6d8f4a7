//! Router Tests
//!
//! Drives the assembled router in-process with `tower::ServiceExt::oneshot`,
//! checking status codes, envelopes and headers for every endpoint.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use items_api::api::router::build_router;
use items_api::config::{AppConfig, Environment};
use items_api::files::storage::FileStore;
use items_api::items::store::{ItemStore, seed_examples};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    items: Arc<ItemStore>,
    _upload_dir: TempDir,
}

fn test_config(environment: Environment) -> AppConfig {
    AppConfig {
        environment,
        seed_examples: false,
        ..AppConfig::default()
    }
}

fn app() -> TestApp {
    app_with(Environment::Production)
}

fn app_with(environment: Environment) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let items = Arc::new(ItemStore::new());
    let files = Arc::new(FileStore::new(upload_dir.path()));
    let router = build_router(items.clone(), files, &test_config(environment));

    TestApp {
        router,
        items,
        _upload_dir: upload_dir,
    }
}

fn app_with_upload_root(root: &Path, environment: Environment) -> Router {
    build_router(
        Arc::new(ItemStore::new()),
        Arc::new(FileStore::new(root)),
        &test_config(environment),
    )
}

async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: Body,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, headers, bytes.to_vec())
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let (status, _headers, bytes) = send_raw(router, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(router: &Router, body: Value) -> Value {
    let (status, json) = send(router, Method::POST, "/api/v1/items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", json);
    json["data"].clone()
}

// ============================================================
// ITEMS - CREATE
// ============================================================

#[tokio::test]
async fn test_create_item_returns_201_with_envelope() {
    let app = app();

    let (status, json) = send(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Some(json!({ "name": "Widget", "description": "Blue", "color": "blue" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Item created successfully");
    assert_eq!(json["data"]["name"], "Widget");
    assert_eq!(json["data"]["color"], "blue");
    assert_eq!(json["data"]["createdAt"], json["data"]["updatedAt"]);
    assert!(json["data"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(app.items.len(), 1);
}

#[tokio::test]
async fn test_create_item_overrides_client_id() {
    let app = app();

    let data = create(&app.router, json!({ "id": "chosen", "name": "Widget" })).await;

    assert_ne!(data["id"], "chosen");
    let (status, _) = send(&app.router, Method::GET, "/api/v1/items/chosen", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_item_validation_error() {
    let app = app();

    let (status, json) = send(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Some(json!({ "description": "No name" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Item name is required");
    assert_eq!(json["rule"], "name_required");
    assert!(app.items.is_empty());
}

#[tokio::test]
async fn test_create_item_name_too_long() {
    let app = app();

    let (status, json) = send(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Some(json!({ "name": "x".repeat(101) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Item name cannot exceed 100 characters");
    assert_eq!(json["rule"], "name_too_long");
}

#[tokio::test]
async fn test_create_item_rejects_bad_bodies() {
    let app = app();

    let (status, json) = send(&app.router, Method::POST, "/api/v1/items", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Request body is missing");

    let (status, _headers, bytes) = send_raw(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Body::from("{ not json"),
    )
    .await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().starts_with("Invalid JSON body"));

    let (status, json) = send(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Some(json!(["Widget"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Request body must be a JSON object");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/items",
        Some(json!({ "name": "Widget", "tags": ["a"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.items.is_empty());
}

// ============================================================
// ITEMS - READ / LIST
// ============================================================

#[tokio::test]
async fn test_get_item_roundtrip() {
    let app = app();
    let created = create(&app.router, json!({ "name": "Widget", "count": 3 })).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(
        &app.router,
        Method::GET,
        &format!("/api/v1/items/{}", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"], created);
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn test_get_missing_item_returns_404() {
    let app = app();

    let (status, json) = send(&app.router, Method::GET, "/api/v1/items/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Item with ID nope not found");
}

#[tokio::test]
async fn test_list_items_with_count() {
    let app = app();
    seed_examples(&app.items).unwrap();

    let (status, json) = send(&app.router, Method::GET, "/api/v1/items", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_items_filters_by_query() {
    let app = app();
    seed_examples(&app.items).unwrap();
    create(&app.router, json!({ "name": "Widget", "color": "Blue" })).await;

    let (_, json) = send(&app.router, Method::GET, "/api/v1/items?name=EXAMPLE", None).await;
    assert_eq!(json["count"], 2);

    let (_, json) = send(&app.router, Method::GET, "/api/v1/items?color=blu", None).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["name"], "Widget");

    let (_, json) = send(
        &app.router,
        Method::GET,
        "/api/v1/items?name=widget&color=red",
        None,
    )
    .await;
    assert_eq!(json["count"], 0);

    let (_, json) = send(&app.router, Method::GET, "/api/v1/items?name=", None).await;
    assert_eq!(json["count"], 3);
}

#[tokio::test]
async fn test_list_items_undecodable_query_keeps_json_envelope() {
    let app = app();
    seed_examples(&app.items).unwrap();

    let (status, headers, bytes) = send_raw(
        &app.router,
        Method::GET,
        "/api/v1/items?name=%FF%FE",
        Body::empty(),
    )
    .await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    // Invalid UTF-8 is decoded lossily, so the filter simply matches nothing.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(json["status"], "success");
    assert_eq!(json["count"], 0);
}

// ============================================================
// ITEMS - UPDATE / DELETE
// ============================================================

#[tokio::test]
async fn test_update_item_merges_fields() {
    let app = app();
    let created = create(
        &app.router,
        json!({ "name": "Widget", "description": "Original", "color": "blue" }),
    )
    .await;
    let uri = format!("/api/v1/items/{}", created["id"].as_str().unwrap());

    let (status, json) = send(
        &app.router,
        Method::PUT,
        &uri,
        Some(json!({ "color": "red", "id": "forged", "createdAt": "2000-01-01T00:00:00.000Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Item updated successfully");
    let data = &json["data"];
    assert_eq!(data["id"], created["id"]);
    assert_eq!(data["createdAt"], created["createdAt"]);
    assert_eq!(data["name"], "Widget");
    assert_eq!(data["description"], "Original");
    assert_eq!(data["color"], "red");
    assert!(data["updatedAt"].as_str().unwrap() > created["updatedAt"].as_str().unwrap());
}

#[tokio::test]
async fn test_update_invalid_leaves_item_unchanged() {
    let app = app();
    let created = create(&app.router, json!({ "name": "Widget" })).await;
    let uri = format!("/api/v1/items/{}", created["id"].as_str().unwrap());

    let (status, json) = send(&app.router, Method::PUT, &uri, Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["rule"], "name_required");

    let (_, json) = send(&app.router, Method::GET, &uri, None).await;
    assert_eq!(json["data"], created);
}

#[tokio::test]
async fn test_update_missing_item_returns_404() {
    let app = app();

    let (status, json) = send(
        &app.router,
        Method::PUT,
        "/api/v1/items/missing",
        Some(json!({ "name": "Widget" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Item with ID missing not found");
    assert!(app.items.is_empty());
}

#[tokio::test]
async fn test_delete_item_then_404() {
    let app = app();
    let created = create(&app.router, json!({ "name": "Widget" })).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/items/{}", id);

    let (status, json) = send(&app.router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], format!("Item with ID {} deleted successfully", id));

    let (status, _) = send(&app.router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================
// INDEX, FALLBACK & HEADERS
// ============================================================

#[tokio::test]
async fn test_api_index_lists_endpoints() {
    let app = app();

    let (status, json) = send(&app.router, Method::GET, "/api/v1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Welcome to the REST API v1");
    assert_eq!(json["endpoints"]["items"], "/api/v1/items");
    assert_eq!(json["endpoints"]["files"], "/api/v1/files");
}

#[tokio::test]
async fn test_unknown_route_gets_welcome() {
    let app = app();

    let (status, json) = send(&app.router, Method::GET, "/somewhere/else", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Welcome to the REST API!");
    assert_eq!(json["documentation"], "See README.md for API documentation");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_timing() {
    let app = app();

    let (_, first, _) = send_raw(&app.router, Method::GET, "/api/v1/items", Body::empty()).await;
    let (_, second, _) =
        send_raw(&app.router, Method::GET, "/api/v1/items/missing", Body::empty()).await;

    let first_id = first.get("x-request-id").unwrap().to_str().unwrap();
    let second_id = second.get("x-request-id").unwrap().to_str().unwrap();
    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);

    let timing = first.get("x-response-time").unwrap().to_str().unwrap();
    assert!(timing.ends_with("ms"));
    assert!(timing.trim_end_matches("ms").parse::<u128>().is_ok());
}

// ============================================================
// FILES
// ============================================================

#[tokio::test]
async fn test_list_files_empty() {
    let app = app();

    let (status, json) = send(&app.router, Method::GET, "/api/v1/files", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["count"], 0);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_download_and_delete_missing_file() {
    let app = app();

    let (status, json) = send(&app.router, Method::GET, "/api/v1/files/ghost.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "File 'ghost.txt' not found");

    let (status, _) = send(&app.router, Method::DELETE, "/api/v1/files/ghost.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_traversal_filenames_rejected() {
    let app = app();

    for uri in [
        "/api/v1/files/..%2F..%2Fetc%2Fpasswd",
        "/api/v1/files/.env",
        "/api/v1/files/CON",
    ] {
        let (status, json) = send(&app.router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["message"], "Invalid filename");
    }

    let (status, _) = send(&app.router, Method::DELETE, "/api/v1/files/..%2Fsecret", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_multipart_is_rejected() {
    let app = app();

    let (status, json) = send(
        &app.router,
        Method::POST,
        "/api/v1/files",
        Some(json!({ "file": "nope" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_internal_error_detail_only_in_development() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("never-created");

    let production = app_with_upload_root(&missing, Environment::Production);
    let (status, json) = send(&production, Method::GET, "/api/v1/files", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().starts_with("Failed to list files"));
    assert!(json.get("detail").is_none());

    let development = app_with_upload_root(&missing, Environment::Development);
    let (status, json) = send(&development, Method::GET, "/api/v1/files", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["detail"].is_string());
}
