//! Integration tests for the HTTP dispatcher.
//!
//! Requests go straight into the axum `Router` via `tower::ServiceExt`,
//! without binding a TCP port.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use position_sync::server::{build_router, AppState, ServerConfig};
use position_sync::ACK_MESSAGE;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/static"),
        ..ServerConfig::default()
    }
}

fn test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new());
    (build_router(&test_config(), Arc::clone(&state)), state)
}

async fn post_ajax(app: &Router, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/ajax.html")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

#[tokio::test]
async fn test_click_returns_ack() {
    let (app, state) = test_app();

    let (status, body) = post_ajax(
        &app,
        json!({"action": "Click", "id": "p1", "x": 3, "y": 4}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": ACK_MESSAGE}));
    assert_eq!(state.sync.lock().await.change_log().len(), 1);
}

#[tokio::test]
async fn test_update_catches_up_then_goes_quiet() {
    let (app, _state) = test_app();

    post_ajax(&app, json!({"action": "Click", "id": "p1", "x": 3, "y": 4})).await;

    let (status, body) = post_ajax(&app, json!({"action": "Update", "id": "p2"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updates": [["p1", 3, 4]]}));

    let (_, body) = post_ajax(&app, json!({"action": "Update", "id": "p2"})).await;
    assert_eq!(body, json!({"updates": []}));
}

#[tokio::test]
async fn test_state_shared_across_requests() {
    let (app, _state) = test_app();

    post_ajax(&app, json!({"action": "Click", "id": "A", "x": 1, "y": 1})).await;
    post_ajax(&app, json!({"action": "Click", "id": "A", "x": 2, "y": 2})).await;

    let (_, body) = post_ajax(&app, json!({"action": "Update", "id": "B"})).await;
    assert_eq!(body, json!({"updates": [["A", 2, 2], ["A", 2, 2]]}));
}

#[tokio::test]
async fn test_unknown_action_returns_empty_object() {
    let (app, state) = test_app();

    let (status, body) = post_ajax(&app, json!({"action": "Wave", "id": "p1"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(state.sync.lock().await.players().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let (app, state) = test_app();

    let (status, body) = post_ajax(&app, json!({"action": "Click", "id": "p1", "x": 3})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing field `y`");
    assert_eq!(body["status"], 400);
    assert!(state.sync.lock().await.players().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let (app, _state) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/ajax.html")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health_counts() {
    let (app, _state) = test_app();

    post_ajax(&app, json!({"action": "Click", "id": "p1", "x": 0, "y": 0})).await;
    post_ajax(&app, json!({"action": "Update", "id": "p2"})).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok", "players": 2, "log_len": 1}));
}

#[tokio::test]
async fn test_root_serves_game_page() {
    let (app, _state) = test_app();

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<canvas"));
}

#[tokio::test]
async fn test_static_assets_and_missing_files() {
    let (app, _state) = test_app();

    let (status, body) = get(&app, "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0; }\n".to_vec());

    let (status, _) = get(&app, "/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_clicks_all_logged() {
    let (app, state) = test_app();

    let mut tasks = Vec::new();
    for i in 0..16i64 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            post_ajax(&app, json!({"action": "Click", "id": format!("p{i}"), "x": i, "y": -i}))
                .await
        }));
    }
    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let sync = state.sync.lock().await;
    assert_eq!(sync.players().len(), 16);
    assert_eq!(sync.change_log().len(), 16);
}
