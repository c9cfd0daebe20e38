// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, mount_posts, remote_post, REMOTE_HOST};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_sync_then_list_crossposts() {
    let app = create_test_app().await;
    mount_posts(&app.server, vec![remote_post("Hello", "2024-01-10T09:30:00+00:00")]).await;

    let (status, body) = call(&app.router, post_json("/v1/sync", r#"{"since":"-30 days"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts_created"], 1);
    assert!(body["run_id"].is_string());

    let (status, body) = call(&app.router, get("/v1/crossposts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["original_url"], format!("https://{}/hello", REMOTE_HOST));
}

#[tokio::test]
async fn test_sync_reports_fetch_errors_in_body() {
    let app = create_test_app().await;

    // No mock mounted: wiremock answers 404
    let (status, body) = call(&app.router, post_json("/v1/sync", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts_created"], 0);
    assert_eq!(body["errors"][0]["kind"], "fetch_http");
    assert_eq!(body["errors"][0]["status"], 404);
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let app = create_test_app().await;

    let (status, _) = call(&app.router, post_json("/v1/sync", r#"{"since":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app.router, get("/v1/crossposts?limit=501")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let (status, body) = call(&app.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
