//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use setlist_api::config::ServerConfig;
use setlist_api::router::build_app_router;
use setlist_api::state::AppState;
use setlist_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
    }
}

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = setlist_db::create_memory_pool()
        .await
        .expect("in-memory pool");
    setlist_db::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

/// Build the full application router over `pool`, with the same middleware
/// stack the binary uses.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

/// Build the app over a fresh database.
pub async fn fresh_app() -> Router {
    build_test_app(test_pool().await)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("infallible router")
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request("POST", uri, &body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request("PUT", uri, &body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Assert the status and return the `data` field of the envelope.
pub async fn expect_data(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await["data"].clone()
}

/// A valid track creation body.
pub fn track_body(title: &str, artist: &str, bpm: f64, key: &str, genre: &str) -> Value {
    serde_json::json!({
        "title": title,
        "artist": artist,
        "bpm": bpm,
        "key": key,
        "genre": genre,
        "duration": "6:30",
    })
}

/// POST a track and return its id.
pub async fn create_track(app: &Router, body: Value) -> String {
    let data = expect_data(
        post_json(app.clone(), "/api/v1/tracks", body).await,
        StatusCode::CREATED,
    )
    .await;
    data["id"].as_str().expect("id").to_string()
}

/// POST a set and return its id.
pub async fn create_set(app: &Router, body: Value) -> String {
    let data = expect_data(
        post_json(app.clone(), "/api/v1/sets", body).await,
        StatusCode::CREATED,
    )
    .await;
    data["id"].as_str().expect("id").to_string()
}
