#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use labsite_db::research_store::ResearchBackend;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use labsite_api::config::ServerConfig;
use labsite_api::router::build_app_router;
use labsite_api::state::AppState;

/// A router over a fresh database plus the temporary directories behind it.
///
/// The directories live as long as this value, so build one per test and
/// clone [`TestApp::app`] for each request.
pub struct TestApp {
    router: Router,
    pub data_dir: TempDir,
    pub image_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` rooted at the given directories.
pub fn test_config(data_dir: &Path, image_dir: &Path, backend: ResearchBackend) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".parse().unwrap()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        data_dir: data_dir.to_path_buf(),
        background_image_dir: image_dir.to_path_buf(),
        research_backend: backend,
    }
}

/// Build the full application with the document research store.
pub async fn build_test_app(pool: SqlitePool) -> TestApp {
    build_test_app_with(pool, ResearchBackend::Document).await
}

/// Build the full application with the given research store backend.
///
/// Uses the same router builder as `main.rs`, so tests exercise the
/// production middleware stack.
pub async fn build_test_app_with(pool: SqlitePool, backend: ResearchBackend) -> TestApp {
    labsite_db::initialize_schema(&pool).await.unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let image_dir = tempfile::tempdir().unwrap();
    let config = test_config(data_dir.path(), image_dir.path(), backend);
    let state = AppState::new(pool, config.clone());
    TestApp {
        router: build_app_router(state, &config),
        data_dir,
        image_dir,
    }
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json)).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(json)).await
}

pub async fn patch_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

/// Send a POST with a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST `json` to `uri`, assert 201 and return the created id.
pub async fn create(app: Router, uri: &str, json: serde_json::Value) -> i64 {
    let response = post_json(app, uri, json).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["id"].as_i64().unwrap()
}
