//! Shared helpers: an in-process app over an in-memory store

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use library_api::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::Repository,
    services::Services,
    AppState,
};

pub async fn test_app(api_key: Option<&str>) -> Router {
    app_over(memory_repository().await, api_key)
}

pub async fn memory_repository() -> Repository {
    // One connection only: each sqlite::memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    let repository = Repository::new(pool);
    repository.migrate().await.expect("Failed to run migrations");
    repository
}

/// Pool over a database file in `dir`, with room for concurrent writers
pub async fn file_repository(dir: &Path) -> Repository {
    let config = DatabaseConfig {
        connection_string: format!("sqlite://{}", dir.join("books.db").display()),
        max_connections: 4,
        min_connections: 1,
    };
    let repository = Repository::connect(&config)
        .await
        .expect("Failed to open database file");
    repository.migrate().await.expect("Failed to run migrations");
    repository
}

/// Router over `repository`; the caller keeps its own handle to the pool
pub fn app_over(repository: Repository, api_key: Option<&str>) -> Router {
    let mut config = AppConfig::default();
    config.auth.api_key = api_key.map(str::to_string);

    api::create_router(AppState::new(config, Services::new(repository)))
}

pub fn dirty_coder(isbn: &str) -> Value {
    json!({
        "isbn": isbn,
        "title": "The Dirty Coder",
        "author": "Pablo Company",
        "shortDescription": "Cool and dirty",
        "pageCount": 69,
        "releaseDate": "2024-01-01T00:00:00"
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    send_with_key(app, method, uri, body, None).await
}

pub async fn send_with_key(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    api_key: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header(header::AUTHORIZATION, key);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("Router is infallible")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub async fn create(app: &Router, book: Value) {
    let response = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("Router is infallible")
}
