//! Health check endpoints

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::AppConfig, error::AppResult, AppState};

pub fn register(router: Router<AppState>, _config: &AppConfig) -> Router<AppState> {
    router
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/status", get(status_page))
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 500, description = "Store unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.services.books.ping().await?;
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Human-readable status page
#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "HTML status page", body = String, content_type = "text/html")
    )
)]
pub async fn status_page() -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
<head><title>Library API</title></head>
<body>
<h1>Library API</h1>
<p>Server is running, version {}.</p>
<p><a href="/swagger-ui">API documentation</a></p>
</body>
</html>"#,
        env!("CARGO_PKG_VERSION")
    ))
}
