//! API handlers for the library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    Router,
};
use subtle::ConstantTimeEq;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::AppConfig, error::AppError, AppState};

/// Adds one group of routes to the router
pub type RegisterEndpoints = fn(Router<AppState>, &AppConfig) -> Router<AppState>;

/// Every endpoint group served by the application, in registration order
pub const ENDPOINTS: &[RegisterEndpoints] = &[health::register, books::register, openapi::register];

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let config = state.config.clone();
    ENDPOINTS
        .iter()
        .fold(Router::new(), |router, register| register(router, &config))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// JSON body extractor whose rejections use the application's error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Extractor guarding mutating routes with the configured API key.
///
/// Passes every request through when no key is configured.
pub struct RequireApiKey;

#[async_trait]
impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.auth.api_key.as_deref() else {
            return Ok(RequireApiKey);
        };

        let provided = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            return Err(AppError::Authentication("Invalid API key".to_string()));
        }

        Ok(RequireApiKey)
    }
}
