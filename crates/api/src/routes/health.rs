//! Health check endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use pixstash_core::hosting::ImageHost;
use pixstash_shared::AppError;
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Remote storage provider.
    pub storage: &'static str,
    /// Check time (RFC 3339).
    pub timestamp: String,
    /// Configured environment name.
    pub environment: String,
    /// Service version.
    pub version: &'static str,
}

/// Failed health check response.
#[derive(Debug, Serialize)]
pub struct UnhealthyResponse {
    /// Service status.
    pub status: &'static str,
    /// Failed check.
    pub error: String,
    /// Check time (RFC 3339).
    pub timestamp: String,
}

/// Health check handler.
///
/// Healthy when the store answers and an ImgBB API key is configured.
async fn health_check(State(state): State<AppState>) -> Response {
    let timestamp = Utc::now().to_rfc3339();

    if let Err(err) = check(&state).await {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        let body = UnhealthyResponse {
            status: "unhealthy",
            error: err.message().to_string(),
            timestamp,
        };
        return (status, Json(body)).into_response();
    }

    let body = HealthResponse {
        status: "healthy",
        storage: state.uploads.host().provider_name(),
        timestamp,
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Store errors are logged here and reported without detail.
async fn check(state: &AppState) -> Result<(), AppError> {
    if let Err(e) = state.uploads.ping().await {
        error!(error = %e, "Health check failed: database unreachable");
        return Err(AppError::Unavailable("Database unreachable".to_string()));
    }

    if !state.uploads.host().config().has_api_key() {
        error!("Health check failed: ImgBB API key not configured");
        return Err(AppError::Unavailable(
            "ImgBB API key not configured".to_string(),
        ));
    }
    Ok(())
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
