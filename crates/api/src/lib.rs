//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The upload form, upload and lookup routes
//! - Error-to-HTTP mapping
//! - Response types

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse};
use pixstash_core::hosting::{HostingConfig, HostingError, ImgbbClient};
use pixstash_core::upload::{UploadLimits, UploadService};
use pixstash_db::ImageRepository;
use pixstash_shared::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room left for multipart boundaries and part headers above the file limit.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Upload service as wired for serving.
pub type Uploads = UploadService<ImgbbClient, ImageRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configuration, fixed at startup.
    pub config: Arc<AppConfig>,
    /// Upload orchestration and lookups.
    pub uploads: Arc<Uploads>,
}

impl AppState {
    /// Wire the ImgBB client and image repository from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Result<Self, HostingError> {
        let host = ImgbbClient::from_config(HostingConfig::from(&config.imgbb))?;
        let repo = ImageRepository::new(db);
        let uploads = UploadService::new(
            Arc::new(host),
            Arc::new(repo),
            UploadLimits::from(&config.upload),
        );

        Ok(Self {
            config: Arc::new(config),
            uploads: Arc::new(uploads),
        })
    }

    /// Request body cap: the file limit plus multipart framing.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        let limit = self
            .config
            .upload
            .max_file_size
            .saturating_add(MULTIPART_OVERHEAD);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        .merge(routes::routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Resource not found".to_string(),
            image_id: None,
        }),
    )
}

#[cfg(test)]
mod test_support;
