//! Upload record lookups.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use pixstash_core::upload::UploadRecord;
use pixstash_shared::AppError;
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the lookup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/url/{image_id}", get(get_image_url))
        .route("/api/images/{image_id}", get(list_images))
}

/// One upload record as returned to clients.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// Identifier the upload is filed under.
    pub image_id: String,
    /// Remote URL, under its legacy name.
    pub s3_url: String,
    /// Remote URL.
    pub image_url: String,
    /// Sanitized original filename.
    pub original_filename: String,
    /// Size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub content_type: String,
    /// Upload time (RFC 3339).
    pub uploaded_at: String,
}

impl From<UploadRecord> for ImageResponse {
    fn from(record: UploadRecord) -> Self {
        Self {
            image_id: record.image_id.into_inner(),
            s3_url: record.remote_url.clone(),
            image_url: record.remote_url,
            original_filename: record.original_filename,
            file_size: record.file_size,
            content_type: record.content_type,
            uploaded_at: record.uploaded_at.to_rfc3339(),
        }
    }
}

/// Response for the latest upload of an identifier.
#[derive(Debug, Serialize)]
pub struct LatestImageResponse {
    /// Always true.
    pub success: bool,
    /// The record.
    #[serde(flatten)]
    pub image: ImageResponse,
}

/// Response for every upload of an identifier.
#[derive(Debug, Serialize)]
pub struct ImageHistoryResponse {
    /// Always true.
    pub success: bool,
    /// Number of records.
    pub count: usize,
    /// Records, newest first.
    pub images: Vec<ImageResponse>,
}

/// GET `/api/url/{image_id}`
/// Latest upload for an identifier.
async fn get_image_url(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<LatestImageResponse>, ApiError> {
    let Some(record) = state.uploads.latest(&image_id).await? else {
        return Err(ApiError::new(AppError::NotFound("Image not found".into()))
            .with_image_id(image_id));
    };

    info!(image_id = %image_id, "Image URL retrieved");
    Ok(Json(LatestImageResponse {
        success: true,
        image: record.into(),
    }))
}

/// GET `/api/images/{image_id}`
/// Every upload for an identifier, newest first.
async fn list_images(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<ImageHistoryResponse>, ApiError> {
    let records = state.uploads.history(&image_id).await?;
    if records.is_empty() {
        return Err(ApiError::new(AppError::NotFound("No images found".into()))
            .with_image_id(image_id));
    }

    let images: Vec<ImageResponse> = records.into_iter().map(Into::into).collect();
    info!(image_id = %image_id, count = images.len(), "Image history retrieved");
    Ok(Json(ImageHistoryResponse {
        success: true,
        count: images.len(),
        images,
    }))
}
