//! Image upload route.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    routing::post,
};
use pixstash_core::upload::{IncomingFile, UploadError, UploadRecord};
use pixstash_shared::{AppError, ImageId};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Creates the upload route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload/{image_id}", post(upload_image))
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true.
    pub success: bool,
    /// Confirmation message.
    pub message: &'static str,
    /// Identifier the upload is filed under.
    pub image_id: String,
    /// Remote URL, under its legacy name.
    pub s3_url: String,
    /// Remote URL.
    pub image_url: String,
    /// Remote deletion URL, if the host returned one.
    pub delete_url: Option<String>,
    /// Upload time (RFC 3339).
    pub uploaded_at: String,
}

impl From<UploadRecord> for UploadResponse {
    fn from(record: UploadRecord) -> Self {
        Self {
            success: true,
            message: "Image uploaded successfully",
            delete_url: record.delete_url().map(String::from),
            image_id: record.image_id.into_inner(),
            s3_url: record.remote_url.clone(),
            image_url: record.remote_url,
            uploaded_at: record.uploaded_at.to_rfc3339(),
        }
    }
}

/// POST `/upload/{image_id}`
/// Validate the `file` part, push it to the image host and record it.
async fn upload_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    // The identifier is checked before the body is read.
    ImageId::parse(&image_id).map_err(UploadError::from)?;

    let max_file_size = state.uploads.limits().max_file_size;
    let file = match multipart {
        Ok(multipart) => read_file_field(multipart, max_file_size).await?,
        Err(_) => None,
    };

    let record = state
        .uploads
        .upload(&image_id, file)
        .await
        .map_err(|e| ApiError::from(e).masked("Internal server error during upload"))?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// First part named `file` that carries a filename; other parts are skipped.
///
/// A `file` part without a `filename` attribute is a plain form value, not a file.
async fn read_file_field(
    mut multipart: Multipart,
    max_file_size: u64,
) -> Result<Option<IncomingFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, max_file_size))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(String::from) else {
            continue;
        };

        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&e, max_file_size))?;

        return Ok(Some(IncomingFile {
            filename: Some(filename),
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

/// Bodies cut off by the request limit report the same message as the size check.
fn multipart_error(err: &MultipartError, max_file_size: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let too_large = UploadError::file_too_large(0, max_file_size);
        return ApiError::new(AppError::PayloadTooLarge(too_large.to_string()));
    }
    ApiError::new(AppError::Validation(err.body_text()))
}
