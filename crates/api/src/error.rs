//! Error-to-HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pixstash_core::upload::UploadError;
use pixstash_shared::AppError;
use serde::Serialize;
use tracing::{error, info, warn};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Identifier the request was about, where relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

/// Handler error carrying the application error and response context.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    image_id: Option<String>,
    public_message: Option<&'static str>,
}

impl ApiError {
    /// Wrap an application error.
    #[must_use]
    pub const fn new(error: AppError) -> Self {
        Self {
            error,
            image_id: None,
            public_message: None,
        }
    }

    /// Echo the identifier in the error body.
    #[must_use]
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    /// Message shown instead of server-side detail.
    #[must_use]
    pub const fn masked(mut self, message: &'static str) -> Self {
        self.public_message = Some(message);
        self
    }

    /// Store failures never echo their detail.
    fn client_message(&self) -> String {
        if self.error.is_client_visible() {
            return self.error.message().to_string();
        }
        self.public_message.unwrap_or("Database error").to_string()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error)
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        Self::new(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.error.error_code();

        if status.is_server_error() {
            error!(code, image_id = ?self.image_id, error = %self.error, "Request failed");
        } else if status == StatusCode::NOT_FOUND {
            info!(code, image_id = ?self.image_id, "{}", self.error.message());
        } else {
            warn!(code, image_id = ?self.image_id, "{}", self.error.message());
        }

        let body = ErrorResponse {
            error: self.client_message(),
            image_id: self.image_id,
        };
        (status, Json(body)).into_response()
    }
}
