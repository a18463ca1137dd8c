//! Browser upload form.

use axum::{
    Router,
    extract::Path,
    response::Html,
    routing::get,
};
use pixstash_core::upload::UploadError;
use pixstash_shared::ImageId;
use tracing::info;

use crate::{AppState, error::ApiError};

const UPLOAD_TEMPLATE: &str = include_str!("../../templates/upload.html");

/// Creates the upload form route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/{image_id}", get(upload_page))
}

/// GET `/{image_id}`
/// Serve the upload form bound to an identifier.
async fn upload_page(Path(raw_id): Path<String>) -> Result<Html<String>, ApiError> {
    let image_id = ImageId::parse(&raw_id).map_err(UploadError::from)?;

    info!(image_id = %image_id, "Upload page requested");
    Ok(Html(render_upload_page(&image_id)))
}

/// Identifiers hold only alphanumerics, `-` and `_`, so they are inserted unescaped.
fn render_upload_page(image_id: &ImageId) -> String {
    UPLOAD_TEMPLATE.replace("{{image_id}}", image_id.as_str())
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header::CONTENT_TYPE};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{get, send, test_app};

    #[test]
    fn test_render_binds_id() {
        let id = ImageId::parse("abc-123").expect("valid id");
        let html = render_upload_page(&id);
        assert!(html.contains("/upload/abc-123"));
        assert!(!html.contains("{{image_id}}"));
    }

    #[tokio::test]
    async fn test_upload_page_served() {
        let (app, _db) = test_app("http://127.0.0.1:9/1/upload").await;

        let response = app.oneshot(get("/abc-123")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_upload_page_invalid_id() {
        let (app, _db) = test_app("http://127.0.0.1:9/1/upload").await;

        let (status, body) = send(&app, get("/bad.id")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid image ID format");
    }
}
