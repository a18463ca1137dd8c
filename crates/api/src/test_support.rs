//! Router test helpers: in-memory store, configurable ImgBB endpoint.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use pixstash_shared::AppConfig;
use pixstash_shared::config::{DatabaseConfig, ImgbbConfig, ServerConfig, UploadConfig};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

const BOUNDARY: &str = "pixstash-test-boundary";

pub(crate) const IMGBB_OK: &str = r#"{"success":true,"status":200,"data":{"url":"https://x/cat.png","delete_url":"https://x/del/1"}}"#;

pub(crate) fn test_config(api_url: &str, max_file_size: u64) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            path: ":memory:".to_string(),
            ..DatabaseConfig::default()
        },
        imgbb: ImgbbConfig {
            api_key: "test-key".to_string(),
            api_url: api_url.to_string(),
            ..ImgbbConfig::default()
        },
        upload: UploadConfig {
            max_file_size,
            ..UploadConfig::default()
        },
        environment: "test".to_string(),
        log_level: "info".to_string(),
    }
}

pub(crate) async fn test_app_with(config: AppConfig) -> (Router, DatabaseConnection) {
    let db = pixstash_db::connect(&config.database)
        .await
        .expect("Failed to connect to database");
    pixstash_db::init_schema(&db)
        .await
        .expect("Failed to initialize schema");
    let state = AppState::new(config, db.clone()).expect("state should build");
    (create_router(state), db)
}

pub(crate) async fn test_app(api_url: &str) -> (Router, DatabaseConnection) {
    test_app_with(test_config(api_url, 1024 * 1024)).await
}

/// An ImgBB URL nothing listens on.
pub(crate) async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/1/upload")
}

/// A multipart body with one part.
pub(crate) fn multipart_request(
    uri: &str,
    field: &str,
    filename: Option<&str>,
    bytes: &[u8],
) -> Request<Body> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
